use crate::{entities::Post, error::Error, external::FeedSource};

/// Posts requested per load.
pub const FEED_LIMIT: usize = 50;

/// Sequence number of one issued load. Only the latest one may change state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FeedView<'a> {
    Loading,
    Error(&'a str),
    Content(&'a [Post]),
}

/// Newest first. Posts sharing a timestamp keep their response order.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

#[derive(Clone, Debug)]
pub struct FeedLoader {
    posts: Vec<Post>,
    error: Option<String>,
    loading: bool,
    issued: u64,
}

impl Default for FeedLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedLoader {
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            error: None,
            loading: true,
            issued: 0,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn view(&self) -> FeedView<'_> {
        if self.loading {
            return FeedView::Loading;
        }

        match &self.error {
            Some(message) => FeedView::Error(message),
            None => FeedView::Content(&self.posts),
        }
    }

    /// Marks a new load as in flight and returns its ticket.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.loading = true;

        Ticket(self.issued)
    }

    /// Applies the outcome of the load identified by `ticket`.
    ///
    /// Returns `false` and changes nothing when a newer load has been issued
    /// since, so a slow response can never overwrite a fresher one.
    pub fn complete(&mut self, ticket: Ticket, result: Result<Vec<Post>, Error>) -> bool {
        if ticket.0 != self.issued {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.issued,
                "discarding stale feed response"
            );
            return false;
        }

        match result {
            Ok(mut posts) => {
                sort_newest_first(&mut posts);
                posts.truncate(FEED_LIMIT);

                self.posts = posts;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!("feed load failed: {}", err);
                self.error = Some(err.message);
            }
        }

        self.loading = false;
        true
    }

    /// Fetches and applies one load. Used when nothing else can start a load concurrently.
    pub async fn load<S: FeedSource + ?Sized>(&mut self, source: &S) -> Result<(), Error> {
        let ticket = self.begin();
        let result = source.fetch_posts(FEED_LIMIT).await;
        let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);

        self.complete(ticket, result);

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::upstream_error;
    use chrono::{TimeZone, Utc};

    fn post(id: i64, hour: u32) -> Post {
        Post {
            id,
            title: format!("post {}", id),
            content: String::new(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
            creator: None,
        }
    }

    fn ids(posts: &[Post]) -> Vec<i64> {
        posts.iter().map(|post| post.id).collect()
    }

    #[test]
    fn starts_loading() {
        let loader = FeedLoader::new();
        assert_eq!(loader.view(), FeedView::Loading);
    }

    #[test]
    fn sorts_newest_first() {
        let mut loader = FeedLoader::new();
        let ticket = loader.begin();

        assert!(loader.complete(ticket, Ok(vec![post(1, 9), post(2, 11), post(3, 10)])));
        assert_eq!(ids(loader.posts()), vec![2, 3, 1]);
    }

    #[test]
    fn equal_timestamps_keep_response_order() {
        let mut loader = FeedLoader::new();
        let ticket = loader.begin();

        loader.complete(
            ticket,
            Ok(vec![post(4, 10), post(1, 9), post(7, 10), post(2, 10)]),
        );

        assert_eq!(ids(loader.posts()), vec![4, 7, 2, 1]);
    }

    #[test]
    fn error_hides_previous_content() {
        let mut loader = FeedLoader::new();
        let ticket = loader.begin();
        loader.complete(ticket, Ok(vec![post(1, 9)]));

        let ticket = loader.begin();
        assert_eq!(loader.view(), FeedView::Loading);

        loader.complete(ticket, Err(upstream_error()));

        assert_eq!(loader.view(), FeedView::Error("upstream error"));
        assert_eq!(loader.posts().len(), 1);
    }

    #[test]
    fn success_clears_error() {
        let mut loader = FeedLoader::new();
        let ticket = loader.begin();
        loader.complete(ticket, Err(upstream_error()));

        let ticket = loader.begin();
        loader.complete(ticket, Ok(vec![post(1, 9)]));

        assert_eq!(loader.error(), None);
        assert!(matches!(loader.view(), FeedView::Content(posts) if posts.len() == 1));
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut loader = FeedLoader::new();
        let slow = loader.begin();
        let fast = loader.begin();

        assert!(loader.complete(fast, Ok(vec![post(2, 11)])));
        assert!(!loader.complete(slow, Ok(vec![post(1, 9)])));

        assert_eq!(ids(loader.posts()), vec![2]);
        assert!(!loader.is_loading());
    }

    #[test]
    fn stale_completion_does_not_end_loading() {
        let mut loader = FeedLoader::new();
        let first = loader.begin();
        let _second = loader.begin();

        loader.complete(first, Err(upstream_error()));

        assert!(loader.is_loading());
        assert_eq!(loader.error(), None);
    }

    #[test]
    fn keeps_newest_within_limit() {
        let mut loader = FeedLoader::new();
        let ticket = loader.begin();
        let posts = (0..60).map(|id| post(id, (id % 24) as u32)).collect();

        loader.complete(ticket, Ok(posts));

        assert_eq!(loader.posts().len(), FEED_LIMIT);
        assert_eq!(loader.posts()[0].timestamp.format("%H").to_string(), "23");
    }
}
