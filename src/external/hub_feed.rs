use async_trait::async_trait;

use crate::{entities::Post, error::Error};

use super::{status_error, FeedSource};

/// News feed served by the hub's post server.
#[derive(Clone, Debug)]
pub struct HubFeed {
    client: reqwest::Client,
    base_url: String,
}

impl HubFeed {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl FeedSource for HubFeed {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_posts(&self, limit: usize) -> Result<Vec<Post>, Error> {
        let url = format!("{}/post/all", self.base_url.trim_end_matches('/'));

        let res = self
            .client
            .get(url)
            .query(&[("limit", limit)])
            .send()
            .await?;

        if let Some(err) = status_error(res.status()) {
            return Err(err);
        }

        let posts: Vec<Post> = res.json().await?;
        tracing::debug!("fetched {} posts", posts.len());

        Ok(posts)
    }
}
