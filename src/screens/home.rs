use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::{
    entities::Post,
    external::FeedSource,
    feed::{FeedLoader, FEED_LIMIT},
};

#[derive(Debug, Default)]
pub struct HomeState {
    pub loader: FeedLoader,
    pub selected: Option<Post>,
}

/// News feed screen. Refreshes may overlap; only the latest one lands.
pub struct HomeScreen {
    feed: Arc<dyn FeedSource>,
    state: Mutex<HomeState>,
}

impl HomeScreen {
    pub fn new(feed: Arc<dyn FeedSource>) -> Self {
        Self {
            feed,
            state: Mutex::new(HomeState::default()),
        }
    }

    pub async fn state(&self) -> MutexGuard<'_, HomeState> {
        self.state.lock().await
    }

    /// Returns whether this refresh's response was applied.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self) -> bool {
        let ticket = self.state.lock().await.loader.begin();

        let result = self.feed.fetch_posts(FEED_LIMIT).await;

        self.state.lock().await.loader.complete(ticket, result)
    }

    pub async fn open_post(&self, id: i64) -> Option<Post> {
        let mut state = self.state.lock().await;
        let post = state.loader.posts().iter().find(|post| post.id == id).cloned();
        state.selected = post.clone();

        post
    }

    pub async fn close_post(&self) {
        self.state.lock().await.selected = None;
    }
}
