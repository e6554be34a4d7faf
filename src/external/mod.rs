mod firebase;
mod gemini;
mod hub_feed;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    config::ClientConfig,
    entities::{Coordinates, Credential, Marker, Permission, Post, Region},
    error::{config_error, Error},
};

pub use firebase::{FirebaseAuth, RealtimeDatabase};
pub use gemini::Gemini;
pub use hub_feed::HubFeed;

#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_posts(&self, limit: usize) -> Result<Vec<Post>, Error>;
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Credential, Error>;
    async fn sign_up(&self, email: &str, password: &str) -> Result<Credential, Error>;
}

/// Append-only store of records grouped by collection name.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the key the store assigned to the new record.
    async fn append_record(&self, collection: &str, record: Value) -> Result<String, Error>;
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, Error>;
}

#[async_trait]
pub trait DeviceLocator: Send + Sync {
    async fn request_permission(&self) -> Result<Permission, Error>;
    async fn current_position(&self) -> Result<Coordinates, Error>;
}

pub trait MapSurface {
    fn show(&mut self, region: &Region, markers: &[Marker]);
}

/// Stands in for a collaborator whose credentials are missing from the config.
#[derive(Clone, Debug)]
pub struct Unconfigured {
    key: &'static str,
}

impl Unconfigured {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }
}

#[async_trait]
impl Authenticator for Unconfigured {
    async fn sign_in(&self, _: &str, _: &str) -> Result<Credential, Error> {
        Err(config_error(self.key))
    }

    async fn sign_up(&self, _: &str, _: &str) -> Result<Credential, Error> {
        Err(config_error(self.key))
    }
}

#[async_trait]
impl RecordStore for Unconfigured {
    async fn append_record(&self, _: &str, _: Value) -> Result<String, Error> {
        Err(config_error(self.key))
    }
}

#[async_trait]
impl TextGenerator for Unconfigured {
    async fn complete(&self, _: &str) -> Result<String, Error> {
        Err(config_error(self.key))
    }
}

/// Everything the screens talk to, built once by the composition root.
#[derive(Clone)]
pub struct Capabilities {
    pub feed: Arc<dyn FeedSource>,
    pub auth: Arc<dyn Authenticator>,
    pub records: Arc<dyn RecordStore>,
    pub text: Arc<dyn TextGenerator>,
    pub locator: Arc<dyn DeviceLocator>,
}

impl Capabilities {
    /// HTTP clients for every configured service; the device locator comes from the host.
    pub fn from_config(config: &ClientConfig, locator: Arc<dyn DeviceLocator>) -> Self {
        let feed = Arc::new(HubFeed::new(config.feed_url.clone()));

        let auth: Arc<dyn Authenticator> = match &config.firebase_api_key {
            Some(key) => Arc::new(FirebaseAuth::new(key.clone())),
            None => Arc::new(Unconfigured::new("FIREBASE_API_KEY")),
        };

        let records: Arc<dyn RecordStore> = match &config.firebase_database_url {
            Some(url) => Arc::new(RealtimeDatabase::new(url.clone())),
            None => Arc::new(Unconfigured::new("FIREBASE_DATABASE_URL")),
        };

        let text: Arc<dyn TextGenerator> = match &config.gemini_api_key {
            Some(key) => Arc::new(Gemini::new(key.clone(), config.gemini_model.clone())),
            None => Arc::new(Unconfigured::new("GEMINI_API_KEY")),
        };

        Self {
            feed,
            auth,
            records,
            text,
            locator,
        }
    }
}

/// Maps an HTTP status to the crate's error kinds; `None` for success.
pub(crate) fn status_error(status: reqwest::StatusCode) -> Option<Error> {
    let status_code = status.as_u16();

    if (400..500).contains(&status_code) {
        Some(crate::error::rejected_error(format!(
            "request rejected with status {}",
            status_code
        )))
    } else if !status.is_success() {
        Some(crate::error::upstream_error())
    } else {
        None
    }
}
