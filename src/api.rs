use async_trait::async_trait;

use crate::auth::User;
use crate::entities::{AccessToken, Account, Post, PostDraft, Registration};
use crate::error::Error;

#[async_trait]
pub trait PostAPI {
    /// Newest first, at most `limit` posts (defaults to the feed size).
    async fn list_posts(&self, user: User, limit: Option<i64>) -> Result<Vec<Post>, Error>;

    async fn find_post(&self, user: User, id: i64) -> Result<Post, Error>;

    async fn create_post(&self, user: User, draft: PostDraft) -> Result<Post, Error>;

    async fn update_post(&self, user: User, id: i64, draft: PostDraft) -> Result<Post, Error>;

    async fn delete_post(&self, user: User, id: i64) -> Result<(), Error>;
}

#[async_trait]
pub trait AccountAPI {
    async fn register(&self, registration: Registration) -> Result<Account, Error>;

    async fn issue_token(&self, username: &str, password: &str) -> Result<AccessToken, Error>;

    /// Resolves a bearer token to the user it was issued to.
    async fn authenticate(&self, token: &str) -> Result<User, Error>;
}

pub trait API: PostAPI + AccountAPI {}
