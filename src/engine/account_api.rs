use super::Engine;

use async_trait::async_trait;
use sqlx::{Executor, Row};
use uuid::Uuid;

use crate::{
    api::AccountAPI,
    auth::User,
    entities::{AccessToken, Account, Registration},
    error::{
        hashing_error, invalid_credential_error, rejected_error, unauthenticated_error, Error,
    },
};

async fn hash_password(password: String) -> Result<String, Error> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(hashing_error)?
        .map_err(hashing_error)
}

async fn verify_password(password: String, hashed: String) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hashed))
        .await
        .map_err(hashing_error)?
        .map_err(hashing_error)
}

#[async_trait]
impl AccountAPI for Engine {
    #[tracing::instrument(skip(self, registration), fields(username = %registration.username))]
    async fn register(&self, registration: Registration) -> Result<Account, Error> {
        registration.validate()?;

        let hashed = hash_password(registration.password).await?;

        let mut conn = self.pool.acquire().await?;

        let row = conn
            .fetch_optional(
                sqlx::query(
                    "INSERT INTO users (id, username, hashed_password) VALUES ($1, $2, $3)
                    ON CONFLICT (username) DO NOTHING
                    RETURNING id, username",
                )
                .bind(Uuid::new_v4())
                .bind(&registration.username)
                .bind(&hashed),
            )
            .await?
            .ok_or_else(|| rejected_error("Username already registered"))?;

        let account = Account {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
        };
        tracing::info!(user_id = %account.id, "registered user");

        Ok(account)
    }

    #[tracing::instrument(skip(self, password))]
    async fn issue_token(&self, username: &str, password: &str) -> Result<AccessToken, Error> {
        let mut conn = self.pool.acquire().await?;

        let row = conn
            .fetch_optional(
                sqlx::query("SELECT id, username, hashed_password FROM users WHERE username = $1")
                    .bind(username),
            )
            .await?
            .ok_or_else(invalid_credential_error)?;

        let hashed: String = row.try_get("hashed_password")?;

        if !verify_password(password.to_string(), hashed).await? {
            tracing::info!("wrong password");
            return Err(invalid_credential_error());
        }

        let user = User::new(row.try_get("id")?, row.try_get::<String, _>("username")?);

        self.tokens.issue(&user)
    }

    #[tracing::instrument(skip_all)]
    async fn authenticate(&self, token: &str) -> Result<User, Error> {
        let claims = self.tokens.verify(token)?;

        let mut conn = self.pool.acquire().await?;

        let row = conn
            .fetch_optional(
                sqlx::query("SELECT id, username FROM users WHERE username = $1").bind(&claims.sub),
            )
            .await?
            .ok_or_else(unauthenticated_error)?;

        Ok(User::new(row.try_get("id")?, row.try_get::<String, _>("username")?))
    }
}
