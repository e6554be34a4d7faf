use super::{Database, Engine};

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Executor, Row, Transaction};

use crate::{
    api::PostAPI,
    auth::User,
    entities::{Creator, Post, PostDraft},
    error::{invalid_input_error, not_found_error, Error},
    feed::FEED_LIMIT,
};

pub const MAX_LIST_LIMIT: i64 = 100;

const POST_COLUMNS: &str = "id, title, content, creator_id, created_at";

pub(crate) fn clamp_limit(limit: Option<i64>) -> Result<i64, Error> {
    match limit {
        None => Ok(FEED_LIMIT as i64),
        Some(limit) if limit < 1 => Err(invalid_input_error()),
        Some(limit) => Ok(limit.min(MAX_LIST_LIMIT)),
    }
}

fn post_from_row(row: &PgRow) -> Result<Post, Error> {
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        timestamp: row.try_get("created_at")?,
        creator: Some(Creator {
            id: row.try_get("creator_id")?,
        }),
    })
}

#[tracing::instrument(skip(tx))]
async fn fetch_post_for_update(tx: &mut Transaction<'_, Database>, id: i64) -> Result<Post, Error> {
    let row = tx
        .fetch_optional(
            sqlx::query(&format!(
                "SELECT {} FROM posts WHERE id = $1 FOR UPDATE",
                POST_COLUMNS
            ))
            .bind(id),
        )
        .await?
        .ok_or_else(|| not_found_error("post"))?;

    post_from_row(&row)
}

#[async_trait]
impl PostAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn list_posts(&self, _user: User, limit: Option<i64>) -> Result<Vec<Post>, Error> {
        let limit = clamp_limit(limit)?;

        let mut conn = self.pool.acquire().await?;

        let rows = conn
            .fetch_all(
                sqlx::query(&format!(
                    "SELECT {} FROM posts ORDER BY created_at DESC, id DESC LIMIT $1",
                    POST_COLUMNS
                ))
                .bind(limit),
            )
            .await?;

        let posts = rows.iter().map(post_from_row).collect::<Result<Vec<_>, _>>()?;
        tracing::info!("number of posts retrieved: {}", posts.len());

        Ok(posts)
    }

    #[tracing::instrument(skip(self))]
    async fn find_post(&self, user: User, id: i64) -> Result<Post, Error> {
        let mut conn = self.pool.acquire().await?;

        let row = conn
            .fetch_optional(
                sqlx::query(&format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS)).bind(id),
            )
            .await?
            .ok_or_else(|| not_found_error("post"))?;

        let post = post_from_row(&row)?;

        self.authorize(user, "read", post.clone())?;

        Ok(post)
    }

    #[tracing::instrument(skip(self, draft))]
    async fn create_post(&self, user: User, draft: PostDraft) -> Result<Post, Error> {
        self.authorize(user.clone(), "create", "post")?;
        draft.validate()?;

        let mut conn = self.pool.acquire().await?;

        let row = conn
            .fetch_one(
                sqlx::query(&format!(
                    "INSERT INTO posts (title, content, creator_id) VALUES ($1, $2, $3) RETURNING {}",
                    POST_COLUMNS
                ))
                .bind(&draft.title)
                .bind(&draft.content)
                .bind(&user.id),
            )
            .await?;

        let post = post_from_row(&row)?;
        tracing::info!(post_id = post.id, "created post");

        Ok(post)
    }

    #[tracing::instrument(skip(self, draft))]
    async fn update_post(&self, user: User, id: i64, draft: PostDraft) -> Result<Post, Error> {
        draft.validate()?;

        let mut tx = self.pool.begin().await?;

        let post = fetch_post_for_update(&mut tx, id).await?;

        if let Err(err) = self.authorize(user.clone(), "update", post) {
            tracing::warn!(user_id = %user.id, post_id = id, "unauthorized update attempt");
            return Err(err);
        }

        let row = tx
            .fetch_one(
                sqlx::query(&format!(
                    "UPDATE posts SET title = $2, content = $3 WHERE id = $1 RETURNING {}",
                    POST_COLUMNS
                ))
                .bind(id)
                .bind(&draft.title)
                .bind(&draft.content),
            )
            .await?;

        tx.commit().await?;

        post_from_row(&row)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_post(&self, user: User, id: i64) -> Result<(), Error> {
        let mut tx = self.pool.begin().await?;

        let post = fetch_post_for_update(&mut tx, id).await?;

        if let Err(err) = self.authorize(user.clone(), "delete", post) {
            tracing::warn!(user_id = %user.id, post_id = id, "unauthorized delete attempt");
            return Err(err);
        }

        tx.execute(sqlx::query("DELETE FROM posts WHERE id = $1").bind(id))
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
