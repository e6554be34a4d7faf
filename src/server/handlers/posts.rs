use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Extension, Json, Path, Query};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::malformed;
use crate::auth::User;
use crate::entities::{Post, PostDraft};
use crate::error::Error;
use crate::server::{extract::AuthUser, DynAPI};

#[derive(Serialize, Deserialize)]
pub struct ListParams {
    limit: Option<i64>,
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Post>>, Error> {
    let Query(params) = params.map_err(malformed)?;

    let posts = api.list_posts(User::guest(), params.limit).await?;

    Ok(posts.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Post>, Error> {
    let Path(id) = id.map_err(malformed)?;

    let post = api.find_post(User::guest(), id).await?;

    Ok(post.into())
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    AuthUser(user): AuthUser,
    draft: Result<Json<PostDraft>, JsonRejection>,
) -> Result<Json<Post>, Error> {
    let Json(draft) = draft.map_err(malformed)?;

    let post = api.create_post(user, draft).await?;

    Ok(post.into())
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    AuthUser(user): AuthUser,
    id: Result<Path<i64>, PathRejection>,
    draft: Result<Json<PostDraft>, JsonRejection>,
) -> Result<Json<Post>, Error> {
    let Path(id) = id.map_err(malformed)?;
    let Json(draft) = draft.map_err(malformed)?;

    let post = api.update_post(user, id, draft).await?;

    Ok(post.into())
}

pub async fn delete(
    Extension(api): Extension<DynAPI>,
    AuthUser(user): AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, Error> {
    let Path(id) = id.map_err(malformed)?;

    api.delete_post(user, id).await?;

    Ok(Json(json!({ "detail": "Post deleted successfully" })))
}
