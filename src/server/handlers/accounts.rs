use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{Extension, Form, Json};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use super::malformed;
use crate::entities::{AccessToken, Account, Registration};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct TokenRequest {
    username: String,
    password: String,
}

pub async fn register(
    Extension(api): Extension<DynAPI>,
    registration: Result<Json<Registration>, JsonRejection>,
) -> Result<(StatusCode, Json<Account>), Error> {
    let Json(registration) = registration.map_err(malformed)?;

    let account = api.register(registration).await?;

    Ok((StatusCode::CREATED, account.into()))
}

/// Password login with an urlencoded form, as OAuth2 password flow clients send it.
pub async fn token(
    Extension(api): Extension<DynAPI>,
    form: Result<Form<TokenRequest>, FormRejection>,
) -> Result<Json<AccessToken>, Error> {
    let Form(form) = form.map_err(malformed)?;

    let token = api.issue_token(&form.username, &form.password).await?;

    Ok(token.into())
}
