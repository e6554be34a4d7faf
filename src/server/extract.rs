use async_trait::async_trait;
use axum::extract::{Extension, FromRequest, RequestParts};
use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::auth::User;
use crate::error::{unauthenticated_error, unexpected_error, Error};
use crate::server::DynAPI;

/// The user a request's `Authorization: Bearer` token was issued to.
pub struct AuthUser(pub User);

#[async_trait]
impl<B> FromRequest<B> for AuthUser
where
    B: Send,
{
    type Rejection = Error;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let token = bearer_token(req.headers()).ok_or_else(unauthenticated_error)?;

        let Extension(api) = Extension::<DynAPI>::from_request(req)
            .await
            .map_err(|err| {
                tracing::error!("api extension missing: {}", err);
                unexpected_error()
            })?;

        Ok(Self(api.authenticate(&token).await?))
    }
}

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn reads_bearer_scheme_only() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def".into()));
        assert_eq!(bearer_token(&headers("bearer abc.def")), Some("abc.def".into()));
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
