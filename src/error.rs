use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};

pub const INVALID_INPUT: i32 = 101;
pub const NOT_FOUND: i32 = 102;
pub const FORBIDDEN: i32 = 103;
pub const INVALID_CREDENTIAL: i32 = 104;
pub const UNAUTHENTICATED: i32 = 105;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn is_internal(&self) -> bool {
        (1..=99).contains(&self.code)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        database_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<oso::OsoError> for Error {
    fn from(err: oso::OsoError) -> Self {
        authorization_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            NOT_FOUND => (StatusCode::NOT_FOUND, self.message.as_str()),
            FORBIDDEN => (StatusCode::FORBIDDEN, self.message.as_str()),
            INVALID_CREDENTIAL | UNAUTHENTICATED => {
                (StatusCode::UNAUTHORIZED, self.message.as_str())
            }
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: INVALID_INPUT,
        message: "invalid input".into(),
    }
}

pub fn not_found_error(what: &str) -> Error {
    Error {
        code: NOT_FOUND,
        message: format!("{} not found", what),
    }
}

pub fn forbidden_error() -> Error {
    Error {
        code: FORBIDDEN,
        message: "not authorized".into(),
    }
}

pub fn invalid_credential_error() -> Error {
    Error {
        code: INVALID_CREDENTIAL,
        message: "invalid credential".into(),
    }
}

pub fn unauthenticated_error() -> Error {
    Error {
        code: UNAUTHENTICATED,
        message: "could not validate credentials".into(),
    }
}

/// A client error carrying a message produced by an upstream vendor.
pub fn rejected_error(message: impl Into<String>) -> Error {
    Error {
        code: INVALID_INPUT,
        message: message.into(),
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error {
        code: 1,
        message: format!("environment variable error: {}", err),
    }
}

pub fn database_error<T: Debug>(err: T) -> Error {
    tracing::error!("database error: {:?}", err);

    Error {
        code: 2,
        message: "database error".into(),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: err.to_string(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}

pub fn authorization_error(err: oso::OsoError) -> Error {
    tracing::error!("authorization error: {}", err);

    Error {
        code: 6,
        message: "authorization error".into(),
    }
}

pub fn token_error(err: jsonwebtoken::errors::Error) -> Error {
    tracing::error!("token error: {}", err);

    Error {
        code: 8,
        message: "token error".into(),
    }
}

pub fn hashing_error<T: Display>(err: T) -> Error {
    tracing::error!("password hashing error: {}", err);

    Error {
        code: 9,
        message: "password hashing error".into(),
    }
}

pub fn config_error(key: &str) -> Error {
    Error {
        code: 7,
        message: format!("invalid configuration value for {}", key),
    }
}

#[test]
fn internal_codes_hide_message() {
    let response = upstream_error().into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = not_found_error("post").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = forbidden_error().into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = invalid_input_error().into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = unauthenticated_error().into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = invalid_credential_error().into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn internal_classification() {
    assert!(upstream_error().is_internal());
    assert!(!invalid_credential_error().is_internal());
    assert_eq!(not_found_error("post").message, "post not found");
}
