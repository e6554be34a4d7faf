use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    entities::Credential,
    error::{invalid_credential_error, rejected_error, upstream_error, Error},
};

use super::{status_error, Authenticator, RecordStore};

pub const IDENTITY_TOOLKIT_BASE: &str = "https://identitytoolkit.googleapis.com/v1";

const INVALID_CREDENTIAL_REASONS: [&str; 4] = [
    "INVALID_LOGIN_CREDENTIALS",
    "INVALID_PASSWORD",
    "EMAIL_NOT_FOUND",
    "INVALID_EMAIL",
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResponse {
    local_id: String,
    email: String,
    id_token: String,
    refresh_token: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct PushResponse {
    name: String,
}

/// Email and password accounts on Firebase Authentication.
#[derive(Clone, Debug)]
pub struct FirebaseAuth {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FirebaseAuth {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: IDENTITY_TOOLKIT_BASE.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn password_call(
        &self,
        method: &str,
        email: &str,
        password: &str,
    ) -> Result<Credential, Error> {
        let url = format!("{}/accounts:{}", self.base_url.trim_end_matches('/'), method);

        let res = self
            .client
            .post(url)
            .query(&[("key", &self.api_key)])
            .json(&PasswordRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await?;

        let status = res.status();

        if status.is_client_error() {
            let envelope: ErrorEnvelope = res.json().await.map_err(|_| upstream_error())?;
            return Err(vendor_error(&envelope.error.message));
        }

        if let Some(err) = status_error(status) {
            return Err(err);
        }

        let data: PasswordResponse = res.json().await?;

        Ok(Credential {
            user_id: data.local_id,
            email: data.email,
            id_token: data.id_token,
            refresh_token: data.refresh_token,
        })
    }
}

#[async_trait]
impl Authenticator for FirebaseAuth {
    #[tracing::instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<Credential, Error> {
        self.password_call("signInWithPassword", email, password)
            .await
    }

    #[tracing::instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> Result<Credential, Error> {
        self.password_call("signUp", email, password).await
    }
}

/// Turns an Identity Toolkit error message such as
/// `WEAK_PASSWORD : Password should be at least 6 characters` into an [`Error`].
pub(crate) fn vendor_error(message: &str) -> Error {
    let (reason, detail) = match message.split_once(':') {
        Some((reason, detail)) => (reason.trim(), Some(detail.trim())),
        None => (message.trim(), None),
    };

    if INVALID_CREDENTIAL_REASONS.contains(&reason) {
        return invalid_credential_error();
    }

    match (reason, detail) {
        (_, Some(detail)) if !detail.is_empty() => rejected_error(detail),
        ("EMAIL_EXISTS", _) => rejected_error("The email address is already in use."),
        ("TOO_MANY_ATTEMPTS_TRY_LATER", _) => {
            rejected_error("Too many attempts. Please try again later.")
        }
        ("USER_DISABLED", _) => rejected_error("This account has been disabled."),
        _ => rejected_error(reason),
    }
}

/// Firebase Realtime Database, written through its REST interface.
#[derive(Clone, Debug)]
pub struct RealtimeDatabase {
    client: reqwest::Client,
    database_url: String,
    id_token: Option<String>,
}

impl RealtimeDatabase {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            database_url: database_url.into(),
            id_token: None,
        }
    }

    /// Authenticates writes as the signed-in user.
    pub fn with_id_token(mut self, id_token: impl Into<String>) -> Self {
        self.id_token = Some(id_token.into());
        self
    }
}

#[async_trait]
impl RecordStore for RealtimeDatabase {
    #[tracing::instrument(skip(self, record))]
    async fn append_record(&self, collection: &str, record: Value) -> Result<String, Error> {
        let url = format!(
            "{}/{}.json",
            self.database_url.trim_end_matches('/'),
            collection
        );

        let mut req = self.client.post(url).json(&record);

        if let Some(token) = &self.id_token {
            req = req.query(&[("auth", token)]);
        }

        let res = req.send().await?;

        if let Some(err) = status_error(res.status()) {
            return Err(err);
        }

        let data: PushResponse = res.json().await?;

        Ok(data.name)
    }
}
