use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::User;
use crate::entities::AccessToken;
use crate::error::{token_error, unauthenticated_error, Error};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Username.
    pub sub: String,
    pub id: Uuid,
    pub exp: i64,
}

/// Signs and checks HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, lifetime_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime: Duration::minutes(lifetime_minutes),
        }
    }

    pub fn issue(&self, user: &User) -> Result<AccessToken, Error> {
        let claims = Claims {
            sub: user.username.clone(),
            id: user.id,
            exp: (Utc::now() + self.lifetime).timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding).map_err(token_error)?;

        Ok(AccessToken::bearer(token))
    }

    /// Signature and expiry are checked; any failure is an authentication error.
    pub fn verify(&self, token: &str) -> Result<Claims, Error> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!("rejected bearer token: {}", err);
                unauthenticated_error()
            })
    }
}
