use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{rejected_error, Error};

pub const MAX_USERNAME_LEN: usize = 255;

/// A registered feed server user, without credentials.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), Error> {
        if self.username.trim().is_empty() {
            return Err(rejected_error("username must not be empty"));
        }

        if self.username.chars().count() > MAX_USERNAME_LEN {
            return Err(rejected_error("username is too long"));
        }

        if self.password.is_empty() {
            return Err(rejected_error("password must not be empty"));
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".into(),
        }
    }
}
