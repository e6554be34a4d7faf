use std::{env, fmt::Display, net::SocketAddr, str::FromStr};

use tracing::{info, warn};

use crate::error::{config_error, Error};

pub const DEFAULT_FEED_URL: &str = "https://dbu-fastapi.onrender.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

/// Settings of the feed server binary.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub listen_addr: SocketAddr,
    pub auth_secret_key: String,
    pub token_lifetime_minutes: i64,
}

/// Settings of the hub client. Needs no database.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub feed_url: String,
    pub firebase_api_key: Option<String>,
    pub firebase_database_url: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
}

fn load_dotenv() {
    if dotenv::dotenv().is_err() {
        info!("no .env file found, reading process environment only");
    }
}

impl ServerConfig {
    /// Reads configuration from the environment, after loading `.env` if present.
    pub fn load() -> Result<Self, Error> {
        load_dotenv();

        let auth_secret_key = env::var("AUTH_SECRET_KEY")?;
        if auth_secret_key.trim().is_empty() {
            return Err(config_error("AUTH_SECRET_KEY"));
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: try_load("DATABASE_MAX_CONNECTIONS", "5")?,
            listen_addr: try_load("HUB_LISTEN_ADDR", "127.0.0.1:3000")?,
            auth_secret_key,
            token_lifetime_minutes: try_load("AUTH_TOKEN_MINUTES", "20")?,
        })
    }
}

impl ClientConfig {
    pub fn load() -> Result<Self, Error> {
        load_dotenv();

        Ok(Self {
            feed_url: try_load("HUB_FEED_URL", DEFAULT_FEED_URL)?,
            firebase_api_key: optional("FIREBASE_API_KEY"),
            firebase_database_url: optional("FIREBASE_DATABASE_URL"),
            gemini_api_key: optional("GEMINI_API_KEY"),
            gemini_model: try_load("GEMINI_MODEL", DEFAULT_GEMINI_MODEL)?,
        })
    }
}

fn optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => {
            warn!("{key} not set, the collaborator that needs it is unavailable");
            None
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, Error>
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("invalid {key} value: {e}");
            config_error(key)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let port: SocketAddr = try_load("DBU_HUB_TEST_UNSET_ADDR", "127.0.0.1:3000").unwrap();
        assert_eq!(port.port(), 3000);
    }

    #[test]
    fn malformed_values_are_config_errors() {
        env::set_var("DBU_HUB_TEST_BAD_CONNECTIONS", "many");
        let result: Result<u32, Error> = try_load("DBU_HUB_TEST_BAD_CONNECTIONS", "5");
        assert_eq!(result.unwrap_err().code, 7);
    }

    #[test]
    fn blank_optional_is_none() {
        env::set_var("DBU_HUB_TEST_BLANK_KEY", "  ");
        assert_eq!(optional("DBU_HUB_TEST_BLANK_KEY"), None);
    }

    #[test]
    fn client_config_loads_without_database() {
        let config = ClientConfig::load().unwrap();
        assert!(!config.feed_url.is_empty());
    }
}
