use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{rejected_error, Error};

pub const MAX_TITLE_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "deserialize_creator",
        skip_serializing_if = "Option::is_none"
    )]
    pub creator: Option<Creator>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub id: Uuid,
}

/// Title and body submitted when creating or editing a post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

impl PostDraft {
    pub fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(rejected_error("title must not be empty"));
        }

        if self.title.chars().count() > MAX_TITLE_LEN {
            return Err(rejected_error("title is too long"));
        }

        if self.content.trim().is_empty() {
            return Err(rejected_error("content must not be empty"));
        }

        Ok(())
    }
}

/// Accepts RFC 3339 timestamps and offset-less ones, which are read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => Ok(timestamp.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Utc.from_utc_datetime(&naive)),
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(de::Error::custom)
}

// feed servers that key users by integer still deserialize, without a creator
fn deserialize_creator<'de, D>(deserializer: D) -> Result<Option<Creator>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}
