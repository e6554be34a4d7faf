use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub from_user: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            from_user: true,
        }
    }

    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            from_user: false,
        }
    }
}
