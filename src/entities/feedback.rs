use serde::{Deserialize, Serialize};

pub const FEEDBACK_COLLECTION: &str = "feedbacks";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub name: String,
    pub email: String,
    pub feedback: String,
}

impl Feedback {
    pub fn is_complete(&self) -> bool {
        !(self.name.is_empty() || self.email.is_empty() || self.feedback.is_empty())
    }
}
