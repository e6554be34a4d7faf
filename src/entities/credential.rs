use serde::{Deserialize, Serialize};

/// Session issued by the authentication service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub user_id: String,
    pub email: String,
    pub id_token: String,
    pub refresh_token: String,
}
