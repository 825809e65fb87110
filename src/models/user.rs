use serde::{Deserialize, Serialize};

/// A dashboard user. Created implicitly on first balance read or first
/// order, never deleted. The id is a short client-generated token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub balance: f64,
}

impl User {
    pub fn new(user_id: impl Into<String>) -> Self {
        User {
            user_id: user_id.into(),
            balance: 0.0,
        }
    }
}
