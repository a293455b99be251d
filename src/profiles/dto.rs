use serde::{Deserialize, Serialize};

/// User profile document, keyed by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
