//! Admin login and identity models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Login form body of `POST /`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    /// Usernames are stored upper-cased; lookups trim and upper-case input.
    pub fn normalized_username(&self) -> String {
        normalize_username(&self.username)
    }
}

pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Response of `GET /api/user-info`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    pub username: String,
    pub nombre: String,
}

/// Generic success body used by mutation endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
