use serde::{Deserialize, Serialize};

use crate::auth::token::TokenPair;
use crate::models::User;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub passcode: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub passcode: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub auth_token: String,
    pub refresh_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl AuthResponse {
    pub fn new(message: &str, pair: TokenPair, user: Option<UserResponse>) -> Self {
        Self {
            success: true,
            message: message.into(),
            auth_token: pair.auth_token,
            refresh_token: pair.refresh_token,
            user,
        }
    }
}

/// Client-facing view of a user; the stored hash never leaves the backend.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
