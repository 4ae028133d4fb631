use serde::{Deserialize, Serialize};

/// Persisted user document. Created once at sign-up and immutable afterwards.
/// The hash is part of the stored document but never reaches API responses,
/// which use the response models under `routes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
}

/// Persisted session document. `start`, `end` and `created_at` are unix
/// seconds; `duration` is `end - start` in seconds, fixed at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub owner: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start: i64,
    pub end: i64,
    pub duration: i64,
    pub created_at: i64,
}
