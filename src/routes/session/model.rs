use serde::{Deserialize, Serialize};

use crate::models::Session;
use crate::store::SessionFilter;

#[derive(Debug, Deserialize)]
pub struct SaveSessionRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub start: i64,
    pub end: i64,
}

/// `?filter=day|week|month`; absent means no lower bound.
#[derive(Debug, Default, Deserialize)]
pub struct ListSessionsQuery {
    #[serde(default)]
    pub filter: Option<SessionFilter>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub owner: String,
    pub title: String,
    pub description: String,
    pub start: i64,
    pub end: i64,
    pub duration: i64,
    pub created_at: i64,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            owner: session.owner,
            title: session.title,
            description: session.description,
            start: session.start,
            end: session.end,
            duration: session.duration,
            created_at: session.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}
