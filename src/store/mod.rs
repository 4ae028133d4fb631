mod filter;
pub mod memory;
pub mod mongo;

pub use filter::SessionFilter;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Session, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,
    #[error("duplicate key")]
    DuplicateKey,
    #[error("database error: {0}")]
    Database(String),
}

/// Partial update for a session; only the fields that are present get
/// written, absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl SessionPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// Owner-scoped CRUD over the two collections. `get_session` takes the owner
/// so a session owned by someone else is indistinguishable from one that does
/// not exist.
#[async_trait]
pub trait Datastore: Send + Sync {
    async fn create_user(&self, user: User) -> Result<User, StoreError>;
    async fn get_user(&self, id: &str) -> Result<User, StoreError>;
    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError>;

    async fn create_session(&self, session: Session) -> Result<Session, StoreError>;
    async fn get_session(&self, id: &str, owner: &str) -> Result<Session, StoreError>;
    /// Sessions for an owner, most recent first. `None` applies no lower bound.
    async fn get_sessions(
        &self,
        owner: &str,
        filter: Option<SessionFilter>,
    ) -> Result<Vec<Session>, StoreError>;
    async fn update_session(&self, id: &str, patch: SessionPatch) -> Result<(), StoreError>;
    async fn delete_session(&self, id: &str) -> Result<(), StoreError>;
}
