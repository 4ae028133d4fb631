use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Local;
use tokio::sync::RwLock;

use super::{Datastore, SessionFilter, SessionPatch, StoreError};
use crate::models::{Session, User};

/// In-process datastore double mirroring `MongoStore` semantics. Uniqueness
/// checks run under the write lock, so concurrent creates with the same key
/// resolve to exactly one winner.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Datastore for MemoryStore {
    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) || users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateKey);
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create_session(&self, session: Session) -> Result<Session, StoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(StoreError::DuplicateKey);
        }
        sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn get_session(&self, id: &str, owner: &str) -> Result<Session, StoreError> {
        self.sessions
            .read()
            .await
            .get(id)
            .filter(|session| session.owner == owner)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_sessions(
        &self,
        owner: &str,
        filter: Option<SessionFilter>,
    ) -> Result<Vec<Session>, StoreError> {
        let bound = filter.map(|f| f.lower_bound(Local::now()));

        let mut sessions: Vec<Session> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|session| session.owner == owner)
            .filter(|session| bound.is_none_or(|b| session.created_at >= b))
            .cloned()
            .collect();

        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }

    async fn update_session(&self, id: &str, patch: SessionPatch) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id).ok_or(StoreError::NotFound)?;

        if let Some(title) = patch.title {
            session.title = title;
        }
        if let Some(description) = patch.description {
            session.description = description;
        }
        Ok(())
    }

    async fn delete_session(&self, id: &str) -> Result<(), StoreError> {
        self.sessions
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
