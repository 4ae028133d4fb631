use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};

use super::{Datastore, SessionFilter, SessionPatch, StoreError};
use crate::models::{Session, User};

const USERS_COLLECTION: &str = "users";
const SESSIONS_COLLECTION: &str = "sessions";

const DUPLICATE_KEY_CODE: i32 = 11000;
const STORE_TIMEOUT_SECS: u64 = 5;

/// Production datastore over MongoDB. One client is created at startup and
/// shared by all requests; operations are bounded by the client's
/// server-selection and connect timeouts, which surface as `Database` errors.
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connects and pings the deployment. Failing here is fatal to startup.
    pub async fn connect(url: &str, db_name: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(url).await.map_err(to_store_err)?;
        options.server_selection_timeout = Some(Duration::from_secs(STORE_TIMEOUT_SECS));
        options.connect_timeout = Some(Duration::from_secs(STORE_TIMEOUT_SECS));

        let client = Client::with_options(options).map_err(to_store_err)?;
        let db = client.database(db_name);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(to_store_err)?;

        Ok(Self { db })
    }

    /// Unique indexes back the duplicate-key semantics for user ids, emails
    /// and session ids.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        for (collection, field) in [
            (USERS_COLLECTION, "id"),
            (USERS_COLLECTION, "email"),
            (SESSIONS_COLLECTION, "id"),
        ] {
            let mut keys = Document::new();
            keys.insert(field, 1);
            let index = IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(true).build())
                .build();
            self.db
                .collection::<Document>(collection)
                .create_index(index)
                .await
                .map_err(to_store_err)?;
        }
        Ok(())
    }

    fn users(&self) -> Collection<User> {
        self.db.collection(USERS_COLLECTION)
    }

    fn sessions(&self) -> Collection<Session> {
        self.db.collection(SESSIONS_COLLECTION)
    }
}

#[async_trait]
impl Datastore for MongoStore {
    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        self.users().insert_one(&user).await.map_err(to_store_err)?;
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> Result<User, StoreError> {
        self.users()
            .find_one(doc! { "id": id })
            .await
            .map_err(to_store_err)?
            .ok_or(StoreError::NotFound)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.users()
            .find_one(doc! { "email": email })
            .await
            .map_err(to_store_err)?
            .ok_or(StoreError::NotFound)
    }

    async fn create_session(&self, session: Session) -> Result<Session, StoreError> {
        self.sessions()
            .insert_one(&session)
            .await
            .map_err(to_store_err)?;
        Ok(session)
    }

    async fn get_session(&self, id: &str, owner: &str) -> Result<Session, StoreError> {
        self.sessions()
            .find_one(doc! { "id": id, "owner": owner })
            .await
            .map_err(to_store_err)?
            .ok_or(StoreError::NotFound)
    }

    async fn get_sessions(
        &self,
        owner: &str,
        filter: Option<SessionFilter>,
    ) -> Result<Vec<Session>, StoreError> {
        let mut query = doc! { "owner": owner };
        if let Some(filter) = filter {
            query.insert("created_at", doc! { "$gte": filter.lower_bound(Local::now()) });
        }

        let cursor = self
            .sessions()
            .find(query)
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(to_store_err)?;

        cursor.try_collect().await.map_err(to_store_err)
    }

    async fn update_session(&self, id: &str, patch: SessionPatch) -> Result<(), StoreError> {
        let set = set_document(&patch);
        if set.is_empty() {
            // nothing to write, but the id must still resolve
            return self
                .sessions()
                .find_one(doc! { "id": id })
                .await
                .map_err(to_store_err)?
                .map(|_| ())
                .ok_or(StoreError::NotFound);
        }

        let result = self
            .sessions()
            .update_one(doc! { "id": id }, doc! { "$set": set })
            .await
            .map_err(to_store_err)?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_session(&self, id: &str) -> Result<(), StoreError> {
        let result = self
            .sessions()
            .delete_one(doc! { "id": id })
            .await
            .map_err(to_store_err)?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

fn set_document(patch: &SessionPatch) -> Document {
    let mut set = doc! {};
    if let Some(title) = &patch.title {
        set.insert("title", title.as_str());
    }
    if let Some(description) = &patch.description {
        set.insert("description", description.as_str());
    }
    set
}

fn to_store_err(err: mongodb::error::Error) -> StoreError {
    if is_duplicate_key(&err) {
        StoreError::DuplicateKey
    } else {
        StoreError::Database(err.to_string())
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_err)) => {
            write_err.code == DUPLICATE_KEY_CODE
        }
        _ => false,
    }
}
