use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod error;
pub mod ids;
pub mod middleware;
pub mod models;
pub mod router;
pub mod routes;
pub mod store;

use auth::password::PasswordEncryptor;
use auth::token::TokenHandler;
use config::Config;
use ids::IdGenerator;
use store::Datastore;

/// Shared application state, assembled once at startup and cloned into every
/// request. All capabilities are injected explicitly; nothing is resolved from
/// process-wide globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Datastore>,
    pub tokens: Arc<dyn TokenHandler>,
    pub encryptor: Arc<dyn PasswordEncryptor>,
    pub ids: IdGenerator,
    pub config: Config,
}
