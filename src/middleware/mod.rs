mod auth;

pub use auth::{Identity, auth_context};
