mod handler;
mod model;

pub use handler::{delete_session, get_session, list_sessions, save_session, update_session};
pub use model::{ListSessionsQuery, MutationResponse, SaveSessionRequest, SessionResponse};
