mod handler;
mod model;

pub use handler::{login, me, refresh_token, sign_up};
pub use model::{AuthResponse, LoginRequest, SignUpRequest, UserResponse};
