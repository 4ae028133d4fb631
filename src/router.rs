use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::{AppState, middleware::auth_context, routes};

/// Thin transport façade: one route per logical operation. The auth-context
/// layer runs for public and protected routes alike; handlers decide whether
/// an identity is required.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/auth/signup", post(routes::user::sign_up))
        .route("/auth/login", post(routes::user::login))
        .route("/auth/refresh", post(routes::user::refresh_token))
        .route("/me", get(routes::user::me))
        .route(
            "/sessions",
            post(routes::session::save_session).get(routes::session::list_sessions),
        )
        .route(
            "/sessions/{id}",
            get(routes::session::get_session)
                .patch(routes::session::update_session)
                .delete(routes::session::delete_session),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_context,
        ));

    Router::new()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
