use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use crate::{AppState, auth::token::Claims, error::AppError};

/// Identity resolved for the current request. The auth layer attaches one to
/// every request; anonymous means no credential was presented or it failed
/// validation. Enforcement happens per handler, since public and protected
/// operations share the same router.
#[derive(Debug, Clone, Default)]
pub struct Identity(Option<Claims>);

impl Identity {
    pub fn authenticated(claims: Claims) -> Self {
        Self(Some(claims))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }

    /// Fails with `InvalidAuth` when the request carries no verified identity.
    pub fn require(&self) -> Result<&Claims, AppError> {
        self.0
            .as_ref()
            .ok_or_else(|| AppError::InvalidAuth("no identity attached to the request".into()))
    }
}

/// Best-effort credential resolution, run once per inbound request. A missing,
/// unparseable or invalid bearer token is logged and the request proceeds
/// unauthenticated; this layer never rejects.
pub async fn auth_context(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let mut identity = Identity::anonymous();

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if let Some(raw) = header {
        let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
        if !token.is_empty() {
            match state.tokens.validate_token(token) {
                Ok(claims) => identity = Identity::authenticated(claims),
                Err(err) => tracing::warn!(error = %err, "failed to validate bearer token"),
            }
        }
    }

    req.extensions_mut().insert(identity);
    next.run(req).await
}
