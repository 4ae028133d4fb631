use axum::{Extension, Json, extract::State};
use chrono::Utc;

use crate::{
    AppState,
    auth::token::gen_auth_tokens,
    error::AppError,
    middleware::Identity,
    models::User,
    store::StoreError,
};

use super::model::{AuthResponse, LoginRequest, SignUpRequest, UserResponse};

pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if req.email.trim().is_empty() || req.passcode.is_empty() {
        return Err(AppError::InvalidRequest("email and passcode are required".into()).log("sign up"));
    }

    // duplicate check runs before paying the cost of hashing the passcode
    match state.store.get_user_by_email(&req.email).await {
        Ok(_) => {
            return Err(
                AppError::DuplicateKey(format!("email already registered: {}", req.email))
                    .log("sign up"),
            );
        }
        Err(StoreError::NotFound) => {}
        Err(e) => return Err(AppError::Database(e.to_string()).log("sign up")),
    }

    let password_hash = state
        .encryptor
        .hash_passcode(&req.passcode)
        .map_err(|e| AppError::Internal(e.to_string()).log("sign up"))?;

    let user = User {
        id: state.ids.generate(),
        name: req.name,
        email: req.email,
        password_hash,
        created_at: Utc::now().timestamp(),
    };

    let user = state.store.create_user(user).await.map_err(|e| match e {
        StoreError::DuplicateKey => {
            AppError::DuplicateKey("user id or email collision on create".into()).log("sign up")
        }
        other => AppError::Database(other.to_string()).log("sign up"),
    })?;

    let pair = gen_auth_tokens(state.tokens.as_ref(), &user.id)
        .map_err(|e| AppError::Internal(e.to_string()).log("sign up"))?;

    Ok(Json(AuthResponse::new(
        "Sign up successful",
        pair,
        Some(user.into()),
    )))
}

/// Unknown email and wrong passcode produce the same outward failure.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = match state.store.get_user_by_email(&req.email).await {
        Ok(user) => user,
        Err(StoreError::NotFound) => {
            return Err(AppError::InvalidAuth(format!("unknown email: {}", req.email)).log("login"));
        }
        Err(e) => return Err(AppError::Database(e.to_string()).log("login")),
    };

    if !state
        .encryptor
        .compare_passcode(&req.passcode, &user.password_hash)
    {
        return Err(AppError::InvalidAuth("passcode mismatch".into()).log("login"));
    }

    let pair = gen_auth_tokens(state.tokens.as_ref(), &user.id)
        .map_err(|e| AppError::Internal(e.to_string()).log("login"))?;

    Ok(Json(AuthResponse::new(
        "Login successful",
        pair,
        Some(user.into()),
    )))
}

pub async fn refresh_token(
    Extension(identity): Extension<Identity>,
    State(state): State<AppState>,
) -> Result<Json<AuthResponse>, AppError> {
    let claims = identity.require().map_err(|e| e.log("refresh token"))?;

    let pair = gen_auth_tokens(state.tokens.as_ref(), &claims.sub)
        .map_err(|e| AppError::Internal(e.to_string()).log("refresh token"))?;

    Ok(Json(AuthResponse::new("Token refreshed", pair, None)))
}

pub async fn me(
    Extension(identity): Extension<Identity>,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    let claims = identity.require().map_err(|e| e.log("me"))?;

    let user = state.store.get_user(&claims.sub).await.map_err(|e| match e {
        StoreError::NotFound => {
            AppError::NotFound(format!("no user for subject {}", claims.sub)).log("me")
        }
        other => AppError::Database(other.to_string()).log("me"),
    })?;

    Ok(Json(user.into()))
}
