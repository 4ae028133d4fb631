use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::Utc;

use crate::{
    AppState,
    error::AppError,
    middleware::Identity,
    models::Session,
    store::{SessionPatch, StoreError},
};

use super::model::{ListSessionsQuery, MutationResponse, SaveSessionRequest, SessionResponse};

pub async fn save_session(
    Extension(identity): Extension<Identity>,
    State(state): State<AppState>,
    Json(req): Json<SaveSessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let claims = identity.require().map_err(|e| e.log("save session"))?;

    if req.end < req.start {
        return Err(AppError::InvalidRequest("session end precedes start".into()).log("save session"));
    }
    // end >= start, but the difference itself can still exceed i64
    let duration = req.end.checked_sub(req.start).ok_or_else(|| {
        AppError::InvalidRequest("session interval out of range".into()).log("save session")
    })?;

    let session = Session {
        id: state.ids.generate(),
        owner: claims.sub.clone(),
        title: req.title.unwrap_or_default(),
        description: req.description.unwrap_or_default(),
        start: req.start,
        end: req.end,
        duration,
        created_at: Utc::now().timestamp(),
    };

    let session = state
        .store
        .create_session(session)
        .await
        .map_err(|e| match e {
            StoreError::DuplicateKey => {
                AppError::DuplicateKey("session id collision on create".into()).log("save session")
            }
            other => AppError::Database(other.to_string()).log("save session"),
        })?;

    Ok(Json(session.into()))
}

pub async fn get_session(
    Extension(identity): Extension<Identity>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let claims = identity.require().map_err(|e| e.log("get session"))?;

    let session = state
        .store
        .get_session(&id, &claims.sub)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => {
                AppError::NotFound(format!("session {id} not found for requesting owner"))
                    .log("get session")
            }
            other => AppError::Database(other.to_string()).log("get session"),
        })?;

    Ok(Json(session.into()))
}

pub async fn list_sessions(
    Extension(identity): Extension<Identity>,
    State(state): State<AppState>,
    Query(query): Query<ListSessionsQuery>,
) -> Result<Json<Vec<SessionResponse>>, AppError> {
    let claims = identity.require().map_err(|e| e.log("list sessions"))?;

    let sessions = state
        .store
        .get_sessions(&claims.sub, query.filter)
        .await
        .map_err(|e| AppError::Database(e.to_string()).log("list sessions"))?;

    Ok(Json(sessions.into_iter().map(Into::into).collect()))
}

pub async fn update_session(
    Extension(identity): Extension<Identity>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<SessionPatch>,
) -> Result<Json<MutationResponse>, AppError> {
    let claims = identity.require().map_err(|e| e.log("update session"))?;

    // existence and ownership are verified first; the mutating call itself is
    // keyed by id only, leaving a narrow accepted check-then-act window
    state
        .store
        .get_session(&id, &claims.sub)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => {
                AppError::NotFound(format!("session {id} not found for requesting owner"))
                    .log("update session")
            }
            other => AppError::Database(other.to_string()).log("update session"),
        })?;

    state
        .store
        .update_session(&id, patch)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => {
                AppError::NotFound(format!("session {id} vanished before update")).log("update session")
            }
            other => AppError::Database(other.to_string()).log("update session"),
        })?;

    Ok(Json(MutationResponse {
        success: true,
        message: "Successfully updated session".into(),
        id: Some(id),
    }))
}

pub async fn delete_session(
    Extension(identity): Extension<Identity>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MutationResponse>, AppError> {
    let claims = identity.require().map_err(|e| e.log("delete session"))?;

    state
        .store
        .get_session(&id, &claims.sub)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => {
                AppError::NotFound(format!("session {id} not found for requesting owner"))
                    .log("delete session")
            }
            other => AppError::Database(other.to_string()).log("delete session"),
        })?;

    state
        .store
        .delete_session(&id)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => {
                AppError::NotFound(format!("session {id} vanished before delete")).log("delete session")
            }
            other => AppError::Database(other.to_string()).log("delete session"),
        })?;

    Ok(Json(MutationResponse {
        success: true,
        message: "Successfully deleted session".into(),
        id: Some(id),
    }))
}
