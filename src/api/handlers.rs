//! REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use super::types::{
    CreateSessionResponse, ErrorResponse, ListSessionsResponse, SessionResponse, SessionSummary,
};
use crate::config::Config;
use crate::error::WuiError;
use crate::hosts::HostDirectory;
use crate::session::{ConfigurationProvider, SessionId, SessionInitializer, SessionStore};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(err: WuiError) -> ApiError {
    let (status, body) = ErrorResponse::from_error(&err);
    if status.is_server_error() {
        tracing::error!(error = %err, "session request failed");
    }
    (status, Json(body))
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
    pub defaults: Arc<dyn ConfigurationProvider>,
    pub hosts: Arc<dyn HostDirectory>,
}

impl AppState {
    pub fn new(defaults: Arc<dyn ConfigurationProvider>, hosts: Arc<dyn HostDirectory>) -> Self {
        Self {
            store: Arc::new(SessionStore::new()),
            defaults,
            hosts,
        }
    }

    /// Build state from the `defaults` and `hosts` configuration sections.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(config.defaults.clone()),
            Arc::new(config.hosts.to_directory()),
        )
    }

    pub fn initializer(&self) -> SessionInitializer<'_> {
        SessionInitializer::new(self.defaults.as_ref(), self.hosts.as_ref())
    }
}

fn parse_id(raw: &str) -> Result<SessionId, ApiError> {
    raw.parse().map_err(api_error)
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// API information endpoint.
pub async fn api_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "dqsegdb-wui-session",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// List all sessions.
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<ListSessionsResponse>, ApiError> {
    let ids = state.store.list_ids().map_err(api_error)?;

    let mut sessions = Vec::with_capacity(ids.len());
    for id in ids {
        // Removed between listing and lookup.
        let Some(session) = state.store.get(&id).map_err(api_error)? else {
            continue;
        };
        sessions.push(SessionSummary::from_session(&session));
    }

    Ok(Json(ListSessionsResponse {
        count: sessions.len(),
        sessions,
    }))
}

/// Create a new session seeded with defaults.
///
/// If seeding fails the session is discarded rather than left half-populated.
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), ApiError> {
    let id = state.store.create().map_err(api_error)?;

    let populated = match state.store.ensure_defaults(&id, &state.initializer()) {
        Ok(populated) => populated,
        Err(e) => {
            state.store.remove(&id).ok();
            return Err(api_error(e));
        }
    };

    let session = state
        .store
        .get(&id)
        .map_err(api_error)?
        .ok_or_else(|| api_error(WuiError::SessionNotFound(id.to_string())))?;

    tracing::info!(session = %id, "session created");

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse::new(&session, &populated)),
    ))
}

/// Get session values, seeding any that are missing.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let id = parse_id(&session_id)?;
    let initializer = state.initializer();

    let response = state
        .store
        .update(&id, |session| -> crate::Result<SessionResponse> {
            initializer.ensure_defaults(&mut session.data)?;
            let response = SessionResponse::from_session(session);
            session.touch();
            Ok(response)
        })
        .and_then(|result| result)
        .map_err(api_error)?;

    Ok(Json(response))
}

/// Overwrite session values with the given JSON object, then seed defaults.
///
/// Body rejections and unknown key names are reported as `BAD_REQUEST`.
pub async fn update_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let id = parse_id(&session_id)?;
    let Json(body) = body.map_err(|e| api_error(WuiError::InvalidUpdate(e.body_text())))?;
    let Value::Object(updates) = body else {
        return Err(api_error(WuiError::InvalidUpdate(
            "request body must be a JSON object".into(),
        )));
    };
    let initializer = state.initializer();

    let response = state
        .store
        .update(&id, |session| -> crate::Result<SessionResponse> {
            let mut data = session.data.clone();
            data.apply_updates(updates)?;
            initializer.ensure_defaults(&mut data)?;
            session.data = data;
            session.touch();
            Ok(SessionResponse::from_session(session))
        })
        .and_then(|result| result)
        .map_err(api_error)?;

    tracing::debug!(session = %id, "session updated");

    Ok(Json(response))
}

/// End a session.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&session_id)?;

    match state.store.remove(&id).map_err(api_error)? {
        Some(_) => {
            tracing::info!(session = %id, "session ended");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(api_error(WuiError::SessionNotFound(id.to_string()))),
    }
}
