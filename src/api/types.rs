//! API request and response types.

use std::time::Instant;

use axum::http::StatusCode;
use serde::Serialize;

use crate::error::WuiError;
use crate::session::{Session, SessionData, SessionKey};

/// Response for session creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionResponse {
    /// The assigned session ID.
    pub session_id: u64,
    /// Human-readable session ID string.
    pub session_id_str: String,
    /// Keys that were seeded with defaults.
    pub populated: Vec<String>,
    /// Session values after seeding.
    pub values: SessionData,
}

impl CreateSessionResponse {
    pub fn new(session: &Session, populated: &[SessionKey]) -> Self {
        Self {
            session_id: session.id.as_u64(),
            session_id_str: session.id.to_string(),
            populated: populated.iter().map(|k| k.as_str().to_string()).collect(),
            values: session.data.clone(),
        }
    }
}

/// Response carrying a session's current values.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: u64,
    pub session_id_str: String,
    pub values: SessionData,
    /// Idle duration in seconds before this request.
    pub idle_seconds: f64,
}

impl SessionResponse {
    pub fn from_session(session: &Session) -> Self {
        Self {
            session_id: session.id.as_u64(),
            session_id_str: session.id.to_string(),
            values: session.data.clone(),
            idle_seconds: session.idle_duration().as_secs_f64(),
        }
    }
}

/// List sessions response.
#[derive(Debug, Clone, Serialize)]
pub struct ListSessionsResponse {
    /// Total number of sessions.
    pub count: usize,
    /// Session summaries.
    pub sessions: Vec<SessionSummary>,
}

/// Brief session summary for listing.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: u64,
    pub key_count: usize,
    /// Seconds since the session was created.
    pub age_seconds: f64,
    pub idle_seconds: f64,
}

impl SessionSummary {
    pub fn from_session(session: &Session) -> Self {
        let now = Instant::now();
        Self {
            session_id: session.id.as_u64(),
            key_count: session.data.len(),
            age_seconds: now.duration_since(session.created_at).as_secs_f64(),
            idle_seconds: now.duration_since(session.last_activity).as_secs_f64(),
        }
    }
}

/// Generic API error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "SESSION_NOT_FOUND").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn session_not_found(id: &str) -> Self {
        Self::new("SESSION_NOT_FOUND", format!("Session '{}' not found", id))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    /// Map a library error to a status code and response body.
    pub fn from_error(err: &WuiError) -> (StatusCode, Self) {
        match err {
            WuiError::SessionNotFound(id) => (StatusCode::NOT_FOUND, Self::session_not_found(id)),
            WuiError::MissingDefaultHost { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Self::new("MISSING_DEFAULT_HOST", err.to_string()),
            ),
            WuiError::ConfigurationUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Self::new("CONFIGURATION_UNAVAILABLE", err.to_string()),
            ),
            WuiError::InvalidUpdate(_) => (StatusCode::BAD_REQUEST, Self::bad_request(err.to_string())),
            WuiError::LockPoisoned | WuiError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Self::internal_error(err.to_string()),
            ),
        }
    }
}
