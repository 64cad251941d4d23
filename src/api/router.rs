//! API router configuration.

use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    api_info, create_session, delete_session, get_session, health, list_sessions,
    update_session, AppState,
};
use crate::error::WuiError;

/// Create the API router with the given state.
pub fn create_router(state: AppState) -> Router {
    let session_routes = Router::new()
        .route("/", get(list_sessions).post(create_session))
        .route(
            "/{id}",
            get(get_session).patch(update_session).delete(delete_session),
        );

    let api_v1 = Router::new()
        .route("/", get(api_info))
        .nest("/sessions", session_routes);

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_v1)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Idle sessions older than this are expired. Zero disables expiry.
    pub session_idle_secs: u64,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            session_idle_secs: 0,
        }
    }

    pub fn with_session_idle_secs(mut self, secs: u64) -> Self {
        self.session_idle_secs = secs;
        self
    }

    pub fn bind_address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    fn session_idle(&self) -> Option<Duration> {
        (self.session_idle_secs > 0).then(|| Duration::from_secs(self.session_idle_secs))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", 8080)
    }
}

/// Start the API server.
///
/// When idle expiry is enabled, a background task sweeps the session store
/// at a quarter of the idle limit.
pub async fn serve(config: ServerConfig, state: AppState) -> crate::Result<()> {
    let addr = config.bind_address();

    if let Some(max_idle) = config.session_idle() {
        let store = state.store.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(max_idle / 4);
            loop {
                interval.tick().await;
                if let Err(e) = store.expire_idle(max_idle) {
                    tracing::warn!(error = %e, "session expiry sweep failed");
                }
            }
        });
    }

    let router = create_router(state);

    tracing::info!("Starting dqsegdb-wui-session API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(WuiError::Io)?;

    axum::serve(listener, router)
        .await
        .map_err(|e| WuiError::Io(std::io::Error::other(e.to_string())))?;

    Ok(())
}
