//! HTTP API for the session service.
//!
//! Every request that touches a session first seeds its missing defaults, so
//! clients always see the full set of keys the WUI depends on.
//!
//! ## Endpoints
//!
//! ### Health & Info
//! - `GET /health` - Health check
//! - `GET /api/v1` - API information
//!
//! ### Sessions
//! - `GET /api/v1/sessions` - List all sessions
//! - `POST /api/v1/sessions` - Create a session seeded with defaults
//! - `GET /api/v1/sessions/{id}` - Get session values
//! - `PATCH /api/v1/sessions/{id}` - Overwrite session values
//! - `DELETE /api/v1/sessions/{id}` - End a session
//!
//! ## Example
//!
//! ```no_run
//! use dqsegdb_wui_session::api::{serve, AppState, ServerConfig};
//! use dqsegdb_wui_session::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> dqsegdb_wui_session::Result<()> {
//!     let config = Config::default();
//!     serve(ServerConfig::new("127.0.0.1", 8080), AppState::from_config(&config)).await
//! }
//! ```

pub mod handlers;
pub mod router;
pub mod types;

pub use handlers::AppState;
pub use router::{create_router, serve, ServerConfig};
pub use types::{
    CreateSessionResponse, ErrorResponse, ListSessionsResponse, SessionResponse, SessionSummary,
};
