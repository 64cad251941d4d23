//! # dqsegdb-wui-session
//!
//! Session default seeding for the DQSEGDB web user interface.
//!
//! Every WUI page expects ten session keys (host, interferometer selection,
//! GPS range, output format and flag filter options) to be present. This
//! crate owns that guarantee: [`ensure_defaults`] fills in whichever keys are
//! absent from a configuration provider and a host directory, never
//! overwrites a present key, and reports a typed error instead of seeding an
//! undefined host.
//!
//! ## Quick Start
//!
//! ```
//! use dqsegdb_wui_session::config::Config;
//! use dqsegdb_wui_session::{ensure_defaults, SessionData, SessionKey};
//!
//! let config = Config::default();
//! let hosts = config.hosts.to_directory();
//!
//! let mut session = SessionData::new();
//! session.insert(SessionKey::GpsStart, "1000000000");
//! ensure_defaults(&mut session, &config.defaults, &hosts).unwrap();
//!
//! assert!(session.missing_keys().is_empty());
//! assert_eq!(session.get(SessionKey::GpsStart).unwrap(), "1000000000");
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod hosts;
pub mod logging;
pub mod session;

// Re-export commonly used types
pub use error::{Result, WuiError};
pub use hosts::{HostDirectory, HostRecord, StaticHostDirectory};
pub use session::{
    ensure_defaults, ConfigurationProvider, Session, SessionData, SessionId, SessionInitializer,
    SessionKey, SessionStore,
};
