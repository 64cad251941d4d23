//! Session management module.
//!
//! This module provides the per-user session mapping, the recognized keys,
//! default seeding, and the in-memory session registry.

mod data;
mod defaults;
mod id;
mod key;
mod store;

pub use data::SessionData;
pub use defaults::{ensure_defaults, ConfigurationProvider, SessionInitializer};
pub use id::SessionId;
pub use key::SessionKey;
pub use store::{Session, SessionStore};
