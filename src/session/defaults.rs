//! Default seeding for per-user sessions.
//!
//! Every page of the WUI assumes the ten keys in [`SessionKey::ALL`] exist.
//! [`SessionInitializer::ensure_defaults`] fills in whichever are absent and
//! leaves present ones alone, so it is safe to run on every request.

use serde_json::Value;
use tracing::{debug, warn};

use super::{SessionData, SessionKey};
use crate::error::WuiError;
use crate::hosts::HostDirectory;
use crate::Result;

/// Source of the statically configured session defaults.
pub trait ConfigurationProvider: Send + Sync {
    /// Whether flag history is included by default.
    fn include_history_default(&self) -> Result<bool>;

    /// Default flag combination option (e.g. `"AND"`).
    fn choose_flag_option_default(&self) -> Result<String>;
}

/// Seeds missing session keys from a configuration provider and host directory.
///
/// Construction does no work; collaborators are only consulted from
/// [`ensure_defaults`](Self::ensure_defaults), and only for absent keys.
pub struct SessionInitializer<'a> {
    config: &'a dyn ConfigurationProvider,
    hosts: &'a dyn HostDirectory,
}

impl<'a> SessionInitializer<'a> {
    pub fn new(config: &'a dyn ConfigurationProvider, hosts: &'a dyn HostDirectory) -> Self {
        Self { config, hosts }
    }

    /// Populate every absent key with its default.
    ///
    /// Returns the keys that were populated. All defaults are resolved before
    /// any is written, so on error the session is left exactly as it was.
    pub fn ensure_defaults(&self, session: &mut SessionData) -> Result<Vec<SessionKey>> {
        let missing = session.missing_keys();
        if missing.is_empty() {
            return Ok(missing);
        }

        let mut staged = Vec::with_capacity(missing.len());
        for key in &missing {
            staged.push((*key, self.default_for(*key)?));
        }

        for (key, value) in staged {
            debug!(key = %key, value = %value, "populating session default");
            session.insert(key, value);
        }

        Ok(missing)
    }

    fn default_for(&self, key: SessionKey) -> Result<Value> {
        let value = match key {
            SessionKey::HostId => Value::from(self.default_host_id()?),
            SessionKey::Ifo | SessionKey::FlagFilter => Value::Null,
            SessionKey::DeselectedIfo | SessionKey::DqFlagUris => Value::Array(Vec::new()),
            SessionKey::GpsStart | SessionKey::GpsStop => Value::String(String::new()),
            SessionKey::IncludeHistory => Value::Bool(self.config.include_history_default()?),
            SessionKey::OutputFormat => Value::String(self.hosts.default_output_format()?),
            SessionKey::ChooseFlagOption => {
                Value::String(self.config.choose_flag_option_default()?)
            }
        };
        Ok(value)
    }

    fn default_host_id(&self) -> Result<i64> {
        let host_id = self.hosts.default_host_id()?;
        let records = self.hosts.host_details(host_id)?;

        match records.first() {
            Some(record) => Ok(record.host_id),
            None => {
                warn!(host_id, "host directory has no record for the default host");
                Err(WuiError::MissingDefaultHost { host_id })
            }
        }
    }
}

/// Populate every absent session key with its default.
///
/// Shorthand for building a [`SessionInitializer`] and running it once.
pub fn ensure_defaults(
    session: &mut SessionData,
    config: &dyn ConfigurationProvider,
    hosts: &dyn HostDirectory,
) -> Result<()> {
    SessionInitializer::new(config, hosts)
        .ensure_defaults(session)
        .map(|_| ())
}
