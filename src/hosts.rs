//! Segment database hosts known to the WUI.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Detail record for one segment database host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    /// Host identifier.
    pub host_id: i64,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

impl HostRecord {
    pub fn new(host_id: i64, name: impl Into<String>) -> Self {
        Self {
            host_id,
            name: name.into(),
        }
    }
}

/// Lookup of hosts and host-derived defaults.
pub trait HostDirectory: Send + Sync {
    /// Identifier of the host used when the user has not chosen one.
    fn default_host_id(&self) -> Result<i64>;

    /// All records matching `host_id`. May be empty.
    fn host_details(&self, host_id: i64) -> Result<Vec<HostRecord>>;

    /// Default output format for query results.
    fn default_output_format(&self) -> Result<String>;
}

/// Host directory backed by a fixed list, typically loaded from configuration.
#[derive(Debug, Clone)]
pub struct StaticHostDirectory {
    default_host_id: i64,
    default_output_format: String,
    hosts: Vec<HostRecord>,
}

impl StaticHostDirectory {
    pub fn new(
        default_host_id: i64,
        default_output_format: impl Into<String>,
        hosts: Vec<HostRecord>,
    ) -> Self {
        Self {
            default_host_id,
            default_output_format: default_output_format.into(),
            hosts,
        }
    }

    pub fn hosts(&self) -> &[HostRecord] {
        &self.hosts
    }
}

impl HostDirectory for StaticHostDirectory {
    fn default_host_id(&self) -> Result<i64> {
        Ok(self.default_host_id)
    }

    fn host_details(&self, host_id: i64) -> Result<Vec<HostRecord>> {
        Ok(self
            .hosts
            .iter()
            .filter(|h| h.host_id == host_id)
            .cloned()
            .collect())
    }

    fn default_output_format(&self) -> Result<String> {
        Ok(self.default_output_format.clone())
    }
}
