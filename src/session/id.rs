//! Session identifier type.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::WuiError;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of one user's browsing session.
///
/// Allocated from a process-wide counter and displayed as `wui-XXXXXXXX`.
/// Parsing accepts either that form or the bare decimal value used in
/// request paths.
///
/// # Security
///
/// Identifiers are sequential and therefore guessable. Holding one is not
/// proof of ownership, so the HTTP API must only be reachable through a
/// trusted front end that maps its own authenticated session cookie to a
/// `SessionId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Allocate the next unused identifier.
    pub fn allocate() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Wrap a raw value without allocating it.
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wui-{:08x}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = WuiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s.strip_prefix("wui-") {
            Some(hex) => u64::from_str_radix(hex, 16).ok(),
            None => s.parse::<u64>().ok(),
        };
        parsed
            .map(SessionId)
            .ok_or_else(|| WuiError::SessionNotFound(s.into()))
    }
}

impl Serialize for SessionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SessionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
