//! Recognized session keys.

use std::fmt;
use std::str::FromStr;

/// One of the session keys the WUI relies on being present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SessionKey {
    /// Selected host; starts as the default host.
    HostId,
    /// Selected interferometer.
    Ifo,
    /// Interferometers the user has de-selected.
    DeselectedIfo,
    /// Chosen data-quality flag URIs, in selection order.
    DqFlagUris,
    /// Free-text flag name filter.
    FlagFilter,
    /// GPS start time of the query range.
    GpsStart,
    /// GPS stop time of the query range.
    GpsStop,
    /// Whether flag version history is included in results.
    IncludeHistory,
    /// Output format for query results.
    OutputFormat,
    /// How multiple chosen flags are combined.
    ChooseFlagOption,
}

impl SessionKey {
    /// Every recognized key, in the order defaults are applied.
    pub const ALL: [SessionKey; 10] = [
        SessionKey::HostId,
        SessionKey::Ifo,
        SessionKey::DeselectedIfo,
        SessionKey::DqFlagUris,
        SessionKey::FlagFilter,
        SessionKey::GpsStart,
        SessionKey::GpsStop,
        SessionKey::IncludeHistory,
        SessionKey::OutputFormat,
        SessionKey::ChooseFlagOption,
    ];

    /// The key's name in the session mapping.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::HostId => "host_id",
            SessionKey::Ifo => "ifo",
            SessionKey::DeselectedIfo => "deselected_ifo",
            SessionKey::DqFlagUris => "dq_flag_uris",
            SessionKey::FlagFilter => "flag_filter",
            SessionKey::GpsStart => "gps_start",
            SessionKey::GpsStop => "gps_stop",
            SessionKey::IncludeHistory => "include_history",
            SessionKey::OutputFormat => "output_format",
            SessionKey::ChooseFlagOption => "choose_flag_option",
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionKey {
    type Err = crate::error::WuiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SessionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| crate::error::WuiError::InvalidUpdate(format!("unknown key '{}'", s)))
    }
}
