//! Host platform resolution.
//!
//! SDK release assets are published per platform, with the platform key
//! embedded in the asset filename (`...-mac-...`, `...-linux-...`). A raw
//! OS identifier must resolve to exactly one key before any asset can be
//! located; identifiers outside the mapping table are rejected up front,
//! before any network call.

use serde::{Deserialize, Serialize};

/// Canonical platform key used by the SDK publishing convention.
///
/// # Example
///
/// ```
/// use hos_schema::Platform;
///
/// assert_eq!(Platform::from_raw("darwin"), Ok(Platform::Mac));
/// assert!(Platform::from_raw("windows").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// macOS runners (raw identifier `darwin` or `macos`).
    Mac,
    /// Linux runners.
    Linux,
}

/// Failure to map a raw OS identifier onto a supported platform key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    /// The raw identifier is not in the mapping table.
    #[error("Unsupported OS: {0}")]
    Unsupported(String),
}

impl Platform {
    /// Resolve a raw OS identifier to a platform key.
    ///
    /// The mapping is a fixed table; anything not listed fails with the
    /// offending identifier preserved for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Unsupported`] for identifiers outside the
    /// table (e.g. `windows`).
    pub fn from_raw(raw: &str) -> Result<Self, PlatformError> {
        match raw {
            "darwin" | "macos" => Ok(Self::Mac),
            "linux" => Ok(Self::Linux),
            other => Err(PlatformError::Unsupported(other.to_string())),
        }
    }

    /// Raw identifier of the host OS, as the runner reports it.
    ///
    /// Matches the identifiers used by Node-based runners (`darwin`,
    /// `linux`, `windows`), so the mapping table reads the same as the
    /// publishing convention expects.
    pub fn current_raw() -> &'static str {
        match std::env::consts::OS {
            "macos" => "darwin",
            other => other,
        }
    }

    /// Resolve the host OS to a platform key.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Unsupported`] when the host OS is not a
    /// supported provisioning target.
    pub fn current() -> Result<Self, PlatformError> {
        Self::from_raw(Self::current_raw())
    }

    /// Platform token as it appears in published asset names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mac => "mac",
            Self::Linux => "linux",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_raw(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_table() {
        assert_eq!(Platform::from_raw("darwin"), Ok(Platform::Mac));
        assert_eq!(Platform::from_raw("macos"), Ok(Platform::Mac));
        assert_eq!(Platform::from_raw("linux"), Ok(Platform::Linux));
    }

    #[test]
    fn test_unsupported_identifiers() {
        for raw in ["windows", "win32", "freebsd", "", "Darwin", "LINUX"] {
            let err = Platform::from_raw(raw).unwrap_err();
            assert_eq!(err, PlatformError::Unsupported(raw.to_string()));
        }
    }

    #[test]
    fn test_unsupported_message_names_raw_identifier() {
        let err = Platform::from_raw("windows").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported OS: windows");
    }

    #[test]
    fn test_asset_tokens() {
        assert_eq!(Platform::Mac.to_string(), "mac");
        assert_eq!(Platform::Linux.to_string(), "linux");
    }
}
