//! Extension bundle manifest.
//!
//! The extension bundle ships an `arkui-x.json` at its top level carrying
//! the API version. The version string qualifies the bundle's final
//! location in the layout, so it must be present and non-empty before any
//! version-qualified path can be computed.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Name of the manifest file inside the extracted extension bundle.
pub const MANIFEST_FILE: &str = "arkui-x.json";

/// Manifest written by the extension bundle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtensionManifest {
    /// API version the bundle targets (e.g. `"12"`).
    #[serde(rename = "apiVersion")]
    pub api_version: String,
}

/// Failure to read or validate the extension manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest file does not exist where the bundle should have
    /// written it.
    #[error("Extension manifest missing at {0}")]
    Missing(PathBuf),

    /// The file exists but is not valid manifest JSON.
    #[error("Invalid extension manifest {path}: {source}")]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The manifest parsed but carries an empty version string.
    #[error("Extension manifest {0} has an empty apiVersion")]
    EmptyVersion(PathBuf),

    /// Filesystem failure while reading the manifest.
    #[error("IO error reading manifest: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtensionManifest {
    /// Parse a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// [`ManifestError::Parse`] on malformed JSON,
    /// [`ManifestError::EmptyVersion`] when `apiVersion` is empty.
    /// `path` is carried for diagnostics only.
    pub fn from_json(json: &str, path: &Path) -> Result<Self, ManifestError> {
        let manifest: Self = serde_json::from_str(json).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if manifest.api_version.is_empty() {
            return Err(ManifestError::EmptyVersion(path.to_path_buf()));
        }

        Ok(manifest)
    }

    /// Load and validate the manifest from a file.
    ///
    /// # Errors
    ///
    /// [`ManifestError::Missing`] when the file does not exist, otherwise
    /// as [`from_json`](Self::from_json).
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::Missing(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json, path)
    }
}
