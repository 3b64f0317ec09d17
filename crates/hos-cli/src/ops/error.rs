//! Domain-specific errors for provisioning operations

use std::path::PathBuf;

use hos_core::github::MetadataError;
use hos_core::io::download::DownloadError;
use hos_core::io::extract::ExtractError;
use hos_core::manifest::ManifestError;
use hos_schema::{LocateError, PlatformError};
use thiserror::Error;

/// Every way a provisioning run can fail.
///
/// One kind per stage failure; the first error aborts the pipeline and
/// is reported once. Unexpected filesystem faults funnel into `Io`.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// The raw platform identifier is not a provisioning target.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// No usable asset in the release (empty list or no token match).
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// The release metadata fetch failed.
    #[error("Failed to fetch release metadata: {0}")]
    Metadata(#[from] MetadataError),

    /// An asset download failed.
    #[error("Download failed: {0}")]
    Download(#[from] DownloadError),

    /// Archive extraction failed.
    #[error("Extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// A directory extraction should have produced does not exist.
    #[error("Expected path missing after extraction: {0}")]
    ExpectedPathMissing(PathBuf),

    /// The extension manifest is missing, malformed, or versionless.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// An external configuration command exited non-zero.
    #[error("`{command}` exited with {status}")]
    NonZeroExit {
        /// The command line that was run.
        command: String,
        /// Its exit status.
        status: std::process::ExitStatus,
    },

    /// An external configuration command is not available to run.
    #[error("Required tool not found: {0}")]
    ToolMissing(String),

    /// Unexpected filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
