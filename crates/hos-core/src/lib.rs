//! Core library for the HarmonyOS SDK provisioning pipeline.
//!
//! Everything with a side effect lives here: release metadata fetch,
//! asset download, archive extraction. The crate also owns the two pieces
//! of derived state the pipeline threads between stages: the on-disk
//! [`layout::SdkLayout`] and the accumulated [`provision::ProvisioningState`].
//!
//! The pipeline orchestration itself (stage ordering, normalization,
//! external tool configuration) belongs to the `hos-cli` crate.

pub mod github;
pub mod io;
pub mod layout;
pub mod manifest;
pub mod provision;
pub mod reporter;

pub use layout::SdkLayout;
pub use provision::ProvisioningState;
pub use reporter::{NullReporter, Reporter};

/// User Agent string for metadata and download requests
pub const USER_AGENT: &str = concat!("hos-setup/", env!("CARGO_PKG_VERSION"));
