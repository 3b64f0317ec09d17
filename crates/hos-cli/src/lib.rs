//! hos-setup - HarmonyOS SDK provisioning CLI
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Provisions the HarmonyOS command-line SDK and the ArkUI-X extension
//! SDK on a CI runner, then configures the surrounding toolchain.
//!
//! # Pipeline
//!
//! The `setup` command runs a strictly sequential, fail-fast pipeline:
//!
//! 1. **Resolve** the host platform to an SDK platform key.
//! 2. **Locate** the release assets for both bundles by name tokens.
//! 3. **Fetch** and extract each bundle.
//! 4. **Normalize** the extracted trees into the layout downstream
//!    tooling expects.
//! 5. **Configure** environment variables, PATH entries, and the
//!    `sdk-path` output.
//! 6. **Invoke** the external tool configuration commands.
//!
//! The first failure aborts the run; no partial-state cleanup is
//! attempted. Filesystem state is left exactly as the failing stage
//! found it.
//!
//! # Architecture
//!
//! - **Typestate Pattern**: the pipeline uses `SetupRequest` ->
//!   `ResolvedTarget` -> `LocatedBundles` -> `ExtractedBundles` ->
//!   `NormalizedSdk` -> `ProvisionedSdk` to enforce stage ordering at
//!   compile time.
//! - **Explicit state**: stages record exports into a
//!   `ProvisioningState` instead of mutating the process environment;
//!   a thin adapter applies it at the runner boundary.

pub mod cmd;
pub mod ops;
pub mod ui;

// Re-exports from other crates for convenience
pub use hos_core::io::download as downloader;
pub use hos_core::io::extract as extractor;
pub use hos_core::{ProvisioningState, SdkLayout};
pub use hos_schema::{Bundle, Platform};

pub use crate::ops::ProvisionError;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "hos-setup")]
#[command(author, version, about = "hos-setup - HarmonyOS SDK provisioning for CI runners")]
pub struct Cli {
    /// Resolve and locate only; print the plan without touching the filesystem
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Provision the SDK for this runner
    Setup(SetupArgs),
    /// Print the derived SDK layout without touching the network
    Layout {
        /// SDK root directory (defaults to ~/harmonyos-sdk)
        #[arg(long, env = "HOS_SDK_ROOT")]
        root: Option<PathBuf>,
        /// Extension SDK API version; includes version-qualified paths
        #[arg(long)]
        version: Option<String>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

/// Arguments for the `setup` command.
#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Repository that publishes the SDK release assets
    #[arg(long, env = "HOS_SDK_REPO", default_value = "jiwangyihao/hos-sdk")]
    pub repo: String,

    /// Raw platform identifier override (defaults to the host OS)
    #[arg(long)]
    pub platform: Option<String>,

    /// SDK root directory (defaults to ~/harmonyos-sdk)
    #[arg(long, env = "HOS_SDK_ROOT")]
    pub root: Option<PathBuf>,

    /// Base URL of the release metadata API
    #[arg(long, env = "HOS_API_BASE", hide = true,
          default_value = hos_core::github::GITHUB_API)]
    pub api_base: String,

    /// Skip the external tool configuration stage
    #[arg(long)]
    pub skip_tool_config: bool,
}
