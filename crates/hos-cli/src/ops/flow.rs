//! Provisioning Flow Typestate Pattern
//!
//! Models the provisioning pipeline as a series of explicit state
//! transitions:
//!
//! ```text
//! SetupRequest --[resolve()]--> ResolvedTarget --[locate()]--> LocatedBundles
//!   --[fetch()]--> ExtractedBundles --[normalize()]--> NormalizedSdk
//!   --[configure()]--> ProvisionedSdk
//! ```
//!
//! This enforces at compile time that stages run in order and that each
//! stage only starts once the previous one succeeded: you cannot fetch
//! an asset that was never located, or derive environment state from a
//! layout that was never normalized. The first failing transition aborts
//! the run; there is no rollback.

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use hos_core::layout::ARKUI_DIR;
use hos_core::{ProvisioningState, Reporter, SdkLayout, github, io};
use hos_schema::{AssetSelector, Bundle, Platform, ReleaseAsset, locate};

use crate::ops::{Context, ProvisionError, configure, normalize};

/// State 0: a provisioning run as requested, before any validation.
#[derive(Debug)]
pub struct SetupRequest {
    /// Raw platform identifier (host OS or `--platform` override).
    pub raw_platform: String,
    /// `owner/name` slug of the release repository.
    pub repo: String,
    /// Base URL of the release metadata API.
    pub api_base: String,
    /// Target layout.
    pub layout: SdkLayout,
}

/// State 1: the platform key is known to be supported.
///
/// # Transitions
///
/// - [`locate()`](Self::locate) -> [`LocatedBundles`]
#[derive(Debug)]
pub struct ResolvedTarget {
    /// Resolved SDK platform key.
    pub platform: Platform,
    /// `owner/name` slug of the release repository.
    pub repo: String,
    /// Base URL of the release metadata API.
    pub api_base: String,
    /// Target layout.
    pub layout: SdkLayout,
}

/// State 2: both bundle assets have been selected from the release.
///
/// # Transitions
///
/// - [`fetch()`](Self::fetch) -> [`ExtractedBundles`]
#[derive(Debug)]
pub struct LocatedBundles {
    /// Target layout.
    pub layout: SdkLayout,
    /// Tag of the release the assets came from.
    pub tag: String,
    /// Base SDK asset (`commandline-tools`).
    pub base: ReleaseAsset,
    /// Extension SDK asset (`arkui-x`).
    pub extension: ReleaseAsset,
}

/// State 3: both archives are downloaded and extracted.
///
/// The base bundle is extracted directly under the SDK root (its archive
/// carries the `command-line-tools` top-level directory); the extension
/// bundle is staged in scratch space until the normalizer can read its
/// manifest and compute the version-qualified destination.
#[derive(Debug)]
pub struct ExtractedBundles {
    /// Target layout.
    pub layout: SdkLayout,
    /// Where the extension bundle was staged.
    pub extension_staging: PathBuf,
    /// Scratch directory holding downloads and staging; removed on drop.
    scratch: TempDir,
}

/// State 4: the on-disk layout matches what downstream tooling expects.
#[derive(Debug)]
pub struct NormalizedSdk {
    /// Target layout.
    pub layout: SdkLayout,
    /// Extension API version read from the manifest.
    pub api_version: String,
}

/// State 5: environment state has been derived; ready for emission and
/// external tool configuration.
#[derive(Debug)]
pub struct ProvisionedSdk {
    /// Target layout.
    pub layout: SdkLayout,
    /// Extension API version read from the manifest.
    pub api_version: String,
    /// Everything the run exports to the surrounding job.
    pub state: ProvisioningState,
}

impl SetupRequest {
    /// Resolve the raw platform identifier against the mapping table.
    ///
    /// Pure; runs before any network call so unsupported runners fail
    /// immediately.
    pub fn resolve(self) -> Result<ResolvedTarget, ProvisionError> {
        let platform = Platform::from_raw(&self.raw_platform)?;
        Ok(ResolvedTarget {
            platform,
            repo: self.repo,
            api_base: self.api_base,
            layout: self.layout,
        })
    }
}

impl ResolvedTarget {
    /// Fetch release metadata and select one asset per bundle.
    ///
    /// Each bundle locates independently and may fail independently;
    /// either failure aborts the remainder of the pipeline.
    pub async fn locate(self, ctx: &Context) -> Result<LocatedBundles, ProvisionError> {
        ctx.reporter.section("Resolving release");

        let release =
            github::fetch_latest_release(&ctx.client, &self.api_base, &self.repo).await?;
        ctx.reporter
            .info(&format!("latest release: {}", release.tag_name));

        let base = locate(
            &release.assets,
            &AssetSelector::new(self.platform, Bundle::CommandLineTools),
        )?
        .clone();
        let extension = locate(
            &release.assets,
            &AssetSelector::new(self.platform, Bundle::ArkUiX),
        )?
        .clone();

        ctx.reporter.done("located", &base.name);
        ctx.reporter.done("located", &extension.name);

        Ok(LocatedBundles {
            layout: self.layout,
            tag: release.tag_name,
            base,
            extension,
        })
    }
}

impl LocatedBundles {
    /// Download both archives and extract them.
    ///
    /// Scratch space lives under the SDK root so the normalizer's renames
    /// never cross a volume boundary.
    pub async fn fetch(self, ctx: &Context) -> Result<ExtractedBundles, ProvisionError> {
        ctx.reporter.section("Fetching bundles");

        let scratch_root = self.layout.scratch();
        std::fs::create_dir_all(&scratch_root)?;
        let scratch = tempfile::Builder::new()
            .prefix("hos-")
            .tempdir_in(&scratch_root)?;

        // Base bundle: archive carries command-line-tools/ at its top
        // level, so it extracts straight under the root.
        let base_archive = scratch.path().join(&self.base.name);
        io::download::download(
            &ctx.client,
            &self.base.download_url,
            &base_archive,
            Bundle::CommandLineTools.role_token(),
            &ctx.reporter,
        )
        .await?;
        io::extract::extract_auto(&base_archive, self.layout.root())?;
        ctx.reporter
            .done(Bundle::CommandLineTools.role_token(), "extracted");

        // Extension bundle: staged until its manifest names the final
        // version-qualified destination.
        let extension_staging = scratch.path().join("extension");
        let extension_archive = scratch.path().join(&self.extension.name);
        io::download::download(
            &ctx.client,
            &self.extension.download_url,
            &extension_archive,
            Bundle::ArkUiX.role_token(),
            &ctx.reporter,
        )
        .await?;
        io::extract::extract_auto(&extension_archive, &extension_staging)?;
        ctx.reporter.done(Bundle::ArkUiX.role_token(), "extracted");

        Ok(ExtractedBundles {
            layout: self.layout,
            extension_staging,
            scratch,
        })
    }
}

impl ExtractedBundles {
    /// Restructure the extracted trees into the final layout.
    ///
    /// See [`normalize`](crate::ops::normalize) for the step sequence.
    /// Consumes the scratch directory; it is removed once normalization
    /// has moved the staged extension into place.
    pub fn normalize(self, reporter: &Arc<dyn Reporter>) -> Result<NormalizedSdk, ProvisionError> {
        reporter.section("Normalizing layout");

        let staged = self.extension_staging.join(ARKUI_DIR);
        let api_version = normalize::normalize(&self.layout, &staged, reporter)?;

        drop(self.scratch);
        Ok(NormalizedSdk {
            layout: self.layout,
            api_version,
        })
    }
}

impl NormalizedSdk {
    /// Derive the provisioning state from the normalized layout.
    ///
    /// Pure function of `(layout, api_version)`; see
    /// [`configure`](crate::ops::configure).
    pub fn configure(self) -> ProvisionedSdk {
        let state = configure::derive_state(&self.layout, &self.api_version);
        ProvisionedSdk {
            layout: self.layout,
            api_version: self.api_version,
            state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_rejects_unsupported_platform() {
        let request = SetupRequest {
            raw_platform: "windows".to_string(),
            repo: "acme/hos-sdk".to_string(),
            api_base: github::GITHUB_API.to_string(),
            layout: SdkLayout::new("/tmp/hos"),
        };

        let err = request.resolve().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported OS: windows");
    }

    #[test]
    fn test_resolve_maps_darwin_to_mac() {
        let request = SetupRequest {
            raw_platform: "darwin".to_string(),
            repo: "acme/hos-sdk".to_string(),
            api_base: github::GITHUB_API.to_string(),
            layout: SdkLayout::new("/tmp/hos"),
        };

        let resolved = request.resolve().unwrap();
        assert_eq!(resolved.platform, Platform::Mac);
    }
}
