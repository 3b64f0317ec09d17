//! Release metadata and asset selection.
//!
//! The metadata API returns a release with a flat list of downloadable
//! assets. Asset names follow a fixed publishing convention that embeds a
//! platform token and a bundle role token, so selection is plain
//! case-sensitive substring containment -- no globbing, no version-range
//! matching. First match in list order wins.

use serde::Deserialize;

use crate::Platform;

/// A published SDK release as returned by the metadata API.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release tag (e.g. `5.0.3`). Informational only; asset names carry
    /// the tokens that drive selection.
    pub tag_name: String,
    /// Downloadable assets attached to this release. May be empty, which
    /// usually signals an upstream metadata or rate-limit problem.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// A single downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseAsset {
    /// Asset filename, as published.
    pub name: String,
    /// Direct download URL for the asset.
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

/// Logical SDK component distributed as one archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bundle {
    /// The base SDK (`command-line-tools`): toolchains, bundled node,
    /// package manager, OpenHarmony SDK tree.
    CommandLineTools,
    /// The ArkUI-X cross-platform extension SDK.
    ArkUiX,
}

impl Bundle {
    /// Role token embedded in published asset names for this bundle.
    pub fn role_token(&self) -> &'static str {
        match self {
            Self::CommandLineTools => "commandline-tools",
            Self::ArkUiX => "arkui-x",
        }
    }
}

impl std::fmt::Display for Bundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.role_token())
    }
}

/// Predicate that picks one asset out of a release's asset list.
///
/// Composed of the required substrings (platform token plus bundle role
/// token) an asset name must contain. One selector per bundle; each
/// locate call is independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetSelector {
    platform: Platform,
    bundle: Bundle,
}

impl AssetSelector {
    /// Build the selector for a bundle on a given platform.
    pub fn new(platform: Platform, bundle: Bundle) -> Self {
        Self { platform, bundle }
    }

    /// The platform this selector searches for.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// The bundle role this selector searches for.
    pub fn bundle(&self) -> Bundle {
        self.bundle
    }

    /// Whether an asset name satisfies every required substring.
    ///
    /// Matching is case-sensitive: the publishing convention guarantees
    /// the tokens verbatim when present.
    pub fn matches(&self, asset_name: &str) -> bool {
        asset_name.contains(self.platform.as_str()) && asset_name.contains(self.bundle.role_token())
    }
}

/// Failure to locate an asset in a release.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    /// The release carried no assets at all. Distinct from [`NotFound`]
    /// because an empty list usually means the metadata fetch itself was
    /// degraded (rate limiting) rather than a missing build.
    ///
    /// [`NotFound`]: LocateError::NotFound
    #[error("No assets found in the latest release (possible rate limit)")]
    NoAssets,
    /// Assets exist, but none matched the selector.
    #[error("No {bundle} asset found for platform {platform}")]
    NotFound {
        /// Bundle role that was searched for.
        bundle: Bundle,
        /// Platform key that was searched for.
        platform: Platform,
    },
}

/// Select the first asset whose name satisfies the selector.
///
/// Scans in list order; the first match wins, which makes selection
/// deterministic when a release carries several satisfying assets.
///
/// # Errors
///
/// [`LocateError::NoAssets`] when the list is empty,
/// [`LocateError::NotFound`] when nothing matches.
pub fn locate<'a>(
    assets: &'a [ReleaseAsset],
    selector: &AssetSelector,
) -> Result<&'a ReleaseAsset, LocateError> {
    if assets.is_empty() {
        return Err(LocateError::NoAssets);
    }

    assets
        .iter()
        .find(|a| selector.matches(&a.name))
        .ok_or(LocateError::NotFound {
            bundle: selector.bundle(),
            platform: selector.platform(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str) -> ReleaseAsset {
        ReleaseAsset {
            name: name.to_string(),
            download_url: format!("https://example.com/{name}"),
        }
    }

    #[test]
    fn test_empty_asset_list_is_a_distinct_failure() {
        let selector = AssetSelector::new(Platform::Mac, Bundle::CommandLineTools);
        assert_eq!(locate(&[], &selector), Err(LocateError::NoAssets));

        // Regardless of which selector is used.
        let selector = AssetSelector::new(Platform::Linux, Bundle::ArkUiX);
        assert_eq!(locate(&[], &selector), Err(LocateError::NoAssets));
    }

    #[test]
    fn test_no_match_names_the_platform() {
        let assets = [asset("sdk-mac-commandline-tools.zip")];
        let selector = AssetSelector::new(Platform::Linux, Bundle::CommandLineTools);

        let err = locate(&assets, &selector).unwrap_err();
        assert_eq!(
            err,
            LocateError::NotFound {
                bundle: Bundle::CommandLineTools,
                platform: Platform::Linux,
            }
        );
        assert!(err.to_string().contains("linux"));
    }

    #[test]
    fn test_first_match_wins() {
        let assets = [
            asset("README.md"),
            asset("sdk-linux-commandline-tools-a.zip"),
            asset("sdk-linux-commandline-tools-b.zip"),
        ];
        let selector = AssetSelector::new(Platform::Linux, Bundle::CommandLineTools);

        let found = locate(&assets, &selector).unwrap();
        assert_eq!(found.name, "sdk-linux-commandline-tools-a.zip");
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let selector = AssetSelector::new(Platform::Mac, Bundle::CommandLineTools);
        assert!(selector.matches("sdk-mac-commandline-tools.zip"));
        assert!(!selector.matches("sdk-MAC-commandline-tools.zip"));
        assert!(!selector.matches("sdk-mac-Commandline-Tools.zip"));
    }

    #[test]
    fn test_bundles_select_independently() {
        let assets = [
            asset("arkui-x-mac-5.0.zip"),
            asset("sdk-mac-commandline-tools.zip"),
        ];

        let base = AssetSelector::new(Platform::Mac, Bundle::CommandLineTools);
        let ext = AssetSelector::new(Platform::Mac, Bundle::ArkUiX);

        assert_eq!(
            locate(&assets, &base).unwrap().name,
            "sdk-mac-commandline-tools.zip"
        );
        assert_eq!(locate(&assets, &ext).unwrap().name, "arkui-x-mac-5.0.zip");
    }

    #[test]
    fn test_release_deserializes_without_assets_field() {
        let release: Release = serde_json::from_str(r#"{"tag_name": "5.0.0"}"#).unwrap();
        assert!(release.assets.is_empty());
    }

    #[test]
    fn test_release_deserializes_from_api_shape() {
        let json = r#"{
            "tag_name": "5.0.3",
            "assets": [
                {"name": "sdk-mac-commandline-tools.zip",
                 "browser_download_url": "https://example.com/dl/mac.zip"}
            ]
        }"#;
        let release: Release = serde_json::from_str(json).unwrap();
        assert_eq!(release.tag_name, "5.0.3");
        assert_eq!(release.assets[0].download_url, "https://example.com/dl/mac.zip");
    }
}
