//! Derived on-disk layout of a provisioned SDK.
//!
//! Every path downstream tooling cares about is a pure function of the
//! SDK root (and, for the extension SDK, the API version read from its
//! manifest). Two runs with the same inputs always agree on the layout.
//!
//! ```text
//! <root>/
//! ├── command-line-tools/          # SDK home
//! │   ├── bin/                     # hvigor, ohpm wrappers, codelinter
//! │   ├── tool/node/bin/           # bundled Node.js runtime
//! │   ├── ohpm/bin/                # OpenHarmony package manager
//! │   ├── sdk/default/             # OpenHarmony SDK tree
//! │   └── arkui-x-sdk/
//! │       ├── <version>/arkui-x/   # version-qualified extension SDK
//! │       └── licenses/            # license-acceptance markers
//! └── sdk/                         # GUI-consumer mirror of command-line-tools/sdk
//! ```

use std::path::{Path, PathBuf};

/// Returns the default SDK root, or None if the user's home cannot be resolved.
///
/// `HOS_SDK_ROOT` overrides the default of `~/harmonyos-sdk`.
pub fn try_default_root() -> Option<PathBuf> {
    if let Ok(val) = std::env::var("HOS_SDK_ROOT") {
        return Some(PathBuf::from(val));
    }
    dirs::home_dir().map(|h| h.join("harmonyos-sdk"))
}

/// Directory name of the SDK home inside the root; also the expected
/// top-level directory produced by extracting the base bundle.
pub const SDK_HOME_DIR: &str = "command-line-tools";

/// Directory name the extension bundle extracts to, and the name of the
/// version-qualified directory it is moved under.
pub const ARKUI_DIR: &str = "arkui-x";

/// All derived filesystem paths for one provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkLayout {
    root: PathBuf,
}

impl SdkLayout {
    /// Build the layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The SDK root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// SDK home: `<root>/command-line-tools`. This is the published
    /// `sdk-path` output and the value of `HOS_SDK_HOME`.
    pub fn home(&self) -> PathBuf {
        self.root.join(SDK_HOME_DIR)
    }

    /// Primary tool directory: `<home>/bin`.
    pub fn bin(&self) -> PathBuf {
        self.home().join("bin")
    }

    /// Bundled Node.js runtime: `<home>/tool/node`. Exported as `NODE_HOME`.
    pub fn node_home(&self) -> PathBuf {
        self.home().join("tool").join("node")
    }

    /// Bundled Node.js binaries: `<home>/tool/node/bin`.
    pub fn node_bin(&self) -> PathBuf {
        self.node_home().join("bin")
    }

    /// OpenHarmony package manager home: `<home>/ohpm`.
    pub fn ohpm_home(&self) -> PathBuf {
        self.home().join("ohpm")
    }

    /// OpenHarmony package manager binaries: `<home>/ohpm/bin`.
    pub fn ohpm_bin(&self) -> PathBuf {
        self.ohpm_home().join("bin")
    }

    /// The `ohpm` executable itself.
    pub fn ohpm_exe(&self) -> PathBuf {
        self.ohpm_bin().join("ohpm")
    }

    /// OpenHarmony SDK tree: `<home>/sdk`. Exported as `OHOS_SDK_HOME`.
    pub fn ohos_sdk(&self) -> PathBuf {
        self.home().join("sdk")
    }

    /// Default OpenHarmony API set: `<home>/sdk/default`.
    pub fn ohos_default(&self) -> PathBuf {
        self.ohos_sdk().join("default")
    }

    /// OpenHarmony toolchains: `<home>/sdk/default/openharmony/toolchains`.
    pub fn ohos_toolchains(&self) -> PathBuf {
        self.ohos_default().join("openharmony").join("toolchains")
    }

    /// License marker for the OpenHarmony SDK tree.
    pub fn ohos_license_marker(&self) -> PathBuf {
        self.ohos_sdk().join("licenses").join("LICENSE.sha256")
    }

    /// Extension SDK root: `<home>/arkui-x-sdk`. Exported as `ARKUI_X_HOME`.
    pub fn arkui_root(&self) -> PathBuf {
        self.home().join(format!("{ARKUI_DIR}-sdk"))
    }

    /// Version-qualified extension SDK: `<home>/arkui-x-sdk/<version>/arkui-x`.
    pub fn arkui_versioned(&self, version: &str) -> PathBuf {
        self.arkui_root().join(version).join(ARKUI_DIR)
    }

    /// Extension toolchain binaries for a version.
    pub fn arkui_toolchains_bin(&self, version: &str) -> PathBuf {
        self.arkui_versioned(version).join("toolchains").join("bin")
    }

    /// License marker directory for the extension SDK.
    pub fn arkui_licenses(&self) -> PathBuf {
        self.arkui_root().join("licenses")
    }

    /// License marker for the extension SDK.
    pub fn arkui_license_marker(&self) -> PathBuf {
        self.arkui_licenses().join("LICENSE.sha256")
    }

    /// GUI-consumer compatibility mirror of the OpenHarmony SDK tree:
    /// `<root>/sdk`. DevEco-style consumers resolve the SDK relative to
    /// the root rather than the command-line home.
    pub fn sdk_mirror(&self) -> PathBuf {
        self.root.join("sdk")
    }

    /// Fixed compatibility path of the previewer placeholder executable.
    /// GUI consumers probe for it; CI bundles do not ship it.
    pub fn previewer_stub(&self) -> PathBuf {
        self.sdk_mirror()
            .join("default")
            .join("openharmony")
            .join("previewer")
            .join("common")
            .join("bin")
            .join("previewer")
    }

    /// Scratch directory for downloads and staging extraction, kept under
    /// the root so renames into the final layout never cross volumes.
    pub fn scratch(&self) -> PathBuf {
        self.root.join("tmp")
    }
}
