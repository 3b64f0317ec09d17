//! Layout normalization.
//!
//! After extraction the on-disk trees are close to, but not exactly, the
//! layout downstream tooling expects. This module closes the gap:
//!
//! 1. Verify the base bundle produced `<root>/command-line-tools`.
//! 2. Verify the extension bundle staged an `arkui-x` directory.
//! 3. Read the extension manifest for its API version.
//! 4. Move the staged extension under
//!    `arkui-x-sdk/<version>/arkui-x` (parents created if absent).
//! 5. Mirror `<home>/sdk` to `<root>/sdk` for GUI-style consumers
//!    (recursive, overwriting copy -- repeatable).
//! 6. Write license-acceptance markers if absent.
//! 7. Apply execute bits across the binary directories and drop the
//!    previewer placeholder.
//!
//! Directory creation is check-then-create and marker writes are
//! write-if-absent, so those steps tolerate a partial prior run. The
//! extension move is a bare rename: re-running after a fully completed
//! prior run fails when the version-qualified destination already
//! exists. Any missing precondition aborts the run with the offending
//! path in the error.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use hos_core::manifest::{ExtensionManifest, MANIFEST_FILE};
use hos_core::{Reporter, SdkLayout};

use crate::ops::ProvisionError;

/// Fixed content of the license-acceptance markers. The digest value is
/// what the IDE records on acceptance; tooling checks presence and
/// content match, nothing else.
pub const LICENSE_MARKER: &str = "c8f4a01e2e86b53e828500a6fd9bb6d2c52a9b4f4d5c9a21cf08bbfa8e865cd3\n";

/// Content of the previewer placeholder. GUI consumers only probe that
/// an executable exists at the fixed path.
const PREVIEWER_STUB: &str = "#!/bin/sh\nexit 0\n";

/// Normalize the extracted trees into the final layout.
///
/// `staged_extension` is where the fetch stage left the extension
/// bundle's `arkui-x` directory. Returns the extension API version that
/// now qualifies the extension paths.
///
/// # Errors
///
/// [`ProvisionError::ExpectedPathMissing`] when a tree extraction should
/// have produced is absent, [`ProvisionError::Manifest`] for manifest
/// problems, and `Io` for everything the filesystem throws.
pub fn normalize(
    layout: &SdkLayout,
    staged_extension: &Path,
    reporter: &Arc<dyn Reporter>,
) -> Result<String, ProvisionError> {
    // Base bundle must have produced the SDK home.
    let home = layout.home();
    if !home.is_dir() {
        return Err(ProvisionError::ExpectedPathMissing(home));
    }

    // Extension bundle must have staged its directory.
    if !staged_extension.is_dir() {
        return Err(ProvisionError::ExpectedPathMissing(
            staged_extension.to_path_buf(),
        ));
    }

    // The manifest names the version that qualifies the final location.
    let manifest = ExtensionManifest::from_file(&staged_extension.join(MANIFEST_FILE))?;
    let version = manifest.api_version;
    reporter.info(&format!("extension api version: {version}"));

    // Move the staged extension into place.
    let versioned = layout.arkui_versioned(&version);
    if let Some(parent) = versioned.parent() {
        ensure_dir(parent)?;
    }
    fs::rename(staged_extension, &versioned)?;
    reporter.done("arkui-x", "installed");

    // Mirror the OpenHarmony SDK tree next to the root for GUI-style
    // consumers that resolve `<root>/sdk`.
    let ohos = layout.ohos_sdk();
    if !ohos.is_dir() {
        return Err(ProvisionError::ExpectedPathMissing(ohos));
    }
    mirror_tree(&ohos, layout.root())?;
    reporter.done("sdk mirror", "copied");

    // License markers.
    write_marker(&layout.ohos_license_marker())?;
    write_marker(&layout.arkui_license_marker())?;

    // Execute bits. Bundles built on Windows hosts lose them, so every
    // regular file in the binary directories gets them back.
    for dir in [
        layout.bin(),
        layout.node_bin(),
        layout.ohpm_bin(),
        layout.arkui_toolchains_bin(&version),
    ] {
        mark_executable(&dir)?;
    }

    ensure_placeholder(&layout.previewer_stub())?;

    Ok(version)
}

/// Create a directory if it does not exist yet.
///
/// Check-then-create rather than unconditional create, so a tree left by
/// a partial prior run is reused as-is.
fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Recursively copy `src` into `dest_parent`, overwriting existing
/// files. Repeatable by construction.
fn mirror_tree(src: &Path, dest_parent: &Path) -> Result<(), ProvisionError> {
    let mut options = fs_extra::dir::CopyOptions::new();
    options.overwrite = true;
    fs_extra::dir::copy(src, dest_parent, &options)
        .map_err(|e| ProvisionError::Io(std::io::Error::other(e)))?;
    Ok(())
}

/// Write a license marker with the fixed accepted content, only if the
/// file does not exist yet.
fn write_marker(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    if !path.exists() {
        fs::write(path, LICENSE_MARKER)?;
    }
    Ok(())
}

/// Set `0o755` on every regular file in `dir`. Missing directories are
/// skipped: not every bundle variant ships every binary directory.
fn mark_executable(dir: &Path) -> std::io::Result<()> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "binary directory absent, skipping");
        return Ok(());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        for entry in walkdir::WalkDir::new(dir).into_iter().flatten() {
            if entry.file_type().is_file() {
                fs::set_permissions(entry.path(), fs::Permissions::from_mode(0o755))?;
            }
        }
    }

    Ok(())
}

/// Write the previewer placeholder if absent, and make it executable.
fn ensure_placeholder(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    if !path.exists() {
        fs::write(path, PREVIEWER_STUB)?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hos_core::NullReporter;
    use std::path::PathBuf;

    fn reporter() -> Arc<dyn Reporter> {
        Arc::new(NullReporter)
    }

    /// Build the tree both bundles would have extracted.
    fn seed_extracted_tree(root: &Path) -> (SdkLayout, PathBuf) {
        let layout = SdkLayout::new(root);

        for dir in [
            layout.bin(),
            layout.node_bin(),
            layout.ohpm_bin(),
            layout.ohos_toolchains(),
        ] {
            fs::create_dir_all(dir).unwrap();
        }
        fs::write(layout.bin().join("hvigorw"), "#!/bin/sh\n").unwrap();
        fs::write(layout.node_bin().join("node"), "bin").unwrap();
        fs::write(layout.ohpm_exe(), "#!/bin/sh\n").unwrap();
        fs::write(layout.ohos_toolchains().join("idl"), "bin").unwrap();

        let staged = root.join("staging").join("arkui-x");
        fs::create_dir_all(staged.join("toolchains").join("bin")).unwrap();
        fs::write(staged.join(MANIFEST_FILE), r#"{"apiVersion": "12"}"#).unwrap();
        fs::write(staged.join("toolchains").join("bin").join("ace"), "bin").unwrap();

        (layout, staged)
    }

    #[test]
    fn test_normalize_produces_expected_layout() {
        let dir = tempfile::tempdir().unwrap();
        let (layout, staged) = seed_extracted_tree(dir.path());

        let version = normalize(&layout, &staged, &reporter()).unwrap();
        assert_eq!(version, "12");

        // Staged tree moved under the version-qualified path.
        assert!(!staged.exists());
        assert!(layout.arkui_versioned("12").join(MANIFEST_FILE).is_file());
        assert!(layout.arkui_toolchains_bin("12").join("ace").is_file());

        // GUI mirror of the sdk tree.
        assert!(
            layout
                .sdk_mirror()
                .join("default/openharmony/toolchains/idl")
                .is_file()
        );

        // Markers and placeholder.
        assert_eq!(
            fs::read_to_string(layout.arkui_license_marker()).unwrap(),
            LICENSE_MARKER
        );
        assert_eq!(
            fs::read_to_string(layout.ohos_license_marker()).unwrap(),
            LICENSE_MARKER
        );
        assert!(layout.previewer_stub().is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_applies_execute_bits() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let (layout, staged) = seed_extracted_tree(dir.path());

        // Simulate a bundle that lost its mode bits.
        fs::set_permissions(layout.ohpm_exe(), fs::Permissions::from_mode(0o644)).unwrap();

        normalize(&layout, &staged, &reporter()).unwrap();

        for bin in [
            layout.bin().join("hvigorw"),
            layout.node_bin().join("node"),
            layout.ohpm_exe(),
            layout.arkui_toolchains_bin("12").join("ace"),
            layout.previewer_stub(),
        ] {
            let mode = fs::metadata(&bin).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111, "{} should be executable", bin.display());
        }
    }

    #[test]
    fn test_missing_home_is_named_in_the_error() {
        let dir = tempfile::tempdir().unwrap();
        let layout = SdkLayout::new(dir.path());
        let staged = dir.path().join("staging").join("arkui-x");

        let err = normalize(&layout, &staged, &reporter()).unwrap_err();
        match err {
            ProvisionError::ExpectedPathMissing(path) => assert_eq!(path, layout.home()),
            other => panic!("expected ExpectedPathMissing, got {other}"),
        }
    }

    #[test]
    fn test_missing_staged_extension_is_named_in_the_error() {
        let dir = tempfile::tempdir().unwrap();
        let (layout, staged) = seed_extracted_tree(dir.path());
        fs::remove_dir_all(&staged).unwrap();

        let err = normalize(&layout, &staged, &reporter()).unwrap_err();
        assert!(matches!(
            err,
            ProvisionError::ExpectedPathMissing(p) if p == staged
        ));
    }

    #[test]
    fn test_versionless_manifest_aborts_before_any_move() {
        let dir = tempfile::tempdir().unwrap();
        let (layout, staged) = seed_extracted_tree(dir.path());
        fs::write(staged.join(MANIFEST_FILE), r#"{"apiVersion": ""}"#).unwrap();

        let err = normalize(&layout, &staged, &reporter()).unwrap_err();
        assert!(matches!(err, ProvisionError::Manifest(_)));
        assert!(staged.exists(), "staged tree must be untouched");
        assert!(!layout.arkui_root().exists());
    }

    #[test]
    fn test_marker_write_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("licenses").join("LICENSE.sha256");

        write_marker(&marker).unwrap();
        let first = fs::read_to_string(&marker).unwrap();
        write_marker(&marker).unwrap();
        let second = fs::read_to_string(&marker).unwrap();

        assert_eq!(first, LICENSE_MARKER);
        assert_eq!(first, second);
    }

    #[test]
    fn test_marker_does_not_clobber_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("LICENSE.sha256");
        fs::write(&marker, "already accepted\n").unwrap();

        write_marker(&marker).unwrap();
        assert_eq!(fs::read_to_string(&marker).unwrap(), "already accepted\n");
    }

    #[test]
    fn test_mirror_copy_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let (layout, staged) = seed_extracted_tree(dir.path());
        normalize(&layout, &staged, &reporter()).unwrap();

        // A second mirror pass overwrites rather than failing.
        mirror_tree(&layout.ohos_sdk(), layout.root()).unwrap();
        assert!(
            layout
                .sdk_mirror()
                .join("default/openharmony/toolchains/idl")
                .is_file()
        );
    }
}
