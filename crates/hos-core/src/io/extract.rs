//! Archive extraction module
//!
//! SDK bundles are published as zip archives; tar.gz is kept for the
//! occasional mirror that repackages them. Format is detected from the
//! filename, entries are sanitized against path traversal, and unix mode
//! bits are restored from archive metadata.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;
use zip::ZipArchive;

/// Failure while extracting an archive.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Local filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The filename does not carry a recognized archive extension.
    #[error("Unsupported archive format: {0}")]
    UnsupportedFormat(String),

    /// Malformed archive contents (bad entry, traversal attempt).
    #[error("Archive error: {0}")]
    Archive(String),
}

/// Archive format of a downloaded bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// Zip archive (`.zip`) -- the publishing convention's format.
    Zip,
    /// Gzip-compressed tar archive (`.tar.gz`, `.tgz`).
    TarGz,
    /// Anything else; extraction refuses it.
    Unknown,
}

/// Detect archive format from a file name or URL.
pub fn detect_format(path: &Path) -> ArchiveFormat {
    let name = path.to_string_lossy().to_lowercase();
    if name.ends_with(".zip") {
        ArchiveFormat::Zip
    } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        ArchiveFormat::TarGz
    } else {
        ArchiveFormat::Unknown
    }
}

/// Extract an archive into `dest_dir`, auto-detecting the format.
///
/// # Errors
///
/// [`ExtractError::UnsupportedFormat`] when the extension is not
/// recognized; otherwise the underlying archive/IO failure.
pub fn extract_auto(archive_path: &Path, dest_dir: &Path) -> Result<(), ExtractError> {
    match detect_format(archive_path) {
        ArchiveFormat::Zip => extract_zip(archive_path, dest_dir),
        ArchiveFormat::TarGz => extract_tar_gz(archive_path, dest_dir),
        ArchiveFormat::Unknown => Err(ExtractError::UnsupportedFormat(
            archive_path.to_string_lossy().to_string(),
        )),
    }
}

/// Extract a zip archive into `dest_dir`.
///
/// # Errors
///
/// Fails on malformed entries or filesystem errors; entries whose names
/// would escape `dest_dir` are skipped via `enclosed_name`.
pub fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<(), ExtractError> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| ExtractError::Archive(e.to_string()))?;

    fs::create_dir_all(dest_dir)?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| ExtractError::Archive(e.to_string()))?;
        let relative_path = match entry.enclosed_name() {
            Some(path) => path,
            None => continue,
        };

        let out_path = dest_dir.join(&relative_path);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out_file = File::create(&out_path)?;
        io::copy(&mut entry, &mut out_file)?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&out_path, fs::Permissions::from_mode(mode))?;
        }
    }

    Ok(())
}

/// Extract a tar.gz archive into `dest_dir`.
///
/// # Errors
///
/// Fails on malformed entries, traversal attempts, or filesystem errors.
pub fn extract_tar_gz(archive_path: &Path, dest_dir: &Path) -> Result<(), ExtractError> {
    let file = File::open(archive_path)?;
    let decoder = GzDecoder::new(BufReader::new(file));
    let mut archive = tar::Archive::new(decoder);

    fs::create_dir_all(dest_dir)?;

    for entry in archive.entries()? {
        let mut entry = entry?;
        let entry_path = entry
            .path()
            .map_err(|e| ExtractError::Archive(e.to_string()))?
            .into_owned();

        let out_path = dest_dir.join(&entry_path);
        if !out_path.starts_with(dest_dir) {
            return Err(ExtractError::Archive(format!(
                "Invalid path in archive: {}",
                entry_path.display()
            )));
        }

        // unpack() restores mode bits from the tar header.
        entry.unpack(&out_path)?;
    }

    Ok(())
}
