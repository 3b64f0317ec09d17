//! Asset download.
//!
//! Streams an asset to a local file with progress reporting. Trust is
//! placed entirely in the transport-level success status: there is no
//! retry and no checksum verification, matching the contract the
//! provisioning pipeline consumes.

use std::path::Path;

use futures::StreamExt;
use reqwest::Client;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::Reporter;

/// Failure while downloading an asset.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Transport failure or non-success HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local filesystem failure while writing the archive.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Download `url` into `dest`, streaming chunks as they arrive.
///
/// `label` names the bundle being fetched for progress reporting.
///
/// # Errors
///
/// Any HTTP non-success status or write failure aborts the download; a
/// partially written `dest` file is removed before returning.
pub async fn download<R: Reporter>(
    client: &Client,
    url: &str,
    dest: &Path,
    label: &str,
    reporter: &R,
) -> Result<(), DownloadError> {
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
        .send()
        .await?
        .error_for_status()?;

    let total_size = response.content_length();
    reporter.downloading(label, 0, total_size);

    let mut file = File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(c) => c,
            Err(e) => {
                drop(file);
                tokio::fs::remove_file(dest).await.ok();
                return Err(e.into());
            }
        };
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        reporter.downloading(label, downloaded, total_size);
    }

    file.flush().await?;
    Ok(())
}
