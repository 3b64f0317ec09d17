//! Release metadata source (GitHub releases API).
//!
//! Read-only: one GET per provisioning run, returning the latest release
//! with its asset list. No authentication is assumed; a rate-limited or
//! otherwise degraded response surfaces as a typed error rather than an
//! empty success.

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use hos_schema::Release;

/// Default base URL of the release metadata API.
pub const GITHUB_API: &str = "https://api.github.com";

/// Failure to fetch or decode release metadata.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// Transport-level failure (connect, TLS, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Metadata API error: {status} for {url}")]
    Status {
        /// HTTP status returned by the API.
        status: reqwest::StatusCode,
        /// The URL that was queried.
        url: String,
    },
}

/// Fetch the latest release of `repo` (an `owner/name` slug).
///
/// `api_base` is the API root, normally [`GITHUB_API`]; tests point it at
/// a local mock server.
///
/// # Errors
///
/// Returns [`MetadataError::Status`] for non-success HTTP statuses and
/// [`MetadataError::Http`] for transport or decode failures.
pub async fn fetch_latest_release(
    client: &Client,
    api_base: &str,
    repo: &str,
) -> Result<Release, MetadataError> {
    let url = format!("{api_base}/repos/{repo}/releases/latest");
    debug!(%url, "Fetching release metadata");

    let resp = client
        .get(&url)
        .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(MetadataError::Status {
            status: resp.status(),
            url,
        });
    }

    Ok(resp.json().await?)
}
