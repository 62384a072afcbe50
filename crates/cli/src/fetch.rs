use anyhow::{Context, Result};
use catalog_search::ListingResponse;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// GET a listing response from `url`.
pub async fn fetch_listing(url: &str) -> Result<ListingResponse> {
    log::info!("Fetching listing from {url}");
    let client = Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Request failed: GET {url}"))?
        .error_for_status()
        .with_context(|| format!("Request failed: GET {url}"))?;

    let body = response
        .bytes()
        .await
        .with_context(|| format!("Failed while reading HTTP body from {url}"))?;
    serde_json::from_slice(&body).with_context(|| format!("Invalid listing JSON from {url}"))
}

/// Read a listing response saved on disk.
pub fn read_listing(path: &Path) -> Result<ListingResponse> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("Invalid listing JSON in {}", path.display()))
}
