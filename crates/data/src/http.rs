//! JSON over HTTP(S).

use deck_core::{DataKind, DataSet, Error, Result};

#[cfg(feature = "http")]
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Fetch a JSON payload from `url`. Non-success statuses are errors.
#[cfg(feature = "http")]
pub(crate) fn fetch_url(url: &str) -> Result<DataSet> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| Error::HttpError(format!("Failed to build HTTP client: {}", e)))?;

    let response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| Error::HttpError(format!("Request to {} failed: {}", url, e)))?;

    let status = response.status().as_u16();
    let payload: serde_json::Value = response
        .json()
        .map_err(|e| Error::HttpError(format!("Invalid JSON from {}: {}", url, e)))?;

    log::info!("Fetched API data from {} (status {})", url, status);

    let mut data = DataSet::from_json(url, DataKind::Api, payload);
    data.status_code = Some(status);
    Ok(data)
}

#[cfg(not(feature = "http"))]
pub(crate) fn fetch_url(url: &str) -> Result<DataSet> {
    Err(Error::UnsupportedSource(format!(
        "HTTP sources require the `http` feature: {}",
        url
    )))
}
