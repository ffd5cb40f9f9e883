//! HTTP client for the published spreadsheet CSV export.

use std::time::Duration;

use reqwest::{header, Client};
use tracing::debug;

use super::FeedError;

/// HTTP request timeout in seconds.
/// 10s bounds a hung fetch while leaving room for a slow export.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client for the public CSV export of the program sheet.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct FeedClient {
    client: Client,
    url: String,
}

impl FeedClient {
    pub fn new(url: String) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, url })
    }

    /// Fetch the raw CSV body. One GET, no retries; the caller decides
    /// whether to fall back to cached data.
    pub async fn fetch_csv(&self) -> Result<String, FeedError> {
        debug!(url = %self.url, "fetching program feed");

        let response = self
            .client
            .get(&self.url)
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "program feed received");
        Ok(body)
    }
}
