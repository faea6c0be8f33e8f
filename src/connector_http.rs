//! HTTP feed adapter.
//!
//! Fetches a listing feed (see [`crate::feed`]) with a single `GET`. There
//! is no retry or pagination: a failed request makes this adapter
//! unavailable for the run.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::config::{parse_retailer, HttpConnectorConfig};
use crate::feed::{parse_feed, ParsedFeed};
use crate::models::RawListing;
use crate::traits::SourceAdapter;

pub struct HttpAdapter {
    name: String,
    config: HttpConnectorConfig,
}

impl HttpAdapter {
    pub fn new(name: String, config: HttpConnectorConfig) -> Self {
        Self { name, config }
    }
}

#[async_trait]
impl SourceAdapter for HttpAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Fetch a JSON listing feed over HTTP"
    }

    fn adapter_type(&self) -> &str {
        "http"
    }

    async fn scan(&self) -> Result<Vec<RawListing>> {
        Ok(fetch_feed(&self.config).await?.listings)
    }

    async fn scan_feed(&self) -> Result<ParsedFeed> {
        fetch_feed(&self.config).await
    }
}

/// `GET` the configured URL and parse the body as a feed.
///
/// # Errors
///
/// Returns an error if the request fails or times out, the server answers
/// with a non-success status, or the body is not a feed.
pub async fn fetch_feed(http_config: &HttpConnectorConfig) -> Result<ParsedFeed> {
    let default_retailer = parse_retailer(http_config.retailer.as_deref())?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(http_config.timeout_secs))
        .build()?;

    let response = client
        .get(&http_config.url)
        .header("Accept", "application/json")
        .send()
        .await
        .with_context(|| format!("GET {} failed", http_config.url))?;

    let status = response.status();
    if !status.is_success() {
        bail!("GET {} returned {}", http_config.url, status);
    }

    let body = response
        .text()
        .await
        .with_context(|| format!("Failed to read body from {}", http_config.url))?;

    parse_feed(&body, default_retailer, &http_config.url)
}
