//! HTTP transport for the feed workers.

use super::Fetch;
use crate::error::{redact_endpoint, FeedError};
use async_trait::async_trait;
use log::trace;
use std::time::Duration;

/// Per-request timeout, connect included
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `reqwest`-backed [`Fetch`]. Cheap to clone; clones share a pool.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("rgb-marquee/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, endpoint: &str) -> Result<String, FeedError> {
        trace!("GET {}", redact_endpoint(endpoint));
        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|e| FeedError::transport(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::transport(endpoint, format!("HTTP {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| FeedError::transport(endpoint, e))
    }
}
