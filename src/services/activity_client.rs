//! Analytics API client for per-day commit activity
//!
//! One-shot blocking fetch: no retry, any failure is reported as a single
//! [`CommitmapError::Fetch`].

use std::time::Duration;

use super::config::Config;
use crate::types::{ActivityMap, CommitmapError, Ingested, Result};

/// Client for the year-activity endpoint
pub struct ActivityClient {
    client: reqwest::blocking::Client,
    url: String,
}

impl ActivityClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("commitmap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CommitmapError::Fetch(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            client,
            url: config.activity_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the activity map for the author `email`
    pub fn fetch(&self, email: &str) -> Result<Ingested> {
        tracing::info!(url = %self.url, email, "fetching year activity");

        let response = self
            .client
            .get(&self.url)
            .query(&[("email", email)])
            .send()
            .map_err(|e| CommitmapError::Fetch(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CommitmapError::Fetch(format!(
                "server responded with {}",
                status
            )));
        }

        let body = response
            .text()
            .map_err(|e| CommitmapError::Fetch(format!("failed to read response: {}", e)))?;

        let ingested = ActivityMap::from_json_str(&body)
            .map_err(|e| CommitmapError::Fetch(format!("unexpected response body: {}", e)))?;

        tracing::info!(
            days = ingested.map.len(),
            rejected = ingested.rejected,
            "year activity received"
        );
        Ok(ingested)
    }
}
