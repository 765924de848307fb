// file: src/client/fetcher.rs
// description: throttled HTTP fetch layer shared by all API clients
// reference: https://docs.rs/reqwest

use crate::config::ApiConfig;
use crate::error::{Result, ScanError};
use reqwest::Client;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Issues one outbound request at a time with a configurable minimum
/// delay between consecutive dispatches.
///
/// The delay is a politeness floor, not a scheduler: concurrent callers
/// simply queue on the internal slot. There are no retries; any failure
/// surfaces as `ScanError::Fetch` and the caller decides whether the
/// run continues (it normally does, with that request contributing no
/// data).
pub struct RateLimitedFetcher {
    client: Client,
    min_delay: Duration,
    slot: Mutex<Option<Instant>>,
}

impl RateLimitedFetcher {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScanError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            min_delay: Duration::from_millis(config.request_delay_ms),
            slot: Mutex::new(None),
        })
    }

    /// GET returning the response body parsed as JSON.
    pub async fn get_json(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<serde_json::Value> {
        let body = self.get(url, params).await?;
        serde_json::from_str(&body).map_err(|e| ScanError::Parse {
            context: url.to_string(),
            message: format!("invalid JSON body: {}", e),
        })
    }

    /// GET returning the raw response body (HTML pages).
    pub async fn get_text(&self, url: &str) -> Result<String> {
        self.get(url, &[]).await
    }

    async fn get(&self, url: &str, params: &[(String, String)]) -> Result<String> {
        let mut slot = self.slot.lock().await;

        if let Some(last) = *slot {
            let elapsed = last.elapsed();
            if elapsed < self.min_delay {
                sleep(self.min_delay - elapsed).await;
            }
        }
        *slot = Some(Instant::now());

        debug!("GET {} ({} params)", url, params.len());

        let mut request = self.client.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await.map_err(|e| ScanError::Fetch {
            request: url.to_string(),
            status: None,
            reason: classify_request_error(&e),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::Fetch {
                request: url.to_string(),
                status: Some(status.as_u16()),
                reason: format!("HTTP {}", status),
            });
        }

        response.text().await.map_err(|e| ScanError::Fetch {
            request: url.to_string(),
            status: Some(status.as_u16()),
            reason: format!("failed to read body: {}", e),
        })
    }
}

fn classify_request_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    }
}
