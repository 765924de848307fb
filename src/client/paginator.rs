// file: src/client/paginator.rs
// description: continuation-token pagination over the throttled fetcher
// reference: https://www.mediawiki.org/wiki/API:Continue

use crate::client::RateLimitedFetcher;
use serde_json::Value;
use tracing::warn;

/// Lazily walks a paginated MediaWiki-style endpoint.
///
/// Each `next_batch` call performs exactly one fetch. The opaque
/// `continue` parameter map from one response is threaded into the next
/// request. Termination is normal (never an error) on: a response with
/// no continuation, a fetch failure (logged, the run keeps whatever was
/// already yielded), or the batch ceiling.
pub struct Paginator<'a> {
    fetcher: &'a RateLimitedFetcher,
    endpoint: String,
    base_params: Vec<(String, String)>,
    continuation: Option<Vec<(String, String)>>,
    batches_fetched: usize,
    max_batches: usize,
    done: bool,
}

impl<'a> Paginator<'a> {
    pub fn new(
        fetcher: &'a RateLimitedFetcher,
        endpoint: impl Into<String>,
        base_params: Vec<(String, String)>,
        max_batches: usize,
    ) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
            base_params,
            continuation: None,
            batches_fetched: 0,
            max_batches,
            done: false,
        }
    }

    pub async fn next_batch(&mut self) -> Option<Value> {
        if self.done || self.batches_fetched >= self.max_batches {
            return None;
        }

        let mut params = self.base_params.clone();
        if let Some(continuation) = &self.continuation {
            params.extend(continuation.iter().cloned());
        }

        self.batches_fetched += 1;

        let value = match self.fetcher.get_json(&self.endpoint, &params).await {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    "Batch {} fetch failed, stopping pagination: {}",
                    self.batches_fetched, e
                );
                self.done = true;
                return None;
            }
        };

        match value.get("continue").and_then(Value::as_object) {
            Some(map) => {
                self.continuation = Some(
                    map.iter()
                        .map(|(key, val)| (key.clone(), param_value(val)))
                        .collect(),
                );
            }
            None => self.done = true,
        }

        Some(value)
    }

    pub fn batches_fetched(&self) -> usize {
        self.batches_fetched
    }
}

fn param_value(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}
