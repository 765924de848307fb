// file: src/client/projects.rs
// description: foundation project API client (listing plus per-project detail)
// reference: https://projects.eclipse.org/api

use crate::client::RateLimitedFetcher;
use crate::error::{Result, ScanError};
use crate::models::{ProjectDetails, ProjectStub};
use tracing::warn;

pub struct ProjectsClient<'a> {
    fetcher: &'a RateLimitedFetcher,
    api_base: String,
}

impl<'a> ProjectsClient<'a> {
    pub fn new(fetcher: &'a RateLimitedFetcher, api_base: impl Into<String>) -> Self {
        Self {
            fetcher,
            api_base: api_base.into(),
        }
    }

    /// Foundation-wide project listing, one fetch.
    pub async fn project_list(&self) -> Result<Vec<ProjectStub>> {
        let url = format!("{}/projects", self.api_base);
        let value = self.fetcher.get_json(&url, &[]).await?;

        serde_json::from_value(value).map_err(|e| ScanError::Parse {
            context: url,
            message: e.to_string(),
        })
    }

    /// Detail record for one project. A project the API has no record
    /// for (or answers with an error status) is `Ok(None)`; transport
    /// failures propagate so the caller can count them as failed items.
    pub async fn project_details(&self, id: &str) -> Result<Option<ProjectDetails>> {
        let url = format!("{}/projects/{}", self.api_base, id);

        let value = match self.fetcher.get_json(&url, &[]).await {
            Ok(value) => value,
            Err(e) if e.http_status().is_some() => {
                warn!("No detail record for project {}: {}", id, e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match serde_json::from_value(value) {
            Ok(details) => Ok(Some(details)),
            Err(e) => {
                warn!("Malformed detail record for project {}: {}", id, e);
                Ok(None)
            }
        }
    }
}
