// file: src/client/github.rs
// description: GitHub REST client for organization repository listings
// reference: https://docs.github.com/en/rest/repos/repos#list-organization-repositories

use crate::client::RateLimitedFetcher;
use crate::error::Result;
use crate::models::RepoInfo;
use tracing::warn;

const PER_PAGE: u32 = 100;

pub struct GitHubClient<'a> {
    fetcher: &'a RateLimitedFetcher,
    api_base: String,
}

impl<'a> GitHubClient<'a> {
    pub fn new(fetcher: &'a RateLimitedFetcher, api_base: impl Into<String>) -> Self {
        Self {
            fetcher,
            api_base: api_base.into(),
        }
    }

    /// Pages through an organization's repositories by page number.
    ///
    /// Terminates on an empty page or the page ceiling. An unknown org
    /// (404) yields an empty list; any other failure mid-walk keeps the
    /// pages already collected. Pages arrive in request order.
    pub async fn org_repos(&self, org: &str, max_pages: usize) -> Result<Vec<RepoInfo>> {
        let url = format!("{}/orgs/{}/repos", self.api_base, org);
        let mut repos = Vec::new();

        for page in 1..=max_pages {
            let params = vec![
                ("page".to_string(), page.to_string()),
                ("per_page".to_string(), PER_PAGE.to_string()),
                ("type".to_string(), "all".to_string()),
            ];

            let value = match self.fetcher.get_json(&url, &params).await {
                Ok(value) => value,
                Err(e) if e.http_status() == Some(404) => {
                    warn!("Organization {} not found", org);
                    return Ok(Vec::new());
                }
                Err(e) => {
                    warn!("Error fetching {} repos page {}: {}", org, page, e);
                    break;
                }
            };

            let page_repos: Vec<RepoInfo> = match serde_json::from_value(value) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("Malformed repo listing for {} page {}: {}", org, page, e);
                    break;
                }
            };

            if page_repos.is_empty() {
                break;
            }

            repos.extend(page_repos);
        }

        Ok(repos)
    }
}
