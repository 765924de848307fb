// file: src/models/project.rs
// description: foundation project listing and detail models
// reference: https://projects.eclipse.org/api

use serde::{Deserialize, Serialize};

/// Entry from the foundation-wide project listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectStub {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Detail record for a single project, as returned by the per-project
/// endpoint. Fields the API omits deserialize to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectDetails {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub website: Option<ProjectWebsite>,
    #[serde(default)]
    pub github_url: String,
    #[serde(default)]
    pub dev_list: Option<DevList>,
    #[serde(default)]
    pub licenses: Vec<String>,
    #[serde(default)]
    pub technology_types: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectWebsite {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevList {
    #[serde(default)]
    pub url: Option<String>,
}

/// Analyzed view of one project, flattened for aggregation and export.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectInfo {
    pub name: String,
    pub project_id: String,
    pub description: String,
    pub state: String,
    pub categories: Vec<String>,
    pub website: String,
    pub github_url: Option<String>,
    /// Derived from `github_url` only when the API actually returned one;
    /// never guessed from the project name.
    pub github_organization: Option<String>,
    pub mailing_lists: Vec<String>,
    pub has_github_issues: bool,
    pub licenses: Vec<String>,
    pub technology_types: Vec<String>,
}

impl ProjectInfo {
    pub fn from_details(stub: &ProjectStub, details: ProjectDetails) -> Self {
        let github_url = if details.github_url.is_empty() {
            None
        } else {
            Some(details.github_url.clone())
        };

        let github_organization = github_url
            .as_deref()
            .filter(|url| url.contains("github.com"))
            .and_then(|url| url.split('/').nth(3))
            .filter(|org| !org.is_empty())
            .map(str::to_string);

        let mailing_lists = details
            .dev_list
            .as_ref()
            .and_then(|l| l.url.clone())
            .into_iter()
            .collect();

        Self {
            name: stub.name.clone(),
            project_id: stub.id.clone(),
            description: details.description,
            state: details.state,
            categories: details.categories,
            website: details.website.map(|w| w.url).unwrap_or_default(),
            has_github_issues: github_url.is_some(),
            github_url,
            github_organization,
            mailing_lists,
            licenses: details.licenses,
            technology_types: details.technology_types,
        }
    }
}
