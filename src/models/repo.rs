// file: src/models/repo.rs
// description: GitHub repository metadata models
// reference: https://docs.github.com/en/rest/repos

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepoInfo {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub has_issues: bool,
    #[serde(default)]
    pub has_wiki: bool,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub license: Option<RepoLicense>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepoLicense {
    #[serde(default)]
    pub spdx_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Active,
    Maintained,
    Stale,
    Unknown,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Active => "active",
            ActivityLevel::Maintained => "maintained",
            ActivityLevel::Stale => "stale",
            ActivityLevel::Unknown => "unknown",
        }
    }
}

impl RepoInfo {
    /// Activity bucket from the last update timestamp: pushed within 30
    /// days is active, within a year maintained, otherwise stale.
    pub fn activity_level(&self, now: DateTime<Utc>) -> ActivityLevel {
        match self.updated_at {
            Some(updated) => {
                let days = (now - updated).num_days();
                if days < 30 {
                    ActivityLevel::Active
                } else if days < 365 {
                    ActivityLevel::Maintained
                } else {
                    ActivityLevel::Stale
                }
            }
            None => ActivityLevel::Unknown,
        }
    }

    /// Forks with almost no stars carry no signal of their own.
    pub fn is_low_signal_fork(&self) -> bool {
        self.fork && self.stargazers_count < 5
    }

    pub fn license_id(&self) -> Option<&str> {
        self.license.as_ref().and_then(|l| l.spdx_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn repo(updated_days_ago: i64) -> RepoInfo {
        RepoInfo {
            name: "demo".to_string(),
            full_name: "org/demo".to_string(),
            description: None,
            html_url: String::new(),
            stargazers_count: 0,
            forks_count: 0,
            fork: false,
            archived: false,
            has_issues: true,
            has_wiki: false,
            topics: Vec::new(),
            language: None,
            updated_at: Some(Utc::now() - Duration::days(updated_days_ago)),
            license: None,
        }
    }

    #[test]
    fn test_activity_buckets() {
        let now = Utc::now();
        assert_eq!(repo(3).activity_level(now), ActivityLevel::Active);
        assert_eq!(repo(120).activity_level(now), ActivityLevel::Maintained);
        assert_eq!(repo(800).activity_level(now), ActivityLevel::Stale);
    }

    #[test]
    fn test_missing_timestamp_is_unknown() {
        let mut r = repo(0);
        r.updated_at = None;
        assert_eq!(r.activity_level(Utc::now()), ActivityLevel::Unknown);
    }

    #[test]
    fn test_low_signal_fork() {
        let mut r = repo(3);
        r.fork = true;
        r.stargazers_count = 2;
        assert!(r.is_low_signal_fork());

        r.stargazers_count = 50;
        assert!(!r.is_low_signal_fork());
    }
}
