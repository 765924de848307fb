// file: src/analyzer/orgs.rs
// description: GitHub organization repository collector and statistics
// reference: https://docs.github.com/en/rest/repos

use crate::analysis::{FrequencyTable, ReportBuilder};
use crate::analyzer::RunOutput;
use crate::client::{GitHubClient, RateLimitedFetcher};
use crate::config::Config;
use crate::error::Result;
use crate::models::RepoInfo;
use crate::pipeline::ProgressTracker;
use crate::utils::Validator;
use chrono::Utc;
use tracing::{info, warn};

pub struct OrgsAnalyzer<'a> {
    config: &'a Config,
    client: GitHubClient<'a>,
}

impl<'a> OrgsAnalyzer<'a> {
    pub fn new(config: &'a Config, fetcher: &'a RateLimitedFetcher) -> Self {
        Self {
            config,
            client: GitHubClient::new(fetcher, config.api.github_api_base.clone()),
        }
    }

    /// Walks every configured organization sequentially; each org's
    /// repositories arrive in request order through the page loop.
    pub async fn run(&self, orgs_override: Vec<String>) -> Result<RunOutput> {
        let orgs = if orgs_override.is_empty() {
            self.config.targets.github_orgs.clone()
        } else {
            orgs_override
        };

        let progress = ProgressTracker::new(orgs.len());
        let mut collected: Vec<(String, Vec<RepoInfo>)> = Vec::new();

        for org in &orgs {
            progress.set_message(format!("Fetching repositories for {}", org));

            match self
                .client
                .org_repos(org, self.config.pipeline.max_batches)
                .await
            {
                Ok(repos) => {
                    info!("{}: {} repositories", org, repos.len());
                    progress.add_matches(repos.len());
                    progress.inc_item_processed();
                    collected.push((org.clone(), repos));
                }
                Err(e) => {
                    warn!("Error fetching repos for {}: {}", org, e);
                    progress.inc_item_failed();
                }
            }
        }

        progress.finish();
        let stats = progress.get_stats();
        Ok(self.build_output(collected, stats.items_processed, stats.items_failed))
    }

    fn build_output(
        &self,
        collected: Vec<(String, Vec<RepoInfo>)>,
        items_processed: usize,
        items_failed: usize,
    ) -> RunOutput {
        let now = Utc::now();

        let mut language_table = FrequencyTable::new();
        let mut license_table = FrequencyTable::new();
        let mut topic_table = FrequencyTable::new();
        let mut activity_table = FrequencyTable::new();
        let mut top_starred = FrequencyTable::new();
        let mut csv_rows = Vec::new();

        let mut repos_analyzed: u64 = 0;
        let mut repos_skipped: u64 = 0;

        for (org, repos) in &collected {
            for repo in repos {
                if repo.archived || repo.is_low_signal_fork() {
                    repos_skipped += 1;
                    continue;
                }
                repos_analyzed += 1;

                if let Some(language) = &repo.language {
                    language_table.increment(language);
                }
                if let Some(license) = repo.license_id() {
                    license_table.increment(license);
                }
                for topic in &repo.topics {
                    topic_table.increment(topic);
                }
                let activity = repo.activity_level(now);
                activity_table.increment(activity.as_str());
                top_starred.add(&format!("{}/{}", org, repo.name), repo.stargazers_count);

                csv_rows.push(vec![
                    org.clone(),
                    repo.name.clone(),
                    repo.stargazers_count.to_string(),
                    repo.forks_count.to_string(),
                    repo.language.clone().unwrap_or_default(),
                    repo.license_id().unwrap_or_default().to_string(),
                    activity.as_str().to_string(),
                    repo.has_issues.to_string(),
                    Validator::truncate_text(repo.description.as_deref().unwrap_or(""), 100),
                ]);
            }
        }

        let report = ReportBuilder::new("orgs")
            .counter("organizations_processed", items_processed as u64)
            .counter("repositories_analyzed", repos_analyzed)
            .counter("repositories_skipped", repos_skipped)
            .table("languages", language_table)
            .table("licenses", license_table)
            .table("topics", topic_table)
            .table("activity", activity_table)
            .table("top_starred", top_starred)
            .finish(items_processed, items_failed);

        RunOutput {
            report,
            file_prefix: "github_org_repos",
            csv_header: vec![
                "organization",
                "repository",
                "stars",
                "forks",
                "language",
                "license",
                "activity",
                "has_issues",
                "description",
            ],
            csv_rows,
        }
    }
}
