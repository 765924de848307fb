// file: src/analyzer/projects.rs
// description: foundation project collector with a bounded worker pool
// reference: https://projects.eclipse.org/api

use crate::analysis::{FrequencyTable, ReportBuilder};
use crate::analyzer::RunOutput;
use crate::client::{ProjectsClient, RateLimitedFetcher};
use crate::config::Config;
use crate::error::Result;
use crate::models::{Collected, ProjectInfo, ProjectStub};
use crate::pipeline::ProgressTracker;
use crate::utils::Validator;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

pub struct ProjectsAnalyzer<'a> {
    config: &'a Config,
    client: ProjectsClient<'a>,
}

impl<'a> ProjectsAnalyzer<'a> {
    pub fn new(config: &'a Config, fetcher: &'a RateLimitedFetcher) -> Self {
        Self {
            config,
            client: ProjectsClient::new(fetcher, config.api.projects_api_base.clone()),
        }
    }

    pub async fn run(&self, limit: Option<usize>) -> Result<RunOutput> {
        let stubs = match self.client.project_list().await {
            Ok(stubs) => stubs,
            Err(e) => {
                warn!("Error fetching project list: {}", e);
                Vec::new()
            }
        };
        info!("Found {} projects", stubs.len());

        let stubs: Vec<ProjectStub> = match limit {
            Some(limit) => stubs.into_iter().take(limit).collect(),
            None => stubs,
        };

        let progress = ProgressTracker::new(stubs.len());
        let workers = self.config.pipeline.parallel_workers.max(1);

        // Independent per-project fetch+analyze units run in a bounded
        // pool; the stream collector is the single consumer appending
        // results, so no shared mutable state exists. Completion order
        // is non-deterministic and is discarded by the sort below.
        let mut results: Vec<Collected<ProjectInfo>> = stream::iter(stubs.iter().map(|stub| {
            let progress = &progress;
            async move {
                let outcome = self.analyze_project(stub).await;
                match &outcome {
                    Collected::Analyzed(_) => progress.inc_item_processed(),
                    Collected::Failed { .. } => progress.inc_item_failed(),
                }
                outcome
            }
        }))
        .buffer_unordered(workers)
        .collect()
        .await;

        progress.finish();

        results.sort_by(|a, b| result_key(a).cmp(result_key(b)));

        let stats = progress.get_stats();
        Ok(self.build_output(results, stats.items_processed, stats.items_failed))
    }

    async fn analyze_project(&self, stub: &ProjectStub) -> Collected<ProjectInfo> {
        if stub.id.is_empty() {
            return Collected::failed(&stub.name, "listing entry has no project id");
        }

        match self.client.project_details(&stub.id).await {
            Ok(Some(details)) => Collected::Analyzed(ProjectInfo::from_details(stub, details)),
            Ok(None) => Collected::failed(&stub.id, "no detail record"),
            Err(e) => {
                warn!("Error analyzing project {}: {}", stub.id, e);
                Collected::failed(&stub.id, e.to_string())
            }
        }
    }

    fn build_output(
        &self,
        results: Vec<Collected<ProjectInfo>>,
        items_processed: usize,
        items_failed: usize,
    ) -> RunOutput {
        let mut state_table = FrequencyTable::new();
        let mut category_table = FrequencyTable::new();
        let mut org_table = FrequencyTable::new();
        let mut csv_rows = Vec::new();

        let mut github_projects: u64 = 0;
        let mut mailing_list_projects: u64 = 0;

        for result in &results {
            let project = match result {
                Collected::Analyzed(project) => project,
                Collected::Failed { id, reason } => {
                    csv_rows.push(vec![
                        id.clone(),
                        String::new(),
                        String::new(),
                        String::new(),
                        "false".to_string(),
                        "false".to_string(),
                        reason.clone(),
                    ]);
                    continue;
                }
            };

            if !project.state.is_empty() {
                state_table.increment(&project.state);
            }
            for category in &project.categories {
                category_table.increment(category);
            }
            if let Some(org) = &project.github_organization {
                org_table.increment(org);
            }
            if project.github_url.is_some() {
                github_projects += 1;
            }
            if !project.mailing_lists.is_empty() {
                mailing_list_projects += 1;
            }

            csv_rows.push(vec![
                project.project_id.clone(),
                project.name.clone(),
                project.state.clone(),
                project.github_organization.clone().unwrap_or_default(),
                project.has_github_issues.to_string(),
                (!project.mailing_lists.is_empty()).to_string(),
                Validator::truncate_text(&project.description, 100),
            ]);
        }

        let report = ReportBuilder::new("projects")
            .counter("projects_analyzed", items_processed as u64)
            .counter("github_projects", github_projects)
            .counter("mailing_list_projects", mailing_list_projects)
            .table("states", state_table)
            .table("categories", category_table)
            .table("github_organizations", org_table)
            .finish(items_processed, items_failed);

        RunOutput {
            report,
            file_prefix: "foundation_projects",
            csv_header: vec![
                "project_id",
                "name",
                "state",
                "github_organization",
                "has_github_issues",
                "has_mailing_lists",
                "description",
            ],
            csv_rows,
        }
    }
}

fn result_key(result: &Collected<ProjectInfo>) -> &str {
    match result {
        Collected::Analyzed(project) => &project.project_id,
        Collected::Failed { id, .. } => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(api_base: String) -> Config {
        let mut config = Config::default_config();
        config.api = ApiConfig {
            mediawiki_endpoint: "https://example.org/w/api.php".to_string(),
            github_api_base: "https://example.org".to_string(),
            projects_api_base: api_base,
            user_agent: "wikiscan-test/0.1".to_string(),
            request_delay_ms: 0,
            timeout_secs: 5,
        };
        config
    }

    async fn mount_project(server: &MockServer, id: &str, state: &str, github: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/projects/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                r#"{{"description": "d", "state": "{}", "github_url": "{}"}}"#,
                state, github
            )))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_pool_collects_every_item_and_sorts() {
        let server = MockServer::start().await;

        let ids = ["a.one", "b.two", "c.three", "d.four", "e.five", "f.six"];
        let listing: Vec<String> = ids
            .iter()
            .map(|id| format!(r#"{{"id": "{}", "name": "{}"}}"#, id, id))
            .collect();

        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(format!("[{}]", listing.join(","))),
            )
            .mount(&server)
            .await;

        for id in &ids {
            mount_project(&server, id, "Regular", "https://github.com/example/x").await;
        }

        let config = test_config(server.uri());
        let fetcher = RateLimitedFetcher::new(&config.api).unwrap();
        let analyzer = ProjectsAnalyzer::new(&config, &fetcher);

        let output = analyzer.run(None).await.unwrap();

        // Exactly N results regardless of completion order, re-sorted by id.
        assert_eq!(output.report.run.items_processed, ids.len());
        assert_eq!(output.csv_rows.len(), ids.len());
        let first_column: Vec<&str> = output.csv_rows.iter().map(|r| r[0].as_str()).collect();
        let mut sorted = first_column.clone();
        sorted.sort();
        assert_eq!(first_column, sorted);

        assert_eq!(output.report.counter("github_projects"), Some(6));
    }

    #[tokio::test]
    async fn test_failed_details_counted_separately() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"id": "good.project", "name": "Good"},
                    {"id": "gone.project", "name": "Gone"}]"#,
            ))
            .mount(&server)
            .await;
        mount_project(&server, "good.project", "Regular", "").await;
        Mock::given(method("GET"))
            .and(path("/projects/gone.project"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let config = test_config(server.uri());
        let fetcher = RateLimitedFetcher::new(&config.api).unwrap();
        let analyzer = ProjectsAnalyzer::new(&config, &fetcher);

        let output = analyzer.run(None).await.unwrap();
        assert_eq!(output.report.run.items_processed, 1);
        assert_eq!(output.report.run.items_failed, 1);
    }

    #[tokio::test]
    async fn test_unreachable_listing_yields_empty_report() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = test_config(server.uri());
        let fetcher = RateLimitedFetcher::new(&config.api).unwrap();
        let analyzer = ProjectsAnalyzer::new(&config, &fetcher);

        let output = analyzer.run(None).await.unwrap();
        assert_eq!(output.report.run.items_processed, 0);
        assert!(output.csv_rows.is_empty());
    }
}
