// file: src/analyzer/citations.rs
// description: policy-citation frequency scan over recent-changes edit summaries
// reference: https://www.mediawiki.org/wiki/API:RecentChanges

use crate::analysis::{FrequencyTable, ReportBuilder};
use crate::analyzer::RunOutput;
use crate::client::{MediaWikiClient, RateLimitedFetcher};
use crate::config::Config;
use crate::error::Result;
use crate::scanner::PatternSet;
use crate::scanner::patterns::POLICY_CITATION;
use tracing::info;

pub struct CitationsAnalyzer<'a> {
    config: &'a Config,
    wiki: MediaWikiClient<'a>,
}

impl<'a> CitationsAnalyzer<'a> {
    pub fn new(config: &'a Config, fetcher: &'a RateLimitedFetcher) -> Self {
        Self {
            config,
            wiki: MediaWikiClient::new(fetcher, config.api.mediawiki_endpoint.clone()),
        }
    }

    pub async fn run(&self, max_batches: Option<usize>) -> Result<RunOutput> {
        let max_batches = max_batches.unwrap_or(self.config.pipeline.max_batches);
        let ai_patterns = PatternSet::from_patterns(
            self.config
                .keywords
                .ai_policy_patterns
                .iter()
                .map(|p| (p.clone(), p.clone())),
        )?;

        let mut all_policies = FrequencyTable::new();
        let mut ai_policies = FrequencyTable::new();
        let mut edits_checked: u64 = 0;
        let mut edits_with_policies: u64 = 0;

        let mut paginator = self.wiki.recent_changes(
            &self.config.citations.period_start,
            &self.config.citations.period_end,
            self.config.citations.namespace,
            self.config.pipeline.batch_size,
            max_batches,
        );

        while let Some(batch) = paginator.next_batch().await {
            let changes = MediaWikiClient::decode_recent_changes(&batch);
            if changes.is_empty() {
                info!("Empty batch, stopping");
                break;
            }

            for change in &changes {
                edits_checked += 1;
                if change.comment.is_empty() {
                    continue;
                }

                let mut found_any = false;
                for citation in POLICY_CITATION.find_iter(&change.comment) {
                    found_any = true;
                    let normalized = citation.as_str().to_uppercase();
                    all_policies.increment(&normalized);

                    if ai_patterns.matches_any(citation.as_str()) {
                        ai_policies.increment(&normalized);
                    }
                }

                if found_any {
                    edits_with_policies += 1;
                }
            }

            info!(
                "Batch {}: {} edits, {} policy citations so far ({} AI-related)",
                paginator.batches_fetched(),
                changes.len(),
                all_policies.total(),
                ai_policies.total()
            );
        }

        let batches = paginator.batches_fetched();
        Ok(self.build_output(
            all_policies,
            ai_policies,
            edits_checked,
            edits_with_policies,
            batches,
        ))
    }

    fn build_output(
        &self,
        all_policies: FrequencyTable,
        ai_policies: FrequencyTable,
        edits_checked: u64,
        edits_with_policies: u64,
        batches: usize,
    ) -> RunOutput {
        let csv_rows = all_policies
            .ranked()
            .into_iter()
            .map(|(policy, count)| {
                vec![
                    policy.to_string(),
                    count.to_string(),
                    if ai_policies.count(policy) > 0 {
                        "yes".to_string()
                    } else {
                        "no".to_string()
                    },
                ]
            })
            .collect();

        let report = ReportBuilder::new("citations")
            .counter("edits_checked", edits_checked)
            .counter("edits_with_policies", edits_with_policies)
            .counter("total_policy_citations", all_policies.total())
            .counter("ai_policy_citations", ai_policies.total())
            .counter("batches_processed", batches as u64)
            .table("all_policies", all_policies)
            .table("ai_policies", ai_policies)
            .finish(edits_checked as usize, 0);

        RunOutput {
            report,
            file_prefix: "policy_citations",
            csv_header: vec!["policy", "citations", "ai_related"],
            csv_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporter::format_percentage;
    use pretty_assertions::assert_eq;

    fn analyzer_parts() -> (FrequencyTable, FrequencyTable) {
        (FrequencyTable::new(), FrequencyTable::new())
    }

    fn scan_comment(
        comment: &str,
        all: &mut FrequencyTable,
        ai: &mut FrequencyTable,
        ai_patterns: &PatternSet,
    ) {
        for citation in POLICY_CITATION.find_iter(comment) {
            let normalized = citation.as_str().to_uppercase();
            all.increment(&normalized);
            if ai_patterns.matches_any(citation.as_str()) {
                ai.increment(&normalized);
            }
        }
    }

    #[test]
    fn test_comment_scan_separates_ai_policies() {
        let config = Config::default_config();
        let ai_patterns = PatternSet::from_patterns(
            config
                .keywords
                .ai_policy_patterns
                .iter()
                .map(|p| (p.clone(), p.clone())),
        )
        .unwrap();

        let (mut all, mut ai) = analyzer_parts();
        scan_comment("rm puffery per WP:NOT and WP:LLM", &mut all, &mut ai, &ai_patterns);
        scan_comment("ce per wp:v", &mut all, &mut ai, &ai_patterns);

        assert_eq!(all.total(), 3);
        assert_eq!(all.count("WP:V"), 1);
        assert_eq!(ai.total(), 1);
        assert_eq!(ai.count("WP:LLM"), 1);
    }

    #[test]
    fn test_ratio_rendering_with_zero_total() {
        // No citations at all: the ratio line must render, not panic.
        assert_eq!(format_percentage(0, 0), "N/A");
    }
}
