// file: src/analyzer/afd.rs
// description: deletion-discussion analysis for AI detection patterns
// reference: https://en.wikipedia.org/wiki/Wikipedia:Articles_for_deletion

use crate::analysis::{FrequencyTable, ReportBuilder};
use crate::analyzer::RunOutput;
use crate::client::{MediaWikiClient, RateLimitedFetcher, SearchQuery, SearchHit};
use crate::config::Config;
use crate::error::Result;
use crate::models::{Collected, Origin, PatternMatch};
use crate::parser::split_sections;
use crate::pipeline::ProgressTracker;
use crate::scanner::{PatternSet, Vote, formal_result, policy_citations, votes};
use std::collections::HashSet;
use tracing::{info, warn};

const AFD_PREFIX: &str = "Wikipedia:Articles for deletion/";
const PROJECT_NAMESPACE: u32 = 4;

/// A deletion discussion surfaced by keyword search.
#[derive(Debug, Clone)]
struct DiscussionRef {
    title: String,
    keyword: String,
}

/// Everything extracted from one discussion's wikitext.
#[derive(Debug)]
struct DiscussionAnalysis {
    article: String,
    /// Search keyword that surfaced this discussion.
    found_by: String,
    matches: Vec<PatternMatch>,
    tools: Vec<String>,
    outcome: Option<String>,
    votes: Vec<Vote>,
    policies: Vec<String>,
}

pub struct AfdAnalyzer<'a> {
    config: &'a Config,
    wiki: MediaWikiClient<'a>,
}

impl<'a> AfdAnalyzer<'a> {
    pub fn new(config: &'a Config, fetcher: &'a RateLimitedFetcher) -> Self {
        Self {
            config,
            wiki: MediaWikiClient::new(fetcher, config.api.mediawiki_endpoint.clone()),
        }
    }

    pub async fn run(&self, limit: Option<usize>) -> Result<RunOutput> {
        let discussions = self.discover_discussions().await?;
        info!("Total unique AfD discussions: {}", discussions.len());

        let limit = limit.unwrap_or(self.config.pipeline.max_discussions);
        let to_analyze: Vec<DiscussionRef> = discussions.into_iter().take(limit).collect();

        let indicators = PatternSet::from_keywords(&self.config.keywords.detection_indicators)?;
        let tools = PatternSet::from_keywords(&self.config.keywords.detection_tools)?;

        let progress = ProgressTracker::new(to_analyze.len());
        let mut results = Vec::new();

        for discussion in &to_analyze {
            progress.set_message(format!("Analyzing {}", discussion.title));

            match self.wiki.page_wikitext(&discussion.title).await {
                Ok(Some(document)) => {
                    let mut analysis = analyze_discussion(
                        &document.title,
                        &document.text,
                        &indicators,
                        &tools,
                    );
                    analysis.found_by = discussion.keyword.clone();
                    progress.add_matches(analysis.matches.len());
                    progress.inc_item_processed();
                    results.push(Collected::Analyzed(analysis));
                }
                Ok(None) => {
                    progress.inc_item_failed();
                    results.push(Collected::failed(&discussion.title, "page not found"));
                }
                Err(e) => {
                    warn!("Fetch failed for {}: {}", discussion.title, e);
                    progress.inc_item_failed();
                    results.push(Collected::failed(&discussion.title, e.to_string()));
                }
            }
        }

        progress.finish();
        let stats = progress.get_stats();
        Ok(self.build_output(results, stats.items_processed, stats.items_failed))
    }

    /// Runs one search per configured keyword and dedupes hits by title.
    async fn discover_discussions(&self) -> Result<Vec<DiscussionRef>> {
        let mut seen_titles: HashSet<String> = HashSet::new();
        let mut discussions = Vec::new();

        for keyword in &self.config.keywords.afd_search {
            let query = SearchQuery {
                term: format!("\"{}\" prefix:{}", keyword, AFD_PREFIX),
                namespace: Some(PROJECT_NAMESPACE),
                limit: self.config.pipeline.search_limit,
            };

            let hits: Vec<SearchHit> = match self.wiki.search(&query).await {
                Ok(hits) => hits,
                Err(e) => {
                    warn!("Search for '{}' failed: {}", keyword, e);
                    continue;
                }
            };

            let mut fresh = 0;
            for hit in hits {
                if seen_titles.insert(hit.title.clone()) {
                    discussions.push(DiscussionRef {
                        title: hit.title,
                        keyword: keyword.clone(),
                    });
                    fresh += 1;
                }
            }

            info!("Search '{}': {} new discussions", keyword, fresh);
        }

        Ok(discussions)
    }

    fn build_output(
        &self,
        results: Vec<Collected<DiscussionAnalysis>>,
        items_processed: usize,
        items_failed: usize,
    ) -> RunOutput {
        let mut indicator_table = FrequencyTable::new();
        let mut tool_table = FrequencyTable::new();
        let mut outcome_table = FrequencyTable::new();
        let mut policy_table = FrequencyTable::new();
        let mut vote_table = FrequencyTable::new();
        let mut samples = Vec::new();
        let mut csv_rows = Vec::new();

        for result in &results {
            let analysis = match result {
                Collected::Analyzed(analysis) => analysis,
                Collected::Failed { id, reason } => {
                    csv_rows.push(vec![
                        id.clone(),
                        String::new(),
                        String::new(),
                        "0".to_string(),
                        String::new(),
                        "0".to_string(),
                        reason.clone(),
                    ]);
                    continue;
                }
            };

            for m in &analysis.matches {
                indicator_table.increment(&m.label);
            }
            for tool in &analysis.tools {
                tool_table.increment(tool);
            }
            if let Some(outcome) = &analysis.outcome {
                outcome_table.increment(outcome);
            }
            for policy in &analysis.policies {
                policy_table.increment(policy);
            }
            for vote in &analysis.votes {
                vote_table.increment(&vote.stance);
            }

            samples.extend(analysis.matches.iter().cloned());

            csv_rows.push(vec![
                analysis.article.clone(),
                analysis.found_by.clone(),
                analysis.outcome.clone().unwrap_or_default(),
                analysis.matches.len().to_string(),
                analysis.tools.join("; "),
                analysis.votes.len().to_string(),
                String::new(),
            ]);
        }

        let report = ReportBuilder::new("afd")
            .counter("discussions_analyzed", items_processed as u64)
            .counter("total_indicator_matches", indicator_table.total())
            .counter("total_votes", vote_table.total())
            .table("indicators", indicator_table)
            .table("tools", tool_table)
            .table("outcomes", outcome_table)
            .table("policies", policy_table)
            .table("votes", vote_table)
            .samples(samples, self.config.report.max_samples)
            .finish(items_processed, items_failed);

        RunOutput {
            report,
            file_prefix: "afd_ai_patterns",
            csv_header: vec![
                "discussion",
                "found_by_keyword",
                "outcome",
                "indicator_matches",
                "tools_mentioned",
                "votes",
                "error",
            ],
            csv_rows,
        }
    }
}

/// Pure per-discussion extraction: section split, per-section indicator
/// scan, tool detection, formal closure, votes and policy citations.
fn analyze_discussion(
    title: &str,
    text: &str,
    indicators: &PatternSet,
    tools: &PatternSet,
) -> DiscussionAnalysis {
    let article = title.strip_prefix(AFD_PREFIX).unwrap_or(title).to_string();

    let sections = split_sections(text);
    let mut matches = Vec::new();
    for section in &sections {
        let origin = Origin::section(&article, &section.title);
        matches.extend(indicators.scan(&section.body, &origin));
    }

    DiscussionAnalysis {
        article,
        found_by: String::new(),
        matches,
        tools: tools.present_labels(text),
        outcome: formal_result(text),
        votes: votes(text),
        policies: policy_citations(text),
    }
}
