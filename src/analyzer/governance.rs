// file: src/analyzer/governance.rs
// description: AI keyword scan across configured governance pages
// reference: https://en.wikipedia.org/wiki/Wikipedia:Policies_and_guidelines

use crate::analysis::{FrequencyTable, ReportBuilder};
use crate::analyzer::RunOutput;
use crate::client::{MediaWikiClient, RateLimitedFetcher};
use crate::config::{CategoryRule, Config};
use crate::error::Result;
use crate::models::{Collected, Origin, PatternMatch};
use crate::parser::split_sections;
use crate::pipeline::ProgressTracker;
use crate::scanner::PatternSet;
use std::collections::BTreeSet;
use tracing::warn;

const FALLBACK_CATEGORY: &str = "Information Page";

#[derive(Debug)]
struct PageAnalysis {
    title: String,
    category: String,
    matches: Vec<PatternMatch>,
    sections_with_matches: usize,
    unique_keywords: BTreeSet<String>,
}

pub struct GovernanceAnalyzer<'a> {
    config: &'a Config,
    wiki: MediaWikiClient<'a>,
}

impl<'a> GovernanceAnalyzer<'a> {
    pub fn new(config: &'a Config, fetcher: &'a RateLimitedFetcher) -> Self {
        Self {
            config,
            wiki: MediaWikiClient::new(fetcher, config.api.mediawiki_endpoint.clone()),
        }
    }

    pub async fn run(&self) -> Result<RunOutput> {
        let keywords = PatternSet::from_keywords(&self.config.keywords.ai_keywords)?;
        let pages = &self.config.targets.governance_pages;

        let progress = ProgressTracker::new(pages.len());
        let mut results = Vec::new();

        for title in pages {
            progress.set_message(format!("Scanning {}", title));

            match self.wiki.page_revision(title).await {
                Ok(Some(document)) if !document.is_empty() => {
                    let analysis = analyze_page(
                        &document.title,
                        &document.text,
                        &keywords,
                        &self.config.targets.governance_categories,
                    );
                    progress.add_matches(analysis.matches.len());
                    progress.inc_item_processed();
                    results.push(Collected::Analyzed(analysis));
                }
                Ok(_) => {
                    progress.inc_item_failed();
                    results.push(Collected::failed(title, "page missing or empty"));
                }
                Err(e) => {
                    warn!("Fetch failed for {}: {}", title, e);
                    progress.inc_item_failed();
                    results.push(Collected::failed(title, e.to_string()));
                }
            }
        }

        progress.finish();
        let stats = progress.get_stats();
        Ok(self.build_output(results, stats.items_processed, stats.items_failed))
    }

    fn build_output(
        &self,
        results: Vec<Collected<PageAnalysis>>,
        items_processed: usize,
        items_failed: usize,
    ) -> RunOutput {
        let mut keyword_table = FrequencyTable::new();
        let mut category_table = FrequencyTable::new();
        let mut page_table = FrequencyTable::new();
        let mut samples = Vec::new();
        let mut csv_rows = Vec::new();
        let mut pages_with_matches: u64 = 0;

        for result in &results {
            let analysis = match result {
                Collected::Analyzed(analysis) => analysis,
                Collected::Failed { id, reason } => {
                    csv_rows.push(vec![
                        id.clone(),
                        String::new(),
                        "0".to_string(),
                        "0".to_string(),
                        String::new(),
                        reason.clone(),
                    ]);
                    continue;
                }
            };

            for m in &analysis.matches {
                keyword_table.increment(&m.label);
            }
            category_table.increment(&analysis.category);
            if !analysis.matches.is_empty() {
                page_table.add(&analysis.title, analysis.matches.len() as u64);
                pages_with_matches += 1;
            }

            samples.extend(analysis.matches.iter().cloned());

            csv_rows.push(vec![
                analysis.title.clone(),
                analysis.category.clone(),
                analysis.matches.len().to_string(),
                analysis.sections_with_matches.to_string(),
                analysis
                    .unique_keywords
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("; "),
                String::new(),
            ]);
        }

        let report = ReportBuilder::new("governance")
            .counter("pages_scanned", items_processed as u64)
            .counter("pages_with_ai_content", pages_with_matches)
            .counter("total_ai_references", keyword_table.total())
            .table("keywords", keyword_table)
            .table("categories", category_table)
            .table("pages", page_table)
            .samples(samples, self.config.report.max_samples)
            .finish(items_processed, items_failed);

        RunOutput {
            report,
            file_prefix: "governance_ai_scan",
            csv_header: vec![
                "page",
                "category",
                "ai_references",
                "sections_with_ai",
                "keywords_found",
                "error",
            ],
            csv_rows,
        }
    }
}

/// Pure per-page extraction: section split, per-section keyword scan,
/// and title-based categorization (first matching rule wins).
fn analyze_page(
    title: &str,
    text: &str,
    keywords: &PatternSet,
    category_rules: &[CategoryRule],
) -> PageAnalysis {
    let sections = split_sections(text);

    let mut matches = Vec::new();
    let mut sections_with_matches = 0;
    for section in &sections {
        let origin = Origin::section(title, &section.title);
        let section_matches = keywords.scan(&section.body, &origin);
        if !section_matches.is_empty() {
            sections_with_matches += 1;
        }
        matches.extend(section_matches);
    }

    let unique_keywords = matches.iter().map(|m| m.label.clone()).collect();

    PageAnalysis {
        title: title.to_string(),
        category: categorize(title, category_rules),
        matches,
        sections_with_matches,
        unique_keywords,
    }
}

fn categorize(title: &str, rules: &[CategoryRule]) -> String {
    let title_lower = title.to_lowercase();

    for rule in rules {
        if rule
            .keywords
            .iter()
            .any(|keyword| title_lower.contains(&keyword.to_lowercase()))
        {
            return rule.category.clone();
        }
    }

    FALLBACK_CATEGORY.to_string()
}
