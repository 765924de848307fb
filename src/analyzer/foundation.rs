// file: src/analyzer/foundation.rs
// description: keyword and link scan over static foundation pages
// reference: grounded in DOM text extraction over foundation directory pages

use crate::analysis::{FrequencyTable, ReportBuilder};
use crate::analyzer::RunOutput;
use crate::client::RateLimitedFetcher;
use crate::config::Config;
use crate::error::Result;
use crate::models::{Collected, Origin, PatternMatch, RawDocument, SourceKind};
use crate::parser::{ExtractedPage, extract_page};
use crate::pipeline::ProgressTracker;
use crate::scanner::PatternSet;
use tracing::warn;

#[derive(Debug)]
struct FoundationAnalysis {
    name: String,
    url: String,
    text_size: u64,
    matches: Vec<PatternMatch>,
    link_count: usize,
    repo_host_links: Vec<(String, usize)>,
}

pub struct FoundationAnalyzer<'a> {
    config: &'a Config,
    fetcher: &'a RateLimitedFetcher,
}

impl<'a> FoundationAnalyzer<'a> {
    pub fn new(config: &'a Config, fetcher: &'a RateLimitedFetcher) -> Self {
        Self { config, fetcher }
    }

    pub async fn run(&self) -> Result<RunOutput> {
        let platforms = PatternSet::from_keywords(&self.config.keywords.platform_keywords)?;
        let pages = &self.config.targets.foundation_pages;

        let progress = ProgressTracker::new(pages.len());
        let mut results = Vec::new();

        for page in pages {
            progress.set_message(format!("Fetching {}", page.url));

            match self.fetcher.get_text(&page.url).await {
                Ok(html) => {
                    let extracted = extract_page(&html);
                    let analysis = analyze_foundation_page(
                        &page.name,
                        &page.url,
                        extracted,
                        &platforms,
                        &self.config.keywords.repo_hosts,
                    );
                    progress.add_matches(analysis.matches.len());
                    progress.inc_item_processed();
                    results.push(Collected::Analyzed(analysis));
                }
                Err(e) => {
                    warn!("Error fetching {}: {}", page.url, e);
                    progress.inc_item_failed();
                    results.push(Collected::failed(&page.name, e.to_string()));
                }
            }
        }

        progress.finish();
        let stats = progress.get_stats();
        Ok(self.build_output(results, stats.items_processed, stats.items_failed))
    }

    fn build_output(
        &self,
        results: Vec<Collected<FoundationAnalysis>>,
        items_processed: usize,
        items_failed: usize,
    ) -> RunOutput {
        let mut platform_table = FrequencyTable::new();
        let mut host_table = FrequencyTable::new();
        let mut foundation_table = FrequencyTable::new();
        let mut samples = Vec::new();
        let mut csv_rows = Vec::new();

        for result in &results {
            let analysis = match result {
                Collected::Analyzed(analysis) => analysis,
                Collected::Failed { id, reason } => {
                    csv_rows.push(vec![
                        id.clone(),
                        String::new(),
                        "0".to_string(),
                        "0".to_string(),
                        "0".to_string(),
                        reason.clone(),
                    ]);
                    continue;
                }
            };

            for m in &analysis.matches {
                platform_table.increment(&m.label);
            }
            for (host, count) in &analysis.repo_host_links {
                host_table.add(host, *count as u64);
            }
            if !analysis.matches.is_empty() {
                foundation_table.add(&analysis.name, analysis.matches.len() as u64);
            }

            samples.extend(analysis.matches.iter().cloned());

            csv_rows.push(vec![
                analysis.name.clone(),
                analysis.url.clone(),
                analysis.text_size.to_string(),
                analysis.link_count.to_string(),
                analysis.matches.len().to_string(),
                String::new(),
            ]);
        }

        let report = ReportBuilder::new("foundation")
            .counter("pages_scanned", items_processed as u64)
            .counter("platform_mentions", platform_table.total())
            .counter("repo_host_links", host_table.total())
            .table("platforms", platform_table)
            .table("repo_hosts", host_table)
            .table("foundations", foundation_table)
            .samples(samples, self.config.report.max_samples)
            .finish(items_processed, items_failed);

        RunOutput {
            report,
            file_prefix: "foundation_pages",
            csv_header: vec![
                "foundation",
                "url",
                "text_bytes",
                "links",
                "platform_mentions",
                "error",
            ],
            csv_rows,
        }
    }
}

/// Pure per-page analysis over the extracted DOM content: the visible
/// text becomes a document scanned for platform keywords, links are
/// bucketed by known repository hosts.
fn analyze_foundation_page(
    name: &str,
    url: &str,
    extracted: ExtractedPage,
    platforms: &PatternSet,
    repo_hosts: &[String],
) -> FoundationAnalysis {
    let document = RawDocument::new(name, extracted.text, SourceKind::Html);

    let origin = Origin::page(name);
    let matches = platforms.scan(&document.text, &origin);

    let repo_host_links = repo_hosts
        .iter()
        .map(|host| {
            let count = extracted
                .links
                .iter()
                .filter(|link| link.href.contains(host.as_str()))
                .count();
            (host.clone(), count)
        })
        .filter(|(_, count)| *count > 0)
        .collect();

    FoundationAnalysis {
        name: name.to_string(),
        url: url.to_string(),
        text_size: document.size,
        matches,
        link_count: extracted.links.len(),
        repo_host_links,
    }
}
