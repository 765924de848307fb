// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod analysis;
pub mod analyzer;
pub mod client;
pub mod config;
pub mod error;
pub mod exporter;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod scanner;
pub mod utils;

pub use analysis::{FrequencyTable, Report, ReportBuilder, percentage};
pub use analyzer::{
    AfdAnalyzer, CitationsAnalyzer, FoundationAnalyzer, GovernanceAnalyzer, OrgsAnalyzer,
    ProjectsAnalyzer, RunOutput,
};
pub use client::{
    GitHubClient, MediaWikiClient, Paginator, ProjectsClient, RateLimitedFetcher, SearchQuery,
};
pub use config::{ApiConfig, Config, KeywordConfig, PipelineConfig, ReportConfig};
pub use error::{Result, ScanError};
pub use exporter::{CsvExporter, JsonExporter};
pub use models::{Collected, Origin, PatternMatch, RawDocument, Section, SourceKind};
pub use parser::split_sections;
pub use pipeline::{ProgressTracker, RunStats};
pub use scanner::PatternSet;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _table = FrequencyTable::new();
    }

    /// The full local pipeline over a fixed document: split, scan,
    /// extract the closure, aggregate.
    #[test]
    fn test_pipeline_end_to_end_on_fixed_wikitext() {
        let text = "== Discussion ==\nThis uses ChatGPT to write text.\n== Outcome ==\nThe result was '''Delete'''.";

        let sections = split_sections(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Discussion");
        assert_eq!(sections[1].title, "Outcome");

        let patterns = PatternSet::from_keywords(["ChatGPT"]).unwrap();
        let mut keyword_table = FrequencyTable::new();
        let mut all_matches = Vec::new();
        for section in &sections {
            let origin = Origin::section("Example article", &section.title);
            for m in patterns.scan(&section.body, &origin) {
                keyword_table.increment(&m.label);
                all_matches.push(m);
            }
        }

        assert_eq!(all_matches.len(), 1);
        assert_eq!(all_matches[0].section.as_deref(), Some("Discussion"));
        assert_eq!(keyword_table.count("ChatGPT"), 1);

        let mut outcome_table = FrequencyTable::new();
        let outcome = scanner::formal_result(text).unwrap();
        outcome_table.increment(&outcome);
        assert_eq!(outcome_table.count("Delete"), 1);
    }
}
