// file: src/analysis/report.rs
// description: write-once run report combining tables, counters and samples
// reference: internal data structures

use crate::analysis::FrequencyTable;
use crate::models::PatternMatch;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    pub run_id: Uuid,
    pub analysis: String,
    pub started_at: DateTime<Utc>,
    pub items_processed: usize,
    pub items_failed: usize,
    pub duration_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct NamedTable {
    pub name: String,
    pub total: u64,
    pub distinct: usize,
    pub counts: FrequencyTable,
}

#[derive(Debug, Serialize)]
pub struct NamedCounter {
    pub name: String,
    pub value: u64,
}

/// The single output artifact of a run: metadata, scalar counters, the
/// frequency tables, and a bounded sample of matches for human review.
/// Field names are stable across runs; built once at the end of a run
/// and never mutated afterwards.
#[derive(Debug, Serialize)]
pub struct Report {
    pub run: RunMetadata,
    pub counters: Vec<NamedCounter>,
    pub tables: Vec<NamedTable>,
    pub samples: Vec<PatternMatch>,
}

/// Accumulates report parts while a run is in flight, then seals them.
pub struct ReportBuilder {
    analysis: String,
    started_at: DateTime<Utc>,
    counters: Vec<NamedCounter>,
    tables: Vec<NamedTable>,
    samples: Vec<PatternMatch>,
}

impl ReportBuilder {
    pub fn new(analysis: &str) -> Self {
        Self {
            analysis: analysis.to_string(),
            started_at: Utc::now(),
            counters: Vec::new(),
            tables: Vec::new(),
            samples: Vec::new(),
        }
    }

    pub fn counter(mut self, name: &str, value: u64) -> Self {
        self.counters.push(NamedCounter {
            name: name.to_string(),
            value,
        });
        self
    }

    pub fn table(mut self, name: &str, table: FrequencyTable) -> Self {
        self.tables.push(NamedTable {
            name: name.to_string(),
            total: table.total(),
            distinct: table.distinct(),
            counts: table,
        });
        self
    }

    pub fn samples(mut self, samples: Vec<PatternMatch>, cap: usize) -> Self {
        self.samples = samples.into_iter().take(cap).collect();
        self
    }

    pub fn finish(self, items_processed: usize, items_failed: usize) -> Report {
        let duration_secs = (Utc::now() - self.started_at).num_seconds().max(0) as u64;

        Report {
            run: RunMetadata {
                run_id: Uuid::new_v4(),
                analysis: self.analysis,
                started_at: self.started_at,
                items_processed,
                items_failed,
                duration_secs,
            },
            counters: self.counters,
            tables: self.tables,
            samples: self.samples,
        }
    }
}

impl Report {
    pub fn table(&self, name: &str) -> Option<&FrequencyTable> {
        self.tables.iter().find(|t| t.name == name).map(|t| &t.counts)
    }

    pub fn counter(&self, name: &str) -> Option<u64> {
        self.counters.iter().find(|c| c.name == name).map(|c| c.value)
    }
}

/// `count / total * 100`, or `None` when the total is zero.
pub fn percentage(count: u64, total: u64) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(count as f64 / total as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_lookup() {
        let mut keywords = FrequencyTable::new();
        keywords.add("ChatGPT", 4);

        let report = ReportBuilder::new("afd")
            .counter("discussions_found", 12)
            .table("keywords", keywords)
            .finish(10, 2);

        assert_eq!(report.run.analysis, "afd");
        assert_eq!(report.run.items_processed, 10);
        assert_eq!(report.run.items_failed, 2);
        assert_eq!(report.counter("discussions_found"), Some(12));
        assert_eq!(report.table("keywords").unwrap().count("ChatGPT"), 4);
        assert!(report.table("missing").is_none());
    }

    #[test]
    fn test_sample_cap() {
        use crate::models::Origin;

        let origin = Origin::page("Page");
        let samples: Vec<PatternMatch> = (0..50)
            .map(|i| PatternMatch::new("k", &origin, i, "ctx".to_string()))
            .collect();

        let report = ReportBuilder::new("afd").samples(samples, 25).finish(1, 0);
        assert_eq!(report.samples.len(), 25);
    }

    #[test]
    fn test_percentage_guard() {
        assert_eq!(percentage(5, 0), None);
        assert_eq!(percentage(0, 0), None);
        assert_eq!(percentage(1, 4), Some(25.0));
    }

    #[test]
    fn test_report_serializes_with_stable_fields() {
        let report = ReportBuilder::new("citations").finish(0, 0);
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("run").is_some());
        assert!(json["run"].get("run_id").is_some());
        assert!(json.get("tables").is_some());
        assert!(json.get("counters").is_some());
        assert!(json.get("samples").is_some());
    }
}
