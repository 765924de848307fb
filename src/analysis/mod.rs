// file: src/analysis/mod.rs
// description: aggregation module exports
// reference: internal module structure

pub mod frequency;
pub mod report;

pub use frequency::FrequencyTable;
pub use report::{NamedCounter, NamedTable, Report, ReportBuilder, RunMetadata, percentage};
