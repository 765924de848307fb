// file: src/exporter/mod.rs
// description: report emission module exports
// reference: internal module structure

pub mod console;
pub mod csv;
pub mod json;

pub use console::{banner, format_percentage, print_report};
pub use csv::CsvExporter;
pub use json::JsonExporter;
