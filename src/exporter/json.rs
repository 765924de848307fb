// file: src/exporter/json.rs
// description: structured JSON report writer with timestamped filenames

use crate::analysis::Report;
use crate::error::{Result, ScanError};
use chrono::Local;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| ScanError::Write {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    /// Writes the report as `{prefix}_{timestamp}.json`. The timestamp
    /// suffix keeps successive runs from overwriting each other.
    pub fn write(&self, report: &Report, prefix: &str, pretty: bool) -> Result<PathBuf> {
        let filename = format!("{}_{}.json", prefix, Local::now().format("%Y%m%d_%H%M%S"));
        let path = self.output_dir.join(filename);

        let body = if pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };

        fs::write(&path, body).map_err(|source| ScanError::Write {
            path: path.clone(),
            source,
        })?;

        info!("Wrote JSON report to {}", path.display());
        Ok(path)
    }
}
