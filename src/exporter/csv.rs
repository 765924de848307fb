// file: src/exporter/csv.rs
// description: flat tabular summary writer for spreadsheet consumption
// reference: https://docs.rs/csv

use crate::error::{Result, ScanError};
use chrono::Local;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| ScanError::Write {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    /// Writes one header row plus the given records as
    /// `{prefix}_{timestamp}.csv`.
    pub fn write(
        &self,
        prefix: &str,
        header: &[&str],
        rows: &[Vec<String>],
    ) -> Result<PathBuf> {
        let filename = format!("{}_{}.csv", prefix, Local::now().format("%Y%m%d_%H%M%S"));
        let path = self.output_dir.join(filename);

        let mut writer = csv::Writer::from_path(&path)?;

        writer.write_record(header)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(|source| ScanError::Write {
            path: path.clone(),
            source,
        })?;

        info!("Wrote CSV summary to {}", path.display());
        Ok(path)
    }
}
