use std::io::Write;
use std::path::PathBuf;

use crate::experiment::ResultRow;

pub const CSV_HEADER: &str = "option,reasoning,time (seconds)";

/// Persists the two run artifacts: the full prompt dump and the result CSV.
#[derive(Clone, Debug)]
pub struct ResultsWriter {
    results_path: PathBuf,
    scenario_path: PathBuf,
}

impl ResultsWriter {
    pub fn new(results_path: PathBuf, scenario_path: PathBuf) -> Self {
        Self {
            results_path,
            scenario_path,
        }
    }

    pub fn results_path(&self) -> &PathBuf {
        &self.results_path
    }

    /// Full prompt dump, written once at the start of a run.
    pub fn write_scenario(&self, scenario: &str) -> std::io::Result<()> {
        std::fs::write(&self.scenario_path, scenario)
    }

    /// Truncate the result file down to the header line.
    pub fn write_header(&self) -> std::io::Result<()> {
        std::fs::write(&self.results_path, format!("{CSV_HEADER}\n"))
    }

    /// Single end-of-run flush of the buffered rows.
    pub fn append_rows(&self, rows: &[ResultRow]) -> std::io::Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let mut out = String::new();
        for row in rows {
            out.push_str(&csv_row(row));
            out.push('\n');
        }
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.results_path)?;
        file.write_all(out.as_bytes())
    }
}

/// The reasoning field is always quoted with embedded quotes doubled, so
/// free-form model text cannot break the column layout.
fn csv_row(row: &ResultRow) -> String {
    format!(
        "{},\"{}\",{}",
        row.option,
        row.reasoning.replace('"', "\"\""),
        row.seconds
    )
}
