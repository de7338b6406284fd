//! Export module for MyBudget
//!
//! Renders budgets and summaries in the formats offered by the read
//! endpoints and the CLI:
//! - JSON: the default, identical to the API's native body
//! - YAML: human-readable rendering of the same value
//! - CSV: one row per budget summary (spreadsheet-compatible)

pub mod csv;
pub mod yaml;

pub use self::csv::write_csv_rows;
pub use self::yaml::write_yaml;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{MyBudgetError, MyBudgetResult};

/// Output format selected with `?format=` or `--format`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
    Csv,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Yaml => "application/yaml",
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }

    /// Write `value` (JSON, YAML) or `rows` (CSV) to `writer`
    ///
    /// CSV cannot hold nested values, so callers pass a flat projection.
    pub fn write<W, T, R>(&self, writer: &mut W, value: &T, rows: &[R]) -> MyBudgetResult<()>
    where
        W: Write,
        T: Serialize,
        R: Serialize,
    {
        match self {
            ExportFormat::Json => serde_json::to_writer_pretty(writer, value)
                .map_err(|e| MyBudgetError::Export(e.to_string())),
            ExportFormat::Yaml => write_yaml(value, writer),
            ExportFormat::Csv => write_csv_rows(rows, writer),
        }
    }

    /// Render to an in-memory buffer
    pub fn render<T, R>(&self, value: &T, rows: &[R]) -> MyBudgetResult<Vec<u8>>
    where
        T: Serialize,
        R: Serialize,
    {
        let mut buffer = Vec::new();
        self.write(&mut buffer, value, rows)?;
        Ok(buffer)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Yaml => write!(f, "yaml"),
            ExportFormat::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = MyBudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(MyBudgetError::invalid_field(
                "format",
                format!("unsupported format '{}', expected json, yaml or csv", other),
            )),
        }
    }
}
