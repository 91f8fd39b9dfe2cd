//! Benchmark result reporting
//!
//! This module handles formatting and outputting analysis results in various
//! formats, from machine-readable JSON to a plain text report for archiving.
//!
//! # Output Formats
//!
//! - **JSON**: Machine-readable format (the full [`AnalysisResult`])
//! - **Console**: Human-readable format with tables and the verdict
//! - **Markdown**: Documentation-friendly format for reports
//! - **Text**: Sectioned plain text, suited to `report.txt`
//!
//! # Example
//!
//! ```no_run
//! use lookup_bench::reporter::{Reporter, OutputFormat};
//! use lookup_bench::result::AnalysisResult;
//!
//! # fn example(result: AnalysisResult) -> anyhow::Result<()> {
//! let reporter = Reporter::new(OutputFormat::Console, 0.05);
//! reporter.report(&result)?;
//!
//! // Or write to a file
//! Reporter::new(OutputFormat::Json, 0.05)
//!     .write_to_file(&result, "results.json")?;
//! # Ok(())
//! # }
//! ```

mod console;
mod json;
mod markdown;
mod text;

use anyhow::Result;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use crate::result::AnalysisResult;

pub use console::ConsoleReporter;
pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use text::TextReporter;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON format for machine parsing
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Console output with tables
    #[default]
    Console,
    /// Markdown format for documentation
    Markdown,
    /// Plain text report
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "json-pretty" | "json_pretty" => Ok(OutputFormat::JsonPretty),
            "console" => Ok(OutputFormat::Console),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "text" | "txt" => Ok(OutputFormat::Text),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Timing in seconds rendered in nanoseconds
pub(crate) fn nanos(seconds: f64) -> String {
    format!("{:.1}", seconds * 1e9)
}

/// Undefined standard deviations are shown as "n/a"
pub(crate) fn optional_nanos(seconds: Option<f64>) -> String {
    seconds.map(nanos).unwrap_or_else(|| "n/a".to_string())
}

/// Reporter for analysis results
pub struct Reporter {
    format: OutputFormat,
    significance: f64,
}

impl Reporter {
    /// Create a reporter that reads the hypothesis test at level `significance`
    pub fn new(format: OutputFormat, significance: f64) -> Self {
        Self {
            format,
            significance,
        }
    }

    /// Report results to stdout
    pub fn report(&self, result: &AnalysisResult) -> Result<()> {
        let output = self.format_results(result)?;
        print!("{}", output);
        io::stdout().flush()?;
        Ok(())
    }

    /// Write results to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, result: &AnalysisResult, path: P) -> Result<()> {
        let output = self.format_results(result)?;
        fs::write(path, output)?;
        Ok(())
    }

    /// Format results as a string
    pub fn format_results(&self, result: &AnalysisResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => JsonReporter::format(result, false),
            OutputFormat::JsonPretty => JsonReporter::format(result, true),
            OutputFormat::Console => ConsoleReporter::format(result, self.significance),
            OutputFormat::Markdown => MarkdownReporter::format(result, self.significance),
            OutputFormat::Text => TextReporter::format(result, self.significance),
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(OutputFormat::default(), 0.05)
    }
}
