//! JSON reporter for analysis results

use crate::result::AnalysisResult;
use anyhow::Result;

/// JSON format reporter
pub struct JsonReporter;

impl JsonReporter {
    /// Format an analysis result as JSON
    ///
    /// Non-finite numbers (an infinite t statistic from two constant columns)
    /// are written as `null`.
    pub fn format(result: &AnalysisResult, pretty: bool) -> Result<String> {
        let output = if pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };
        Ok(output)
    }
}
