//! Plain text reporter
//!
//! Sectioned report meant to be archived next to the tables. Values are
//! written at full precision in seconds.

use anyhow::Result;
use std::fmt::Write;

use crate::result::AnalysisResult;
use crate::search::Structure;
use crate::stats::DescriptiveStats;

const RULE: &str = "==========================================";

/// Text format reporter
pub struct TextReporter;

impl TextReporter {
    pub fn format(result: &AnalysisResult, significance: f64) -> Result<String> {
        let mut output = String::new();

        Self::section(&mut output, "SAMPLE SIZE")?;
        writeln!(output, "n_list = {}", result.global.list.n)?;
        writeln!(output, "n_dict = {}", result.global.dict.n)?;
        writeln!(output, "block_size = {}", result.metadata.block_size)?;
        if let Some(seed) = result.metadata.workload.and_then(|spec| spec.seed) {
            writeln!(output, "seed = {}", seed)?;
        }
        writeln!(output)?;

        Self::section(&mut output, "DESCRIPTIVE STATISTICS - LIST")?;
        Self::stats(&mut output, result.stats(Structure::List))?;
        writeln!(output)?;

        Self::section(&mut output, "DESCRIPTIVE STATISTICS - DICT")?;
        Self::stats(&mut output, result.stats(Structure::Dict))?;
        writeln!(output)?;

        let test = &result.hypothesis;
        Self::section(&mut output, "HYPOTHESIS TEST - WELCH T-TEST")?;
        writeln!(output, "t_stat = {}", test.statistic)?;
        writeln!(output, "df = {}", test.degrees_of_freedom)?;
        writeln!(output, "p_two_sided = {}", test.p_value)?;
        writeln!(output, "p_less (list < dict) = {}", test.p_less)?;
        writeln!(output, "p_greater (list > dict) = {}", test.p_greater)?;
        writeln!(output, "verdict (alpha = {}) = {}", significance, test.verdict(significance))?;
        writeln!(output, "{}", RULE)?;

        Ok(output)
    }

    fn section(output: &mut String, title: &str) -> Result<()> {
        writeln!(output, "{}", RULE)?;
        writeln!(output, " {} ", title)?;
        writeln!(output, "{}", RULE)?;
        Ok(())
    }

    fn stats(output: &mut String, stats: &DescriptiveStats) -> Result<()> {
        writeln!(output, "mean: {}", stats.mean)?;
        writeln!(output, "median: {}", stats.median)?;
        match stats.stddev {
            Some(stddev) => writeln!(output, "stddev: {}", stddev)?,
            None => writeln!(output, "stddev: undefined")?,
        }
        writeln!(output, "pstddev: {}", stats.pstddev)?;
        writeln!(output, "q1: {}", stats.q1)?;
        writeln!(output, "q3: {}", stats.q3)?;
        writeln!(output, "iqr: {}", stats.iqr())?;
        writeln!(output, "min: {}", stats.min)?;
        writeln!(output, "max: {}", stats.max)?;
        Ok(())
    }
}
