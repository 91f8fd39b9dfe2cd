//! Console reporter for analysis results
//!
//! Provides human-readable output with ASCII tables and the test verdict.

use anyhow::Result;
use std::fmt::Write;

use super::{nanos, optional_nanos};
use crate::result::AnalysisResult;
use crate::search::Structure;
use crate::stats::DescriptiveStats;

/// Console format reporter
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Format analysis results for console output
    pub fn format(result: &AnalysisResult, significance: f64) -> Result<String> {
        let mut output = String::new();

        // Header
        writeln!(output)?;
        writeln!(output, "╔══════════════════════════════════════════════════════════════╗")?;
        writeln!(output, "║                  LOOKUP BENCHMARK RESULTS                    ║")?;
        writeln!(output, "╚══════════════════════════════════════════════════════════════╝")?;
        writeln!(output)?;

        // Run info
        let metadata = &result.metadata;
        writeln!(output, "Started:   {}", metadata.started_at)?;
        writeln!(output, "Duration:  {}ms", metadata.total_duration_ms)?;
        writeln!(output)?;

        writeln!(output, "Configuration:")?;
        match metadata.workload {
            Some(spec) => {
                writeln!(output, "  Universe Size:  {}", spec.universe_size)?;
                writeln!(output, "  Trials:         {}", spec.sample_count)?;
                if let Some(seed) = spec.seed {
                    writeln!(output, "  Seed:           {}", seed)?;
                }
            }
            None => {
                writeln!(output, "  Source:         recorded samples ({} trials)", result.series.len())?;
            }
        }
        writeln!(output, "  Block Size:     {}", metadata.block_size)?;
        writeln!(output)?;

        // Global summary table
        writeln!(output, "────────────────────────────────────────────────────────────────")?;
        writeln!(output, "Lookup times (ns)")?;
        writeln!(output, "────────────────────────────────────────────────────────────────")?;
        writeln!(output)?;
        Self::format_table(&mut output, result)?;

        for structure in [Structure::List, Structure::Dict] {
            let stats = result.stats(structure);
            writeln!(
                output,
                "  {} Stats: Mean: {}ns, StdDev: {}ns, CV: {}",
                structure,
                nanos(stats.mean),
                optional_nanos(stats.stddev),
                stats
                    .coefficient_of_variation()
                    .map(|cv| format!("{:.2}%", cv * 100.0))
                    .unwrap_or_else(|| "n/a".to_string())
            )?;
        }
        writeln!(output)?;

        // Blocks
        writeln!(output, "  Blocks (median ns):")?;
        for block in &result.blocks {
            writeln!(
                output,
                "    #{} [{}..{}): list {:>10}, dict {:>10}",
                block.block.index,
                block.block.start,
                block.block.end,
                nanos(block.list.median),
                nanos(block.dict.median)
            )?;
        }
        writeln!(output)?;

        // Hypothesis test
        let test = &result.hypothesis;
        writeln!(output, "────────────────────────────────────────────────────────────────")?;
        writeln!(output, "Welch's t-test")?;
        writeln!(output, "────────────────────────────────────────────────────────────────")?;
        writeln!(output, "  t = {:.4}, df = {:.2}", test.statistic, test.degrees_of_freedom)?;
        writeln!(
            output,
            "  p (two-sided) = {:.4e}, p (list < dict) = {:.4e}, p (list > dict) = {:.4e}",
            test.p_value, test.p_less, test.p_greater
        )?;
        writeln!(output)?;

        let verdict = test.verdict(significance);
        let symbol = if test.is_significant(significance) { "✓" } else { "–" };
        writeln!(output, "Verdict (α = {}): {} {}", significance, symbol, verdict)?;
        writeln!(output)?;

        Ok(output)
    }

    fn format_table(output: &mut String, result: &AnalysisResult) -> Result<()> {
        writeln!(output, "  ┌─────────┬──────────┬──────────┬──────────┬──────────┬──────────┐")?;
        writeln!(output, "  │Structure│   Min    │    Q1    │  Median  │    Q3    │   Max    │")?;
        writeln!(output, "  ├─────────┼──────────┼──────────┼──────────┼──────────┼──────────┤")?;

        for structure in [Structure::List, Structure::Dict] {
            Self::format_row(output, structure, result.stats(structure))?;
        }

        writeln!(output, "  └─────────┴──────────┴──────────┴──────────┴──────────┴──────────┘")?;
        writeln!(output)?;
        Ok(())
    }

    fn format_row(output: &mut String, structure: Structure, stats: &DescriptiveStats) -> Result<()> {
        writeln!(
            output,
            "  │ {:^7} │ {:>8} │ {:>8} │ {:>8} │ {:>8} │ {:>8} │",
            structure.label(),
            nanos(stats.min),
            nanos(stats.q1),
            nanos(stats.median),
            nanos(stats.q3),
            nanos(stats.max)
        )?;
        Ok(())
    }
}
