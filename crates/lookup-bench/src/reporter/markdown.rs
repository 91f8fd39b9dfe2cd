//! Markdown reporter for analysis results

use anyhow::Result;
use std::fmt::Write;

use super::{nanos, optional_nanos};
use crate::result::AnalysisResult;
use crate::search::Structure;

/// Markdown format reporter
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Format analysis results as a Markdown document
    pub fn format(result: &AnalysisResult, significance: f64) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "# Lookup Benchmark Results")?;
        writeln!(output)?;
        writeln!(output, "- **Started:** {}", result.metadata.started_at)?;
        writeln!(output, "- **Duration:** {}ms", result.metadata.total_duration_ms)?;
        if let Some(spec) = result.metadata.workload {
            writeln!(output, "- **Universe size:** {}", spec.universe_size)?;
            writeln!(output, "- **Trials:** {}", spec.sample_count)?;
            if let Some(seed) = spec.seed {
                writeln!(output, "- **Seed:** {}", seed)?;
            }
        }
        writeln!(output, "- **Block size:** {}", result.metadata.block_size)?;
        writeln!(output)?;

        writeln!(output, "## Lookup times (ns)")?;
        writeln!(output)?;
        writeln!(output, "| Structure | n | Mean | Median | StdDev | Q1 | Q3 | Min | Max |")?;
        writeln!(output, "|-----------|---|------|--------|--------|----|----|-----|-----|")?;
        for structure in [Structure::List, Structure::Dict] {
            let s = result.stats(structure);
            writeln!(
                output,
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} |",
                structure,
                s.n,
                nanos(s.mean),
                nanos(s.median),
                optional_nanos(s.stddev),
                nanos(s.q1),
                nanos(s.q3),
                nanos(s.min),
                nanos(s.max)
            )?;
        }
        writeln!(output)?;

        writeln!(output, "## Blocks")?;
        writeln!(output)?;
        writeln!(output, "| Block | Trials | List median | Dict median | List IQR | Dict IQR |")?;
        writeln!(output, "|-------|--------|-------------|-------------|----------|----------|")?;
        for block in &result.blocks {
            writeln!(
                output,
                "| {} | {}..{} | {} | {} | {} | {} |",
                block.block.index,
                block.block.start,
                block.block.end,
                nanos(block.list.median),
                nanos(block.dict.median),
                nanos(block.list.iqr()),
                nanos(block.dict.iqr())
            )?;
        }
        writeln!(output)?;

        let test = &result.hypothesis;
        writeln!(output, "## Welch's t-test")?;
        writeln!(output)?;
        writeln!(output, "| t | df | p (two-sided) | p (list < dict) | p (list > dict) |")?;
        writeln!(output, "|---|----|---------------|-----------------|-----------------|")?;
        writeln!(
            output,
            "| {:.4} | {:.2} | {:.4e} | {:.4e} | {:.4e} |",
            test.statistic, test.degrees_of_freedom, test.p_value, test.p_less, test.p_greater
        )?;
        writeln!(output)?;
        writeln!(
            output,
            "**Verdict** (α = {}): {}",
            significance,
            test.verdict(significance)
        )?;

        Ok(output)
    }
}
