//! Analysis results
//!
//! [`AnalysisResult`] bundles everything a run produced: the raw samples,
//! the global and block-wise summaries and the hypothesis test. It is the
//! only thing handed to the table writers, the plotting hand-off and the
//! reporters.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{BenchError, Result};
use crate::runner::TimingSeries;
use crate::search::Structure;
use crate::stats::{block_stats, welch_t_test, BlockStats, DescriptiveStats, HypothesisTestResult};
use crate::workload::WorkloadSpec;

/// Where the samples of a result came from and how the run was set up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Workload that produced the samples (absent for re-analysed tables)
    pub workload: Option<WorkloadSpec>,
    /// Block size used for block-wise statistics
    pub block_size: usize,
    /// RFC 3339 timestamp of the start of the run
    pub started_at: String,
    /// Wall-clock duration of generation, timing and analysis
    pub total_duration_ms: u64,
}

/// Summaries of the two timing columns over the whole run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub list: DescriptiveStats,
    pub dict: DescriptiveStats,
}

impl GlobalStats {
    /// Summarise both columns of a series.
    ///
    /// # Errors
    ///
    /// [`BenchError::InsufficientData`] when the series is empty.
    pub fn compute(series: &TimingSeries) -> Result<Self> {
        let summarise = |structure: Structure| {
            DescriptiveStats::from_samples(&series.column(structure)).ok_or_else(|| {
                BenchError::InsufficientData {
                    column: structure.label().to_string(),
                    n: series.len(),
                    required: 1,
                }
            })
        };

        Ok(Self {
            list: summarise(Structure::List)?,
            dict: summarise(Structure::Dict)?,
        })
    }

    pub fn for_structure(&self, structure: Structure) -> &DescriptiveStats {
        match structure {
            Structure::List => &self.list,
            Structure::Dict => &self.dict,
        }
    }
}

/// Everything produced by one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub metadata: RunMetadata,
    pub series: TimingSeries,
    pub global: GlobalStats,
    pub blocks: Vec<BlockStats>,
    pub hypothesis: HypothesisTestResult,
}

impl AnalysisResult {
    /// Combine already computed parts into a result.
    ///
    /// No statistics are computed here.
    pub fn assemble(
        metadata: RunMetadata,
        series: TimingSeries,
        global: GlobalStats,
        blocks: Vec<BlockStats>,
        hypothesis: HypothesisTestResult,
    ) -> Self {
        Self {
            metadata,
            series,
            global,
            blocks,
            hypothesis,
        }
    }

    /// Global summary of one structure
    pub fn stats(&self, structure: Structure) -> &DescriptiveStats {
        self.global.for_structure(structure)
    }
}

/// Run every analysis stage over a series and assemble the result.
///
/// The block size is validated before anything is computed. Any failing stage
/// aborts the analysis and its error is returned unchanged.
///
/// # Errors
///
/// - [`BenchError::DegenerateBlock`] for a zero block size
/// - [`BenchError::InsufficientData`] when a column has fewer than two samples
#[instrument(skip_all, fields(samples = series.len(), block_size = metadata.block_size))]
pub fn analyze(series: TimingSeries, metadata: RunMetadata) -> Result<AnalysisResult> {
    if metadata.block_size == 0 {
        return Err(BenchError::DegenerateBlock(metadata.block_size));
    }

    let list_times = series.list_times();
    let dict_times = series.dict_times();

    let hypothesis = welch_t_test(&list_times, &dict_times)?;
    let global = GlobalStats::compute(&series)?;
    let blocks = block_stats(&series, metadata.block_size)?;

    info!(
        "Analysed {} trials in {} blocks: list mean {:.3e}s, dict mean {:.3e}s, t = {:.3}, p = {:.3e}",
        series.len(),
        blocks.len(),
        global.list.mean,
        global.dict.mean,
        hypothesis.statistic,
        hypothesis.p_value
    );

    Ok(AnalysisResult::assemble(
        metadata, series, global, blocks, hypothesis,
    ))
}
