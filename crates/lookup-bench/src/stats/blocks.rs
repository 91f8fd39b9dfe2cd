//! Block-wise statistics.
//!
//! A run is cut into contiguous, non-overlapping blocks of trials and each
//! block is summarised on its own. Comparing blocks shows drift or changing
//! variance over the course of a run. Both columns are always cut along the
//! same index ranges, and the series itself is never modified.

use serde::{Deserialize, Serialize};

use super::percentiles::DescriptiveStats;
use crate::error::{BenchError, Result};
use crate::runner::TimingSeries;
use crate::search::Structure;

/// A contiguous range of trial indices, `start..end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position of the block in the run (0-based)
    pub index: usize,
    /// First trial index in the block
    pub start: usize,
    /// One past the last trial index in the block
    pub end: usize,
}

impl Block {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `0..len` into blocks of `block_size`; the last block takes the remainder.
///
/// # Errors
///
/// [`BenchError::DegenerateBlock`] when `block_size` is zero.
///
/// # Example
///
/// ```
/// use lookup_bench::stats::blocks::partition;
///
/// let sizes: Vec<usize> = partition(500, 150).unwrap().iter().map(|b| b.len()).collect();
/// assert_eq!(sizes, vec![150, 150, 150, 50]);
/// ```
pub fn partition(len: usize, block_size: usize) -> Result<Vec<Block>> {
    if block_size == 0 {
        return Err(BenchError::DegenerateBlock(block_size));
    }

    Ok((0..len)
        .step_by(block_size)
        .enumerate()
        .map(|(index, start)| Block {
            index,
            start,
            end: (start + block_size).min(len),
        })
        .collect())
}

/// Block size that splits `len` trials into at most `block_count` blocks.
///
/// # Errors
///
/// [`BenchError::DegenerateBlock`] when `block_count` is zero.
pub fn size_for_count(len: usize, block_count: usize) -> Result<usize> {
    if block_count == 0 {
        return Err(BenchError::DegenerateBlock(0));
    }
    Ok(len.div_ceil(block_count).max(1))
}

/// Descriptive statistics of both columns over one block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockStats {
    pub block: Block,
    pub list: DescriptiveStats,
    pub dict: DescriptiveStats,
}

impl BlockStats {
    /// Summary for one of the two columns
    pub fn for_structure(&self, structure: Structure) -> &DescriptiveStats {
        match structure {
            Structure::List => &self.list,
            Structure::Dict => &self.dict,
        }
    }
}

/// Summarise every block of a series, in index order.
///
/// With `block_size >= series.len()` there is a single block whose summaries
/// equal the global ones.
///
/// # Errors
///
/// [`BenchError::DegenerateBlock`] when `block_size` is zero. The check runs
/// before any block is summarised.
pub fn block_stats(series: &TimingSeries, block_size: usize) -> Result<Vec<BlockStats>> {
    let blocks = partition(series.len(), block_size)?;
    let list_times = series.list_times();
    let dict_times = series.dict_times();

    blocks
        .into_iter()
        .map(|block| {
            let range = block.start..block.end;
            Ok(BlockStats {
                block,
                list: summarise(&list_times[range.clone()], Structure::List)?,
                dict: summarise(&dict_times[range], Structure::Dict)?,
            })
        })
        .collect()
}

fn summarise(column: &[f64], structure: Structure) -> Result<DescriptiveStats> {
    DescriptiveStats::from_samples(column).ok_or_else(|| BenchError::InsufficientData {
        column: structure.label().to_string(),
        n: column.len(),
        required: 1,
    })
}
