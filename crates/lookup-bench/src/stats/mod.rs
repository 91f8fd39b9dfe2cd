//! Statistical analysis of lookup timings
//!
//! This module provides the descriptive summaries, the block-wise
//! re-aggregation and Welch's t-test used to compare the two containers.
//!
//! # Examples
//!
//! ```
//! use lookup_bench::stats::{welch_t_test, DescriptiveStats};
//!
//! let list = vec![9.1e-6, 1.2e-5, 8.7e-6, 1.1e-5, 9.8e-6];
//! let dict = vec![6.0e-8, 5.5e-8, 7.1e-8, 6.2e-8, 5.9e-8];
//!
//! let summary = DescriptiveStats::from_samples(&list).unwrap();
//! println!("Median: {}, IQR: {}", summary.median, summary.iqr());
//!
//! let test = welch_t_test(&list, &dict).unwrap();
//! assert!(test.statistic > 0.0);
//! ```

pub mod blocks;
pub mod percentiles;
pub mod welch;

// Re-export main types and functions
pub use blocks::{block_stats, partition, size_for_count, Block, BlockStats};
pub use percentiles::{percentile, DescriptiveStats};
pub use welch::{welch_t_test, HypothesisTestResult, Verdict};
