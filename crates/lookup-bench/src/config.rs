//! Configuration parsing for lookup benchmarks
//!
//! This module provides TOML-based configuration for the workload (universe
//! size, number of trials, seed), the analysis stage (block partitioning,
//! significance level) and where output tables are written.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BenchError, Result};
use crate::stats::size_for_count;
use crate::workload::WorkloadSpec;

/// Number of blocks a run is split into when no explicit block size is set
pub const DEFAULT_BLOCK_COUNT: usize = 4;

/// Main configuration structure loaded from TOML files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Workload generation parameters
    pub workload: WorkloadConfig,
    /// Statistical analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Output table settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML is malformed
    /// - Required fields are missing
    ///
    /// # Example
    ///
    /// ```no_run
    /// use lookup_bench::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = Config::from_file("lookup.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Example
    ///
    /// ```
    /// use lookup_bench::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let toml = r#"
    ///     [workload]
    ///     universe_size = 1000
    ///     sample_count = 500
    ///     seed = 42
    /// "#;
    /// let config = Config::from_str(toml)?;
    /// assert_eq!(config.workload.seed, Some(42));
    /// # Ok(())
    /// # }
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }

    /// Workload spec described by the `[workload]` table
    pub fn workload_spec(&self) -> WorkloadSpec {
        WorkloadSpec {
            universe_size: self.workload.universe_size,
            sample_count: self.workload.sample_count,
            seed: self.workload.seed,
        }
    }

    /// Block size used for block-wise statistics.
    ///
    /// An explicit `block_size` wins. Otherwise the run is split into
    /// `block_count` blocks, rounding the size up so that no more than
    /// `block_count` blocks are produced.
    ///
    /// # Errors
    ///
    /// [`BenchError::DegenerateBlock`] when either setting is zero.
    pub fn resolved_block_size(&self) -> Result<usize> {
        match self.analysis.block_size {
            Some(0) => Err(BenchError::DegenerateBlock(0)),
            Some(size) => Ok(size),
            None => size_for_count(self.workload.sample_count, self.analysis.block_count),
        }
    }
}

/// Parameters of the randomized search workload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Number of distinct values held by both containers
    pub universe_size: usize,
    /// Number of timed trials
    pub sample_count: usize,
    /// Seed for reproducible generation (random when absent)
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Statistical analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Fixed block size for block-wise statistics
    #[serde(default)]
    pub block_size: Option<usize>,
    /// Number of blocks when `block_size` is not set (default: 4)
    #[serde(default = "default_block_count")]
    pub block_count: usize,
    /// Significance level used for the report verdict (default: 0.05)
    #[serde(default = "default_significance")]
    pub significance: f64,
    /// Untimed searches performed before the first trial (default: 0)
    #[serde(default)]
    pub warmup: usize,
    /// Trials between progress log lines (default: 100000)
    #[serde(default = "default_progress_step")]
    pub progress_step: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            block_size: None,
            block_count: DEFAULT_BLOCK_COUNT,
            significance: default_significance(),
            warmup: 0,
            progress_step: default_progress_step(),
        }
    }
}

fn default_block_count() -> usize {
    DEFAULT_BLOCK_COUNT
}

fn default_significance() -> f64 {
    0.05
}

fn default_progress_step() -> usize {
    100_000
}

/// Where and how result tables are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory for tables and reports (default: "results")
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Maximum number of rows written to the samples table
    #[serde(default)]
    pub sample_export_limit: Option<usize>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            sample_export_limit: None,
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("results")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
            [workload]
            universe_size = 1000
            sample_count = 500
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.workload.universe_size, 1000);
        assert_eq!(config.workload.sample_count, 500);
        assert_eq!(config.workload.seed, None);
        assert_eq!(config.analysis.block_size, None);
        assert_eq!(config.analysis.block_count, 4);
        assert_eq!(config.analysis.significance, 0.05);
        assert_eq!(config.analysis.warmup, 0);
        assert_eq!(config.output.directory, PathBuf::from("results"));
        assert_eq!(config.output.sample_export_limit, None);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [workload]
            universe_size = 7000000
            sample_count = 4000000
            seed = 42

            [analysis]
            block_size = 1000000
            significance = 0.01
            warmup = 10
            progress_step = 50000

            [output]
            directory = "out"
            sample_export_limit = 1000
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.workload.seed, Some(42));
        assert_eq!(config.analysis.block_size, Some(1_000_000));
        assert_eq!(config.analysis.significance, 0.01);
        assert_eq!(config.analysis.warmup, 10);
        assert_eq!(config.analysis.progress_step, 50_000);
        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert_eq!(config.output.sample_export_limit, Some(1000));
    }

    #[test]
    fn test_missing_workload_is_rejected() {
        let toml = r#"
            [analysis]
            block_size = 10
        "#;

        assert!(Config::from_str(toml).is_err());
    }

    #[test]
    fn test_workload_spec_mirrors_config() {
        let config = Config::from_str(
            r#"
            [workload]
            universe_size = 10
            sample_count = 5
            seed = 7
        "#,
        )
        .unwrap();

        let spec = config.workload_spec();
        assert_eq!(spec.universe_size, 10);
        assert_eq!(spec.sample_count, 5);
        assert_eq!(spec.seed, Some(7));
    }

    #[test]
    fn test_block_size_defaults_to_four_blocks() {
        let config = Config::from_str(
            r#"
            [workload]
            universe_size = 1000
            sample_count = 500
        "#,
        )
        .unwrap();

        assert_eq!(config.resolved_block_size().unwrap(), 125);
    }

    #[test]
    fn test_block_size_rounds_up() {
        let config = Config::from_str(
            r#"
            [workload]
            universe_size = 1000
            sample_count = 10

            [analysis]
            block_count = 4
        "#,
        )
        .unwrap();

        // 3 + 3 + 3 + 1
        assert_eq!(config.resolved_block_size().unwrap(), 3);
    }

    #[test]
    fn test_explicit_block_size_wins() {
        let config = Config::from_str(
            r#"
            [workload]
            universe_size = 1000
            sample_count = 500

            [analysis]
            block_size = 150
            block_count = 2
        "#,
        )
        .unwrap();

        assert_eq!(config.resolved_block_size().unwrap(), 150);
    }

    #[test]
    fn test_zero_block_size_is_degenerate() {
        let config = Config::from_str(
            r#"
            [workload]
            universe_size = 1000
            sample_count = 500

            [analysis]
            block_size = 0
        "#,
        )
        .unwrap();

        assert!(matches!(
            config.resolved_block_size(),
            Err(BenchError::DegenerateBlock(0))
        ));
    }

    #[test]
    fn test_zero_block_count_is_degenerate() {
        let config = Config::from_str(
            r#"
            [workload]
            universe_size = 1000
            sample_count = 500

            [analysis]
            block_count = 0
        "#,
        )
        .unwrap();

        assert!(matches!(
            config.resolved_block_size(),
            Err(BenchError::DegenerateBlock(0))
        ));
    }
}
