//! Lookup benchmark for list and dictionary membership searches
//!
//! This crate measures how long it takes to find a value in an unordered list
//! versus a hash-based dictionary holding the same values, and compares the
//! two timing distributions statistically.
//!
//! # Features
//!
//! - **Reproducible workloads**: seeded generation of the value universe and queries
//! - **Paired timing**: one list search and one dictionary search per trial
//! - **Statistical Analysis**: descriptive statistics, block-wise summaries and Welch's t-test
//! - **Persistence**: delimited tables that can be read back for re-analysis
//! - **Multiple Output Formats**: JSON, Console, Markdown and plain text reports
//!
//! # Example
//!
//! ```no_run
//! use lookup_bench::{experiment, Config, reporter::{Reporter, OutputFormat}};
//!
//! # fn example() -> anyhow::Result<()> {
//! // Load configuration
//! let config = Config::from_file("lookup.toml")?;
//!
//! // Generate the workload, time it and analyse the samples
//! let result = experiment::run_experiment(&config)?;
//!
//! // Report results
//! let reporter = Reporter::new(OutputFormat::Console, config.analysis.significance);
//! reporter.report(&result)?;
//!
//! // Or save to file
//! Reporter::new(OutputFormat::Json, config.analysis.significance)
//!     .write_to_file(&result, "results.json")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! Runs are configured using TOML files:
//!
//! ```toml
//! [workload]
//! universe_size = 1000
//! sample_count = 500
//! seed = 42
//!
//! [analysis]
//! block_count = 4
//! significance = 0.05
//!
//! [output]
//! directory = "results"
//! sample_export_limit = 1000
//! ```

pub mod config;
pub mod error;
pub mod experiment;
pub mod plot;
pub mod reporter;
pub mod result;
pub mod runner;
pub mod search;
pub mod stats;
pub mod tables;
pub mod workload;

// Re-export main types for convenience
pub use config::Config;
pub use error::{BenchError, Result};
pub use reporter::{OutputFormat, Reporter};
pub use result::{AnalysisResult, GlobalStats, RunMetadata};
pub use runner::{BenchmarkRunner, TimingSample, TimingSeries};
pub use search::{DictContainer, ListContainer, Structure, TimedSearch};
pub use workload::{SampleGenerator, Workload, WorkloadSpec};
