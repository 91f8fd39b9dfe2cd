//! Benchmark execution
//!
//! This module times the searches. Every trial performs exactly one list
//! search followed by one dictionary search for the same query value, so the
//! two readings of a trial are paired observations.
//!
//! # Timing isolation
//!
//! Containers and queries are built before the first clock read. Inside a
//! trial only the search itself runs between the two clock reads; the sample
//! buffer is allocated up front and progress logging happens between trials.
//! Everything runs on the calling thread.
//!
//! Absolute timings depend on the host and its load. Compare them relative to
//! each other, never against fixed thresholds.
//!
//! # Example
//!
//! ```
//! use lookup_bench::runner::BenchmarkRunner;
//! use lookup_bench::workload::{SampleGenerator, WorkloadSpec};
//!
//! let spec = WorkloadSpec { universe_size: 1000, sample_count: 50, seed: Some(42) };
//! let workload = SampleGenerator::new(spec).unwrap().generate();
//!
//! let series = BenchmarkRunner::new().run(&workload);
//! assert_eq!(series.len(), 50);
//! assert_eq!(series.samples()[0].trial_index, 0);
//! ```

use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error::{BenchError, Result};
use crate::search::{Structure, TimedSearch};
use crate::workload::Workload;

/// One trial: a query value and the time taken to find it in each container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingSample {
    /// 0-based position of the trial in the run
    pub trial_index: usize,
    /// Value searched for
    pub queried_value: u64,
    /// List search time in seconds
    pub list_time: f64,
    /// Dictionary search time in seconds
    pub dict_time: f64,
}

impl TimingSample {
    /// Timing of one of the two structures
    pub fn time(&self, structure: Structure) -> f64 {
        match structure {
            Structure::List => self.list_time,
            Structure::Dict => self.dict_time,
        }
    }

    /// Store a reading in the column of `structure`
    pub fn set_time(&mut self, structure: Structure, seconds: f64) {
        match structure {
            Structure::List => self.list_time = seconds,
            Structure::Dict => self.dict_time = seconds,
        }
    }
}

/// Ordered timing samples of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimingSeries {
    samples: Vec<TimingSample>,
}

impl TimingSeries {
    /// Wrap samples after checking they form a valid run.
    ///
    /// # Errors
    ///
    /// [`BenchError::InvalidSeries`] unless trial indices run `0, 1, 2, ...`
    /// in order and every timing is finite and non-negative.
    pub fn from_samples(samples: Vec<TimingSample>) -> Result<Self> {
        for (position, sample) in samples.iter().enumerate() {
            if sample.trial_index != position {
                return Err(BenchError::InvalidSeries(format!(
                    "expected trial_index {} at position {}, found {}",
                    position, position, sample.trial_index
                )));
            }
            for structure in [Structure::List, Structure::Dict] {
                let time = sample.time(structure);
                if !time.is_finite() || time < 0.0 {
                    return Err(BenchError::InvalidSeries(format!(
                        "trial {} has invalid {} time {}",
                        position, structure, time
                    )));
                }
            }
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[TimingSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The timing column of one structure, in trial order
    pub fn column(&self, structure: Structure) -> Vec<f64> {
        self.samples.iter().map(|s| s.time(structure)).collect()
    }

    pub fn list_times(&self) -> Vec<f64> {
        self.column(Structure::List)
    }

    pub fn dict_times(&self) -> Vec<f64> {
        self.column(Structure::Dict)
    }

    /// Queried values in trial order
    pub fn queried_values(&self) -> Vec<u64> {
        self.samples.iter().map(|s| s.queried_value).collect()
    }
}

/// The benchmark runner
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    warmup: usize,
    progress_step: usize,
}

impl Default for BenchmarkRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl BenchmarkRunner {
    /// Runner without warmup that logs progress every 100000 trials
    pub fn new() -> Self {
        Self {
            warmup: 0,
            progress_step: 100_000,
        }
    }

    /// Runner configured from the `[analysis]` table
    pub fn from_config(config: &Config) -> Self {
        Self {
            warmup: config.analysis.warmup,
            progress_step: config.analysis.progress_step,
        }
    }

    /// Number of untimed searches per container before the first trial
    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    /// Trials between progress log lines (0 disables progress logging)
    pub fn with_progress_step(mut self, progress_step: usize) -> Self {
        self.progress_step = progress_step;
        self
    }

    /// Build the containers of a workload and time every query.
    #[instrument(skip_all, fields(universe = workload.universe.len(), trials = workload.queries.len()))]
    pub fn run(&self, workload: &Workload) -> TimingSeries {
        let (list, dict) = workload.containers();
        self.measure(&list, &dict, &workload.queries)
    }

    /// Time one search in each container per query, in order.
    ///
    /// `first` is searched before `second` in every trial. Each reading is
    /// stored in the column named by its container's [`TimedSearch::STRUCTURE`],
    /// so the two containers must be of different structures.
    ///
    /// The containers are only borrowed immutably, so every trial sees the
    /// same container state.
    pub fn measure<A, B>(&self, first: &A, second: &B, queries: &[u64]) -> TimingSeries
    where
        A: TimedSearch,
        B: TimedSearch,
    {
        debug_assert_ne!(A::STRUCTURE, B::STRUCTURE);

        if self.warmup > 0 {
            debug!(warmup = self.warmup, "Running untimed warmup searches");
            for &value in queries.iter().cycle().take(self.warmup) {
                black_box(first.contains(value));
                black_box(second.contains(value));
            }
        }

        info!(
            "Timing {} trials ({} then {}, {} values per container)",
            queries.len(),
            A::STRUCTURE,
            B::STRUCTURE,
            first.len()
        );

        let start_time = Instant::now();
        let mut samples = Vec::with_capacity(queries.len());

        for (trial_index, &value) in queries.iter().enumerate() {
            let first_time = first.timed_search(value);
            let second_time = second.timed_search(value);

            let mut sample = TimingSample {
                trial_index,
                queried_value: value,
                list_time: 0.0,
                dict_time: 0.0,
            };
            sample.set_time(A::STRUCTURE, first_time.as_secs_f64());
            sample.set_time(B::STRUCTURE, second_time.as_secs_f64());
            samples.push(sample);

            if self.progress_step > 0 && (trial_index + 1) % self.progress_step == 0 {
                debug!(
                    "Progress: {}/{} trials ({:.1}%) after {:.1}s",
                    trial_index + 1,
                    queries.len(),
                    (trial_index + 1) as f64 / queries.len() as f64 * 100.0,
                    start_time.elapsed().as_secs_f64()
                );
            }
        }

        info!(
            "Timed {} trials in {:.3}s",
            samples.len(),
            start_time.elapsed().as_secs_f64()
        );

        TimingSeries { samples }
    }
}
