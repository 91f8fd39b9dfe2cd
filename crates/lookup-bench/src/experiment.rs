//! End-to-end experiment driver
//!
//! Wires the stages together in their fixed order: generate the workload,
//! time every trial, then analyse the series. Nothing is persisted here; the
//! caller decides what to do with the returned [`AnalysisResult`].

use chrono::Utc;
use std::time::Instant;
use tracing::{info, instrument};

use crate::config::Config;
use crate::error::Result;
use crate::result::{analyze, AnalysisResult, RunMetadata};
use crate::runner::{BenchmarkRunner, TimingSeries};
use crate::workload::{SampleGenerator, WorkloadSpec};

/// Run the full experiment described by `config`.
///
/// The recorded workload spec always carries the seed that was actually used,
/// so a run without a configured seed can be replayed from its metadata.
///
/// # Errors
///
/// - `BenchError::InvalidSpec` for a zero universe or sample count
/// - `BenchError::DegenerateBlock` for a zero block size or block count
/// - `BenchError::InsufficientData` when fewer than two trials are run
///
/// # Example
///
/// ```
/// use lookup_bench::{experiment, Config};
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_str(r#"
///     [workload]
///     universe_size = 200
///     sample_count = 40
///     seed = 42
/// "#)?;
/// let result = experiment::run_experiment(&config)?;
/// assert_eq!(result.series.len(), 40);
/// assert_eq!(result.blocks.len(), 4);
/// # Ok(())
/// # }
/// ```
#[instrument(skip_all, fields(
    universe = config.workload.universe_size,
    trials = config.workload.sample_count
))]
pub fn run_experiment(config: &Config) -> Result<AnalysisResult> {
    let started_at = Utc::now().to_rfc3339();
    let start_time = Instant::now();

    // Fail on configuration problems before spending time on the run
    let block_size = config.resolved_block_size()?;

    let mut generator = SampleGenerator::new(config.workload_spec())?;
    let workload = generator.generate();
    let spec = WorkloadSpec {
        seed: Some(generator.seed()),
        ..*generator.spec()
    };
    info!(
        "Generated workload: {} values, {} queries, seed {}",
        workload.universe.len(),
        workload.queries.len(),
        workload.seed
    );

    let series = BenchmarkRunner::from_config(config).run(&workload);

    let metadata = RunMetadata {
        workload: Some(spec),
        block_size,
        started_at,
        total_duration_ms: 0,
    };
    let mut result = analyze(series, metadata)?;
    result.metadata.total_duration_ms = start_time.elapsed().as_millis() as u64;

    info!(
        "Experiment finished in {}ms",
        result.metadata.total_duration_ms
    );
    Ok(result)
}

/// Analyse a previously recorded series.
///
/// The metadata carries no workload since the series was not generated by
/// this run.
///
/// # Errors
///
/// Same as [`analyze`].
#[instrument(skip(series), fields(samples = series.len()))]
pub fn reanalyze(series: TimingSeries, block_size: usize) -> Result<AnalysisResult> {
    let start_time = Instant::now();
    let metadata = RunMetadata {
        workload: None,
        block_size,
        started_at: Utc::now().to_rfc3339(),
        total_duration_ms: 0,
    };
    let mut result = analyze(series, metadata)?;
    result.metadata.total_duration_ms = start_time.elapsed().as_millis() as u64;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BenchError;
    use crate::search::Structure;

    fn config(universe_size: usize, sample_count: usize, seed: Option<u64>) -> Config {
        let seed_line = seed.map(|s| format!("seed = {s}")).unwrap_or_default();
        Config::from_str(&format!(
            r#"
            [workload]
            universe_size = {universe_size}
            sample_count = {sample_count}
            {seed_line}
        "#
        ))
        .unwrap()
    }

    #[test]
    fn test_run_experiment_records_metadata() {
        let result = run_experiment(&config(1000, 200, Some(42))).unwrap();

        let spec = result.metadata.workload.unwrap();
        assert_eq!(spec.universe_size, 1000);
        assert_eq!(spec.sample_count, 200);
        assert_eq!(spec.seed, Some(42));
        assert_eq!(result.metadata.block_size, 50);
        assert!(chrono::DateTime::parse_from_rfc3339(&result.metadata.started_at).is_ok());
    }

    #[test]
    fn test_unseeded_run_records_drawn_seed() {
        let first = run_experiment(&config(500, 50, None)).unwrap();
        let seed = first.metadata.workload.unwrap().seed;
        assert!(seed.is_some());

        let replay = run_experiment(&config(500, 50, seed)).unwrap();
        assert_eq!(
            first.series.queried_values(),
            replay.series.queried_values()
        );
    }

    #[test]
    fn test_invalid_spec_fails_before_running() {
        assert!(matches!(
            run_experiment(&config(0, 10, Some(1))),
            Err(BenchError::InvalidSpec(_))
        ));
        assert!(matches!(
            run_experiment(&config(10, 0, Some(1))),
            Err(BenchError::InvalidSpec(_))
        ));
    }

    #[test]
    fn test_single_trial_run_is_insufficient() {
        assert!(matches!(
            run_experiment(&config(10, 1, Some(1))),
            Err(BenchError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_reanalyze_has_no_workload() {
        let first = run_experiment(&config(300, 60, Some(3))).unwrap();
        let result = reanalyze(first.series.clone(), 20).unwrap();

        assert_eq!(result.metadata.workload, None);
        assert_eq!(result.blocks.len(), 3);
        assert_eq!(
            result.stats(Structure::List),
            first.stats(Structure::List)
        );
    }
}
