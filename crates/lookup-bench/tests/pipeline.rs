//! End-to-end tests of the measurement and analysis pipeline
//!
//! Absolute timings depend on the machine, so these tests only check
//! counts, ordering and the expected direction of the comparison.

use lookup_bench::stats::Verdict;
use lookup_bench::{experiment, BenchError, Config, SampleGenerator, Structure, WorkloadSpec};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Route pipeline logs through the test harness; `RUST_LOG` selects the level
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Log sink shared between a subscriber and the test body
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn config(universe_size: usize, sample_count: usize, seed: u64, analysis: &str) -> Config {
    Config::from_str(&format!(
        "[workload]\nuniverse_size = {universe_size}\nsample_count = {sample_count}\nseed = {seed}\n\n[analysis]\n{analysis}\n"
    ))
    .unwrap()
}

#[test]
fn test_seeded_run_of_500_trials() {
    init_tracing();
    let result = experiment::run_experiment(&config(1000, 500, 42, "")).unwrap();

    assert_eq!(result.series.len(), 500);
    for (i, sample) in result.series.samples().iter().enumerate() {
        assert_eq!(sample.trial_index, i);
        assert!(sample.queried_value < 1000);
    }
    assert_eq!(result.global.list.n, 500);
    assert_eq!(result.global.dict.n, 500);
    assert!(result.stats(Structure::Dict).mean < result.stats(Structure::List).mean);
}

#[test]
fn test_dictionary_wins_on_large_universe() {
    init_tracing();
    let result = experiment::run_experiment(&config(20_000, 2000, 42, "warmup = 100")).unwrap();

    assert!(result.hypothesis.statistic > 0.0);
    assert_eq!(result.hypothesis.verdict(0.05), Verdict::DictFaster);
}

#[test]
fn test_queries_are_reproducible() {
    init_tracing();
    let a = experiment::run_experiment(&config(1000, 300, 7, "")).unwrap();
    let b = experiment::run_experiment(&config(1000, 300, 7, "")).unwrap();

    assert_eq!(a.series.queried_values(), b.series.queried_values());
    assert_eq!(a.metadata.workload, b.metadata.workload);
}

#[test]
fn test_workload_contents_are_reproducible() {
    init_tracing();
    let spec = WorkloadSpec {
        universe_size: 500,
        sample_count: 100,
        seed: Some(11),
    };
    let a = SampleGenerator::new(spec).unwrap().generate();
    let b = SampleGenerator::new(spec).unwrap().generate();

    assert_eq!(a, b);
    assert_eq!(a.list(), b.list());
    assert_eq!(a.dict(), b.dict());
}

#[test]
fn test_block_partition_of_500_trials() {
    init_tracing();
    let even = experiment::run_experiment(&config(1000, 500, 42, "block_size = 100")).unwrap();
    assert_eq!(even.blocks.len(), 5);
    assert!(even.blocks.iter().all(|b| b.list.n == 100 && b.dict.n == 100));

    let uneven = experiment::run_experiment(&config(1000, 500, 42, "block_size = 150")).unwrap();
    let sizes: Vec<usize> = uneven.blocks.iter().map(|b| b.list.n).collect();
    assert_eq!(sizes, vec![150, 150, 150, 50]);
}

#[test]
fn test_block_counts_sum_to_trials() {
    init_tracing();
    let result = experiment::run_experiment(&config(1000, 333, 5, "block_count = 4")).unwrap();

    assert_eq!(result.blocks.len(), 4);
    assert_eq!(result.blocks.iter().map(|b| b.dict.n).sum::<usize>(), 333);
}

#[test]
fn test_order_statistics_are_ordered() {
    init_tracing();
    let result = experiment::run_experiment(&config(1000, 400, 3, "")).unwrap();

    for structure in [Structure::List, Structure::Dict] {
        let s = result.stats(structure);
        assert!(s.min <= s.q1 && s.q1 <= s.median && s.median <= s.q3 && s.q3 <= s.max);
        assert!(s.min <= s.mean && s.mean <= s.max);
    }
}

#[test]
fn test_failures_abort_the_run() {
    init_tracing();
    assert!(matches!(
        experiment::run_experiment(&config(1000, 500, 42, "block_size = 0")),
        Err(BenchError::DegenerateBlock(0))
    ));
    assert!(matches!(
        experiment::run_experiment(&config(1000, 1, 42, "")),
        Err(BenchError::InsufficientData { .. })
    ));
}

#[test]
fn test_run_logs_workload_and_duration() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        experiment::run_experiment(&config(200, 40, 11, ""))
    })
    .unwrap();

    let output = logs.contents();
    assert_eq!(result.series.len(), 40);
    assert!(output.contains("Generated workload: 200 values, 40 queries, seed 11"));
    assert!(output.contains("Timing 40 trials (list then dict, 200 values per container)"));
    assert!(output.contains("Experiment finished in"));
}
