//! Lookup benchmark binary
//!
//! `run` generates a workload, times it and writes every table and report.
//! `analyze` re-analyses a samples table saved by an earlier run.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lookup_bench::config::{AnalysisConfig, OutputConfig, WorkloadConfig, DEFAULT_BLOCK_COUNT};
use lookup_bench::plot::{PlotInput, PLOT_INPUT_FILE};
use lookup_bench::reporter::{OutputFormat, Reporter};
use lookup_bench::stats::size_for_count;
use lookup_bench::{experiment, tables, AnalysisResult, Config};

#[derive(Parser, Debug)]
#[command(name = "lookup-bench")]
#[command(
    version,
    about = "Compare list and dictionary lookup times with descriptive statistics and Welch's t-test"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a workload, time it and write the results
    Run(RunArgs),
    /// Re-analyse a saved samples table
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of distinct values in both containers
    #[arg(long)]
    universe_size: Option<usize>,

    /// Number of timed trials
    #[arg(long)]
    samples: Option<usize>,

    /// Seed for the workload generator
    #[arg(long)]
    seed: Option<u64>,

    /// Untimed searches before the first trial
    #[arg(long)]
    warmup: Option<usize>,

    /// Maximum number of rows in the samples table
    #[arg(long)]
    sample_limit: Option<usize>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Samples table to re-analyse
    input: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Trials per block (overrides --block-count)
    #[arg(long)]
    block_size: Option<usize>,

    /// Number of blocks when no block size is given
    #[arg(long)]
    block_count: Option<usize>,

    /// Significance level for the verdict
    #[arg(long)]
    significance: Option<f64>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format printed to stdout: console, json, json-pretty, markdown, text
    #[arg(short, long, default_value = "console")]
    format: OutputFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the report, logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("lookup-bench v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Run(args) => run(args),
        Command::Analyze(args) => analyze(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let result = experiment::run_experiment(&config).context("Benchmark run failed")?;

    write_outputs(
        &result,
        &config.output.directory,
        config.output.sample_export_limit,
        config.analysis.significance,
    )?;
    Reporter::new(args.common.format, config.analysis.significance).report(&result)
}

fn analyze(args: AnalyzeArgs) -> Result<()> {
    let series = tables::read_samples(&args.input)
        .with_context(|| format!("Failed to read samples from {}", args.input.display()))?;

    let common = &args.common;
    let block_size = match common.block_size {
        Some(size) => size,
        None => size_for_count(
            series.len(),
            common.block_count.unwrap_or(DEFAULT_BLOCK_COUNT),
        )?,
    };
    let significance = common
        .significance
        .unwrap_or_else(|| AnalysisConfig::default().significance);
    let directory = common
        .output
        .clone()
        .unwrap_or_else(|| OutputConfig::default().directory);

    let result = experiment::reanalyze(series, block_size).context("Analysis failed")?;

    write_outputs(&result, &directory, None, significance)?;
    Reporter::new(common.format, significance).report(&result)
}

/// Load the config file if given, then apply command-line overrides.
fn resolve_config(args: &RunArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => {
            let (Some(universe_size), Some(sample_count)) = (args.universe_size, args.samples)
            else {
                bail!("Either --config or both --universe-size and --samples are required");
            };
            Config {
                workload: WorkloadConfig {
                    universe_size,
                    sample_count,
                    seed: None,
                },
                analysis: AnalysisConfig::default(),
                output: OutputConfig::default(),
            }
        }
    };

    if let Some(universe_size) = args.universe_size {
        config.workload.universe_size = universe_size;
    }
    if let Some(sample_count) = args.samples {
        config.workload.sample_count = sample_count;
    }
    if args.seed.is_some() {
        config.workload.seed = args.seed;
    }
    if let Some(warmup) = args.warmup {
        config.analysis.warmup = warmup;
    }
    if args.sample_limit.is_some() {
        config.output.sample_export_limit = args.sample_limit;
    }

    let common = &args.common;
    if common.block_size.is_some() {
        config.analysis.block_size = common.block_size;
    }
    if let Some(block_count) = common.block_count {
        config.analysis.block_count = block_count;
    }
    if let Some(significance) = common.significance {
        config.analysis.significance = significance;
    }
    if let Some(directory) = &common.output {
        config.output.directory = directory.clone();
    }

    Ok(config)
}

/// Write tables, plotting input and reports. Only called once the analysis
/// has succeeded.
fn write_outputs(
    result: &AnalysisResult,
    directory: &Path,
    sample_limit: Option<usize>,
    significance: f64,
) -> Result<()> {
    tables::write_all(result, directory, sample_limit)
        .with_context(|| format!("Failed to write tables to {}", directory.display()))?;

    PlotInput::from_result(result)
        .write_to_file(directory.join(PLOT_INPUT_FILE))
        .context("Failed to write plot input")?;

    Reporter::new(OutputFormat::Text, significance)
        .write_to_file(result, directory.join("report.txt"))?;
    Reporter::new(OutputFormat::JsonPretty, significance)
        .write_to_file(result, directory.join("results.json"))?;

    tracing::info!("Results written to {}", directory.display());
    Ok(())
}
