//! Delimited-text tables
//!
//! Writes the samples, global summary, block summary and hypothesis tables,
//! one record per line with a header and a stable column order. The samples
//! table can be read back for re-analysis.
//!
//! Floating-point values are written with Rust's shortest round-trip
//! formatting, so a samples table read back yields the exact timings that
//! were written. An undefined standard deviation is written as `NaN`.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{BenchError, Result};
use crate::result::AnalysisResult;
use crate::runner::{TimingSample, TimingSeries};
use crate::search::Structure;
use crate::stats::{BlockStats, DescriptiveStats, HypothesisTestResult};

pub const SAMPLES_FILE: &str = "samples.csv";
pub const SUMMARY_FILE: &str = "summary.csv";
pub const BLOCKS_FILE: &str = "blocks.csv";
pub const HYPOTHESIS_FILE: &str = "hypothesis.csv";

pub const SAMPLES_HEADER: [&str; 4] = ["trial_index", "queried_value", "list_time", "dict_time"];

const STATS_HEADER: [&str; 10] = [
    "structure", "n", "mean", "median", "stddev", "q1", "q3", "min", "max", "pstddev",
];

const HYPOTHESIS_HEADER: [&str; 5] = [
    "statistic",
    "degrees_of_freedom",
    "p_value",
    "p_less",
    "p_greater",
];

/// Separators recognised when reading a table, in order of preference
const SEPARATORS: [char; 3] = [',', '\t', ';'];

/// Write the samples table, keeping at most `limit` rows.
pub fn write_samples<W: Write>(out: &mut W, series: &TimingSeries, limit: Option<usize>) -> Result<()> {
    writeln!(out, "{}", SAMPLES_HEADER.join(","))?;
    for sample in series.samples().iter().take(limit.unwrap_or(usize::MAX)) {
        writeln!(
            out,
            "{},{},{},{}",
            sample.trial_index, sample.queried_value, sample.list_time, sample.dict_time
        )?;
    }
    Ok(())
}

/// Write one row per structure with the global summaries.
pub fn write_summary<W: Write>(out: &mut W, result: &AnalysisResult) -> Result<()> {
    writeln!(out, "{}", STATS_HEADER.join(","))?;
    for structure in [Structure::List, Structure::Dict] {
        writeln!(out, "{}", stats_row(structure, result.stats(structure)))?;
    }
    Ok(())
}

/// Write one row per structure per block, blocks in index order.
pub fn write_blocks<W: Write>(out: &mut W, blocks: &[BlockStats]) -> Result<()> {
    writeln!(
        out,
        "block_index,block_start,block_end,{}",
        STATS_HEADER.join(",")
    )?;
    for block in blocks {
        for structure in [Structure::List, Structure::Dict] {
            writeln!(
                out,
                "{},{},{},{}",
                block.block.index,
                block.block.start,
                block.block.end,
                stats_row(structure, block.for_structure(structure))
            )?;
        }
    }
    Ok(())
}

/// Write the single-row hypothesis table.
pub fn write_hypothesis<W: Write>(out: &mut W, test: &HypothesisTestResult) -> Result<()> {
    writeln!(out, "{}", HYPOTHESIS_HEADER.join(","))?;
    writeln!(
        out,
        "{},{},{},{},{}",
        test.statistic, test.degrees_of_freedom, test.p_value, test.p_less, test.p_greater
    )?;
    Ok(())
}

fn stats_row(structure: Structure, stats: &DescriptiveStats) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{}",
        structure,
        stats.n,
        stats.mean,
        stats.median,
        stats.stddev.unwrap_or(f64::NAN),
        stats.q1,
        stats.q3,
        stats.min,
        stats.max,
        stats.pstddev
    )
}

/// Write all four tables into `dir`, creating it if needed.
///
/// Returns the paths written, in the order samples, summary, blocks,
/// hypothesis.
pub fn write_all<P: AsRef<Path>>(
    result: &AnalysisResult,
    dir: P,
    sample_limit: Option<usize>,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let samples = dir.join(SAMPLES_FILE);
    write_file(&samples, |out| write_samples(out, &result.series, sample_limit))?;

    let summary = dir.join(SUMMARY_FILE);
    write_file(&summary, |out| write_summary(out, result))?;

    let blocks = dir.join(BLOCKS_FILE);
    write_file(&blocks, |out| write_blocks(out, &result.blocks))?;

    let hypothesis = dir.join(HYPOTHESIS_FILE);
    write_file(&hypothesis, |out| write_hypothesis(out, &result.hypothesis))?;

    info!("Wrote tables to {}", dir.display());
    Ok(vec![samples, summary, blocks, hypothesis])
}

fn write_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let mut out = BufWriter::new(File::create(path)?);
    write(&mut out)?;
    out.flush()?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Read a samples table written by [`write_samples`] or an equivalent tool.
///
/// The separator (`,`, tab or `;`) is taken from the header line. Columns are
/// located by name, so their order does not matter and extra columns are
/// ignored. Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// - [`BenchError::Parse`] for a missing header, a missing column or an
///   unparsable value (line numbers are 1-based)
/// - [`BenchError::InvalidSeries`] when the rows do not form a valid series
pub fn read_samples<P: AsRef<Path>>(path: P) -> Result<TimingSeries> {
    let path = path.as_ref();
    let series = parse_samples(BufReader::new(File::open(path)?))?;
    info!("Read {} samples from {}", series.len(), path.display());
    Ok(series)
}

/// Parse a samples table from any buffered reader.
pub fn parse_samples<R: BufRead>(reader: R) -> Result<TimingSeries> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| {
            line.as_ref()
                .map(|l| !l.trim().is_empty() && !l.trim_start().starts_with('#'))
                .unwrap_or(true)
        });

    let (header_line, header) = match lines.next() {
        Some((line, header)) => (line, header?),
        None => {
            return Err(BenchError::Parse {
                line: 1,
                message: "missing header".to_string(),
            })
        }
    };

    let separator = detect_separator(&header);
    let names: Vec<&str> = header.split(separator).map(str::trim).collect();
    let mut columns = [0usize; 4];
    for (slot, wanted) in columns.iter_mut().zip(SAMPLES_HEADER) {
        *slot = names
            .iter()
            .position(|name| *name == wanted)
            .ok_or_else(|| BenchError::Parse {
                line: header_line,
                message: format!("missing column '{}'", wanted),
            })?;
    }
    let [index_col, value_col, list_col, dict_col] = columns;

    let mut samples = Vec::new();
    for (line_num, line) in lines {
        let line = line?;
        let fields: Vec<&str> = line.split(separator).map(str::trim).collect();

        samples.push(TimingSample {
            trial_index: parse_field(&fields, index_col, line_num)?,
            queried_value: parse_field(&fields, value_col, line_num)?,
            list_time: parse_field(&fields, list_col, line_num)?,
            dict_time: parse_field(&fields, dict_col, line_num)?,
        });
    }

    TimingSeries::from_samples(samples)
}

fn detect_separator(header: &str) -> char {
    SEPARATORS
        .into_iter()
        .find(|sep| header.contains(*sep))
        .unwrap_or(',')
}

fn parse_field<T: std::str::FromStr>(fields: &[&str], column: usize, line: usize) -> Result<T> {
    let raw = fields.get(column).ok_or_else(|| BenchError::Parse {
        line,
        message: format!("expected at least {} columns, got {}", column + 1, fields.len()),
    })?;
    raw.parse().map_err(|_| BenchError::Parse {
        line,
        message: format!("invalid value '{}'", raw),
    })
}
