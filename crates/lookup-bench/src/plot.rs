//! Plotting hand-off
//!
//! Rendering happens outside this crate. [`PlotInput`] collects what a plot
//! needs (the two raw timing columns, the block summaries and one boxplot box
//! per block and structure) and serialises it as JSON. Nothing here computes statistics; every number is copied from
//! an [`AnalysisResult`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::result::AnalysisResult;
use crate::search::Structure;
use crate::stats::BlockStats;

pub const PLOT_INPUT_FILE: &str = "plot_input.json";

/// One box of a block-wise boxplot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxplotEntry {
    pub block_index: usize,
    pub structure: Structure,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Data handed to an external plotting tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotInput {
    /// Raw list timings in trial order (histograms)
    pub list_times: Vec<f64>,
    /// Raw dictionary timings in trial order
    pub dict_times: Vec<f64>,
    /// Block summaries in block order
    pub blocks: Vec<BlockStats>,
    /// Boxplot boxes, list then dictionary for each block
    pub boxes: Vec<BoxplotEntry>,
}

fn boxplot(blocks: &[BlockStats]) -> Vec<BoxplotEntry> {
    blocks
        .iter()
        .flat_map(|block| {
            [Structure::List, Structure::Dict].map(|structure| {
                let stats = block.for_structure(structure);
                BoxplotEntry {
                    block_index: block.block.index,
                    structure,
                    min: stats.min,
                    q1: stats.q1,
                    median: stats.median,
                    q3: stats.q3,
                    max: stats.max,
                }
            })
        })
        .collect()
}

impl PlotInput {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            list_times: result.series.list_times(),
            dict_times: result.series.dict_times(),
            blocks: result.blocks.clone(),
            boxes: boxplot(&result.blocks),
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json(true)?)?;
        Ok(())
    }
}
