//! The two searchable containers.
//!
//! Both implement [`TimedSearch`], so the harness times them through one code
//! path. Searching takes `&self` and never reorders or mutates a container.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Which container a measurement belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Structure {
    List,
    Dict,
}

impl Structure {
    /// Label used in tables and reports
    pub fn label(&self) -> &'static str {
        match self {
            Structure::List => "list",
            Structure::Dict => "dict",
        }
    }
}

impl std::fmt::Display for Structure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A container whose membership search can be timed.
pub trait TimedSearch {
    /// Which structure this is
    const STRUCTURE: Structure;

    /// Membership test for `value`
    fn contains(&self, value: u64) -> bool;

    /// Number of stored values
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Time a single membership search.
    ///
    /// Only the search sits between the two clock reads. The query and the
    /// outcome pass through [`black_box`] so the search cannot be hoisted or
    /// discarded by the optimizer.
    #[inline]
    fn timed_search(&self, value: u64) -> Duration {
        let value = black_box(value);
        let start = Instant::now();
        let found = self.contains(value);
        let elapsed = start.elapsed();
        black_box(found);
        elapsed
    }
}

/// Unordered sequence searched linearly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListContainer {
    values: Vec<u64>,
}

impl ListContainer {
    pub fn new(values: Vec<u64>) -> Self {
        Self { values }
    }

    /// Stored values in list order
    pub fn values(&self) -> &[u64] {
        &self.values
    }
}

impl TimedSearch for ListContainer {
    const STRUCTURE: Structure = Structure::List;

    #[inline]
    fn contains(&self, value: u64) -> bool {
        self.values.contains(&value)
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}

/// Hash map from each value to its presence flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictContainer {
    entries: HashMap<u64, bool>,
}

impl DictContainer {
    pub fn from_values(values: &[u64]) -> Self {
        let entries = values.iter().map(|&v| (v, true)).collect();
        Self { entries }
    }
}

impl TimedSearch for DictContainer {
    const STRUCTURE: Structure = Structure::Dict;

    #[inline]
    fn contains(&self, value: u64) -> bool {
        self.entries.contains_key(&value)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
