//! Workload generation
//!
//! Builds the shared universe of distinct values, the two containers backed by
//! it, and the sequence of query values searched during the run.
//!
//! The random generator is owned by a [`SampleGenerator`] and seeded
//! explicitly. A run without a configured seed draws one up front and records
//! it, so every workload can be regenerated exactly.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{BenchError, Result};
use crate::search::{DictContainer, ListContainer};

/// Size and reproducibility parameters of a workload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadSpec {
    /// Number of distinct values held by both containers
    pub universe_size: usize,
    /// Number of query values (one per trial)
    pub sample_count: usize,
    /// Seed for reproducible generation
    pub seed: Option<u64>,
}

impl WorkloadSpec {
    /// Check that both sizes are positive.
    ///
    /// # Errors
    ///
    /// [`BenchError::InvalidSpec`] when `universe_size` or `sample_count` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.universe_size < 1 {
            return Err(BenchError::InvalidSpec(
                "universe_size must be at least 1".to_string(),
            ));
        }
        if self.sample_count < 1 {
            return Err(BenchError::InvalidSpec(
                "sample_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A generated workload: the universe and the queries drawn from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    /// Seed the workload was generated from
    pub seed: u64,
    /// Distinct values, in list order
    pub universe: Vec<u64>,
    /// Query values in trial order (repetition allowed)
    pub queries: Vec<u64>,
}

impl Workload {
    /// Build the list container (universe order preserved)
    pub fn list(&self) -> ListContainer {
        ListContainer::new(self.universe.clone())
    }

    /// Build the dictionary container from the same values
    pub fn dict(&self) -> DictContainer {
        DictContainer::from_values(&self.universe)
    }

    /// Build both containers.
    ///
    /// They hold exactly the same value set, so a search for one key is a fair
    /// comparison between them.
    pub fn containers(&self) -> (ListContainer, DictContainer) {
        (self.list(), self.dict())
    }
}

/// Seeded generator of workloads
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    spec: WorkloadSpec,
    seed: u64,
    rng: Xoshiro256PlusPlus,
}

impl SampleGenerator {
    /// Create a generator for a validated spec.
    ///
    /// Uses `spec.seed` when present; otherwise a fresh seed is drawn from the
    /// thread-local generator and kept for [`SampleGenerator::seed`].
    ///
    /// # Example
    ///
    /// ```
    /// use lookup_bench::workload::{SampleGenerator, WorkloadSpec};
    ///
    /// let spec = WorkloadSpec { universe_size: 100, sample_count: 10, seed: Some(42) };
    /// let workload = SampleGenerator::new(spec).unwrap().generate();
    /// assert_eq!(workload.universe.len(), 100);
    /// assert_eq!(workload.queries.len(), 10);
    /// ```
    pub fn new(spec: WorkloadSpec) -> Result<Self> {
        spec.validate()?;
        let seed = match spec.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::thread_rng().gen::<u64>();
                info!(seed, "No seed configured, drew a random one");
                seed
            }
        };
        Ok(Self {
            spec,
            seed,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        })
    }

    /// Seed in effect for this generator
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Spec this generator was created from
    pub fn spec(&self) -> &WorkloadSpec {
        &self.spec
    }

    /// Generate the universe and the query sequence.
    ///
    /// The universe is `0..universe_size` in shuffled order, so the position
    /// of a value in the list is uniformly distributed. Queries are drawn
    /// uniformly with replacement from the universe.
    pub fn generate(&mut self) -> Workload {
        let mut universe: Vec<u64> = (0..self.spec.universe_size as u64).collect();
        universe.shuffle(&mut self.rng);

        let queries: Vec<u64> = (0..self.spec.sample_count)
            .map(|_| universe[self.rng.gen_range(0..universe.len())])
            .collect();

        debug!(
            universe_size = universe.len(),
            sample_count = queries.len(),
            seed = self.seed,
            "Generated workload"
        );

        Workload {
            seed: self.seed,
            universe,
            queries,
        }
    }
}
