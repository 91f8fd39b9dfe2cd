//! Percentile calculations and descriptive summaries.
//!
//! Quartiles and the median use linear interpolation between order
//! statistics: for `n` sorted values the `p`-th percentile sits at rank
//! `p / 100 * (n - 1)`. The same rule is used for global and block-wise
//! summaries so they can be compared directly.

use serde::{Deserialize, Serialize};

/// Calculate percentile value from a slice of f64 samples.
///
/// Uses linear interpolation between nearest ranks.
///
/// # Arguments
///
/// * `samples` - Slice of samples (sorted internally on a copy)
/// * `p` - Percentile to calculate (0.0 to 100.0)
///
/// # Returns
///
/// * `Some(value)` - The percentile value
/// * `None` - If samples is empty or p is invalid
///
/// # Examples
///
/// ```
/// use lookup_bench::stats::percentiles::percentile;
///
/// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let p50 = percentile(&data, 50.0);
/// assert_eq!(p50, Some(3.0));
/// ```
pub fn percentile(samples: &[f64], p: f64) -> Option<f64> {
    let sorted = sorted_copy(samples);
    percentile_of_sorted(&sorted, p)
}

/// Same as [`percentile`] for a slice that is already sorted ascending.
pub fn percentile_of_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }

    if sorted.len() == 1 {
        return Some(sorted[0]);
    }

    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower_index = rank.floor() as usize;
    let upper_index = rank.ceil() as usize;

    if lower_index == upper_index {
        Some(sorted[lower_index])
    } else {
        let lower_value = sorted[lower_index];
        let upper_value = sorted[upper_index];
        let fraction = rank - lower_index as f64;
        let value = lower_value + fraction * (upper_value - lower_value);
        Some(value.clamp(lower_value, upper_value))
    }
}

/// Sum of squared deviations around a precomputed mean (second pass)
fn squared_deviations(samples: &[f64], mean: f64) -> f64 {
    samples.iter().map(|&x| (x - mean).powi(2)).sum()
}

fn sorted_copy(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Descriptive statistics of one timing column.
///
/// `stddev` is the sample standard deviation (`n - 1` denominator) and is
/// `None` when fewer than two samples are available. `pstddev` is the
/// population standard deviation (`n` denominator), `0.0` for a single sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub n: usize,
    pub mean: f64,
    pub median: f64,
    pub stddev: Option<f64>,
    pub q1: f64,
    pub q3: f64,
    pub min: f64,
    pub max: f64,
    pub pstddev: f64,
}

impl DescriptiveStats {
    /// Compute summary statistics from samples.
    ///
    /// The input is left untouched; order statistics are taken from a sorted
    /// copy.
    ///
    /// # Returns
    ///
    /// * `Some(stats)` - Statistical summary
    /// * `None` - If samples is empty or holds a non-finite value
    ///
    /// # Examples
    ///
    /// ```
    /// use lookup_bench::stats::percentiles::DescriptiveStats;
    ///
    /// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    /// let stats = DescriptiveStats::from_samples(&data).unwrap();
    /// assert_eq!(stats.n, 10);
    /// assert_eq!(stats.mean, 5.5);
    /// assert_eq!(stats.median, 5.5);
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 10.0);
    /// ```
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() || samples.iter().any(|x| !x.is_finite()) {
            return None;
        }

        let sorted = sorted_copy(samples);
        let n = sorted.len();
        let min = sorted[0];
        let max = sorted[n - 1];

        // ascending order keeps the running sum accurate for non-negative data;
        // rounding can still push the mean an ulp past the extremes
        let mean = (sorted.iter().sum::<f64>() / n as f64).clamp(min, max);
        let ssd = squared_deviations(&sorted, mean);
        let stddev = (n >= 2).then(|| (ssd / (n - 1) as f64).sqrt());
        let pstddev = (ssd / n as f64).sqrt();

        Some(DescriptiveStats {
            n,
            mean,
            median: percentile_of_sorted(&sorted, 50.0)?,
            stddev,
            q1: percentile_of_sorted(&sorted, 25.0)?,
            q3: percentile_of_sorted(&sorted, 75.0)?,
            min,
            max,
            pstddev,
        })
    }

    /// Sample variance (`stddev` squared)
    pub fn variance(&self) -> Option<f64> {
        self.stddev.map(|s| s * s)
    }

    /// Interquartile range (q3 - q1)
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Coefficient of variation (stddev / mean).
    ///
    /// `None` when the standard deviation is undefined, `f64::INFINITY` when
    /// the mean is zero.
    ///
    /// ```
    /// use lookup_bench::stats::percentiles::DescriptiveStats;
    ///
    /// let stats = DescriptiveStats::from_samples(&[10.0, 12.0, 14.0, 16.0, 18.0]).unwrap();
    /// let cv = stats.coefficient_of_variation().unwrap();
    /// assert!(cv > 0.0 && cv < 1.0);
    /// ```
    pub fn coefficient_of_variation(&self) -> Option<f64> {
        let stddev = self.stddev?;
        if self.mean == 0.0 {
            Some(f64::INFINITY)
        } else {
            Some(stddev / self.mean)
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: order statistics are monotone and the mean lies in range
        #[test]
        fn order_statistics_are_monotone(samples in prop::collection::vec(0.0f64..1e-3, 1..300)) {
            let stats = DescriptiveStats::from_samples(&samples).unwrap();
            prop_assert!(stats.min <= stats.q1);
            prop_assert!(stats.q1 <= stats.median);
            prop_assert!(stats.median <= stats.q3);
            prop_assert!(stats.q3 <= stats.max);
            prop_assert!(stats.min <= stats.mean && stats.mean <= stats.max);
            prop_assert_eq!(stats.n, samples.len());
        }

        /// Property: the population deviation never exceeds the sample deviation
        #[test]
        fn population_stddev_is_bounded(samples in prop::collection::vec(0.0f64..1e-3, 2..300)) {
            let stats = DescriptiveStats::from_samples(&samples).unwrap();
            prop_assert!(stats.pstddev >= 0.0);
            prop_assert!(stats.pstddev <= stats.stddev.unwrap());
        }

        /// Property: the summary is a pure function of its input
        #[test]
        fn summary_is_idempotent(samples in prop::collection::vec(0.0f64..1.0, 1..100)) {
            let first = DescriptiveStats::from_samples(&samples).unwrap();
            let second = DescriptiveStats::from_samples(&samples).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: stddev is defined exactly when there are two or more samples
        #[test]
        fn stddev_defined_from_two_samples(samples in prop::collection::vec(0.0f64..1.0, 1..20)) {
            let stats = DescriptiveStats::from_samples(&samples).unwrap();
            prop_assert_eq!(stats.stddev.is_some(), samples.len() >= 2);
        }
    }
}
