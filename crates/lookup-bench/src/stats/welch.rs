//! Welch's two-sample t-test.
//!
//! Compares the mean list and dictionary lookup times without assuming the
//! two populations share a variance. Degrees of freedom come from the
//! Welch–Satterthwaite approximation and are generally not an integer.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::{BenchError, Result};
use crate::search::Structure;

/// Outcome of Welch's t-test on the list and dictionary columns.
///
/// `statistic` is positive when the list mean is larger (list slower).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HypothesisTestResult {
    /// t statistic, `(mean_list - mean_dict) / standard_error`.
    ///
    /// Infinite when both columns are constant with different means; written
    /// as `"inf"` / `"-inf"` in JSON.
    #[serde(with = "non_finite")]
    pub statistic: f64,
    /// Welch–Satterthwaite degrees of freedom
    pub degrees_of_freedom: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// One-sided p-value for "list mean < dict mean"
    pub p_less: f64,
    /// One-sided p-value for "list mean > dict mean"
    pub p_greater: f64,
}

/// Reading of a test result at a given significance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Dictionary lookups are significantly faster
    DictFaster,
    /// List lookups are significantly faster
    ListFaster,
    /// No significant difference in mean lookup time
    NoSignificantDifference,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::DictFaster => f.write_str("dictionary lookups are significantly faster"),
            Verdict::ListFaster => f.write_str("list lookups are significantly faster"),
            Verdict::NoSignificantDifference => {
                f.write_str("no significant difference in mean lookup time")
            }
        }
    }
}

impl HypothesisTestResult {
    /// Whether the two-sided test rejects equal means at level `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }

    /// Interpret the result at significance level `alpha`
    pub fn verdict(&self, alpha: f64) -> Verdict {
        if !self.is_significant(alpha) {
            Verdict::NoSignificantDifference
        } else if self.statistic > 0.0 {
            Verdict::DictFaster
        } else {
            Verdict::ListFaster
        }
    }
}

/// Run Welch's t-test on the list and dictionary timing columns.
///
/// # Errors
///
/// - [`BenchError::InsufficientData`] when either column has fewer than two
///   samples. Nothing is computed in that case.
/// - [`BenchError::Distribution`] when the t distribution cannot be built
///   (non-finite input).
///
/// # Example
///
/// ```
/// use lookup_bench::stats::welch::welch_t_test;
///
/// let list = [10.0, 11.0, 12.0, 13.0, 14.0];
/// let dict = [1.0, 1.1, 0.9, 1.0, 1.2];
/// let result = welch_t_test(&list, &dict).unwrap();
/// assert!(result.statistic > 0.0);
/// assert!(result.p_value < 0.05);
/// ```
pub fn welch_t_test(list_times: &[f64], dict_times: &[f64]) -> Result<HypothesisTestResult> {
    require_two(list_times, Structure::List)?;
    require_two(dict_times, Structure::Dict)?;

    let (mean_l, var_l) = mean_and_variance(list_times);
    let (mean_d, var_d) = mean_and_variance(dict_times);
    let n_l = list_times.len() as f64;
    let n_d = dict_times.len() as f64;

    let se_l = var_l / n_l;
    let se_d = var_d / n_d;
    let standard_error = (se_l + se_d).sqrt();

    if standard_error == 0.0 {
        // Both columns are constant: the means either coincide or differ with certainty
        let degrees_of_freedom = n_l + n_d - 2.0;
        return Ok(if mean_l == mean_d {
            HypothesisTestResult {
                statistic: 0.0,
                degrees_of_freedom,
                p_value: 1.0,
                p_less: 0.5,
                p_greater: 0.5,
            }
        } else {
            let positive = mean_l > mean_d;
            HypothesisTestResult {
                statistic: if positive { f64::INFINITY } else { f64::NEG_INFINITY },
                degrees_of_freedom,
                p_value: 0.0,
                p_less: if positive { 1.0 } else { 0.0 },
                p_greater: if positive { 0.0 } else { 1.0 },
            }
        });
    }

    let statistic = (mean_l - mean_d) / standard_error;
    let degrees_of_freedom =
        (se_l + se_d).powi(2) / (se_l.powi(2) / (n_l - 1.0) + se_d.powi(2) / (n_d - 1.0));

    let distribution = StudentsT::new(0.0, 1.0, degrees_of_freedom)
        .map_err(|e| BenchError::Distribution(e.to_string()))?;

    let p_less = distribution.cdf(statistic).clamp(0.0, 1.0);
    let p_greater = distribution.sf(statistic).clamp(0.0, 1.0);
    let p_value = (2.0 * distribution.sf(statistic.abs())).clamp(0.0, 1.0);

    Ok(HypothesisTestResult {
        statistic,
        degrees_of_freedom,
        p_value,
        p_less,
        p_greater,
    })
}

/// Serde adapter for floats that may be infinite or NaN.
///
/// JSON has no literal for them, so non-finite values travel as strings.
mod non_finite {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("nan")
        } else if *value > 0.0 {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "nan" => Ok(f64::NAN),
                other => Err(de::Error::invalid_value(
                    de::Unexpected::Str(other),
                    &"a number, \"inf\", \"-inf\" or \"nan\"",
                )),
            },
        }
    }
}

fn require_two(column: &[f64], structure: Structure) -> Result<()> {
    if column.len() < 2 {
        return Err(BenchError::InsufficientData {
            column: structure.label().to_string(),
            n: column.len(),
            required: 2,
        });
    }
    Ok(())
}

fn mean_and_variance(samples: &[f64]) -> (f64, f64) {
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_single_list_sample_is_insufficient() {
        let err = welch_t_test(&[1.0], &[1.0, 2.0, 3.0]).unwrap_err();
        match err {
            BenchError::InsufficientData {
                column,
                n,
                required,
            } => {
                assert_eq!(column, "list");
                assert_eq!(n, 1);
                assert_eq!(required, 2);
            }
            other => panic!("Expected InsufficientData, got {other:?}"),
        }
    }

    #[test]
    fn test_single_dict_sample_is_insufficient() {
        let err = welch_t_test(&[1.0, 2.0], &[0.5]).unwrap_err();
        assert!(matches!(
            err,
            BenchError::InsufficientData { ref column, n: 1, .. } if column == "dict"
        ));
    }

    #[test]
    fn test_empty_column_is_insufficient() {
        assert!(welch_t_test(&[], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_known_values() {
        // mean 3, var 2.5 vs mean 6, var 10, n = 5 each
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [2.0, 4.0, 6.0, 8.0, 10.0];
        let result = welch_t_test(&a, &b).unwrap();

        // t = -3 / sqrt(0.5 + 2) = -1.897366...
        assert_close(result.statistic, -3.0 / 2.5_f64.sqrt(), 1e-12);
        // df = 2.5^2 / (0.25/4 + 4/4) = 6.25 / 1.0625 = 5.882352...
        assert_close(result.degrees_of_freedom, 6.25 / 1.0625, 1e-12);
        // two-sided p for t = -1.8974 on 5.88 df is about 0.107
        assert!(result.p_value > 0.09 && result.p_value < 0.125);
        assert_close(result.p_less + result.p_greater, 1.0, 1e-12);
        assert_close(result.p_value, 2.0 * result.p_less, 1e-12);
    }

    #[test]
    fn test_symmetry_flips_sign() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.5];
        let b = [2.0, 4.5, 6.0, 8.0, 10.0];
        let ab = welch_t_test(&a, &b).unwrap();
        let ba = welch_t_test(&b, &a).unwrap();

        assert_close(ab.statistic, -ba.statistic, 1e-12);
        assert_close(ab.degrees_of_freedom, ba.degrees_of_freedom, 1e-12);
        assert_close(ab.p_value, ba.p_value, 1e-12);
    }

    #[test]
    fn test_identical_columns() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let result = welch_t_test(&a, &a).unwrap();
        assert_eq!(result.statistic, 0.0);
        assert_close(result.p_value, 1.0, 1e-12);
        assert_eq!(result.verdict(0.05), Verdict::NoSignificantDifference);
    }

    #[test]
    fn test_constant_columns_with_different_means() {
        let result = welch_t_test(&[2.0, 2.0, 2.0], &[1.0, 1.0]).unwrap();
        assert_eq!(result.statistic, f64::INFINITY);
        assert_eq!(result.p_value, 0.0);
        assert_eq!(result.degrees_of_freedom, 3.0);
        assert_eq!(result.verdict(0.05), Verdict::DictFaster);
    }

    #[test]
    fn test_infinite_statistic_survives_json() {
        let result = welch_t_test(&[1.0, 1.0], &[3.0, 3.0, 3.0]).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"statistic\":\"-inf\""));

        let parsed: HypothesisTestResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.statistic, f64::NEG_INFINITY);
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_finite_statistic_stays_a_number() {
        let result = welch_t_test(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let parsed: HypothesisTestResult = serde_json::from_str(&json).unwrap();

        assert!(!json.contains("\"statistic\":\""));
        assert!((parsed.statistic - result.statistic).abs() < 1e-12);
    }

    #[test]
    fn test_constant_equal_columns() {
        let result = welch_t_test(&[0.0, 0.0], &[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(result.statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_one_constant_column_uses_other_df() {
        // Only the list column varies, so df collapses to n_list - 1
        let result = welch_t_test(&[1.0, 2.0, 3.0, 4.0, 5.0], &[0.0, 0.0, 0.0]).unwrap();
        assert_close(result.degrees_of_freedom, 4.0, 1e-12);
    }

    #[test]
    fn test_large_separation_is_significant() {
        let list: Vec<f64> = (0..200).map(|i| 1e-5 + (i % 10) as f64 * 1e-7).collect();
        let dict: Vec<f64> = (0..200).map(|i| 5e-8 + (i % 4) as f64 * 1e-8).collect();
        let result = welch_t_test(&list, &dict).unwrap();

        assert!(result.statistic > 0.0);
        assert!(result.p_value < 1e-6);
        assert!(result.p_greater < 1e-6);
        assert_eq!(result.verdict(0.05), Verdict::DictFaster);
    }

    #[test]
    fn test_verdict_list_faster() {
        let result = HypothesisTestResult {
            statistic: -4.0,
            degrees_of_freedom: 20.0,
            p_value: 0.001,
            p_less: 0.0005,
            p_greater: 0.9995,
        };
        assert_eq!(result.verdict(0.05), Verdict::ListFaster);
        assert_eq!(result.verdict(0.0001), Verdict::NoSignificantDifference);
    }
}
