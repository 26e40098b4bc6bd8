//! # Scoring
//!
//! $$
//! P(x) = 100 \cdot \frac{|\{v \in V : v \le x\}|}{|V|}
//! $$
//!
//! Percentile ranks, tier bucketing and weight normalization used by the
//! ratings stage.

/// Percentile rank (0-100) of `value` within `pool`, "rank at or below"
/// convention: the fraction of pool values less than or equal to `value`.
pub fn percentile_of(pool: &[f64], value: f64) -> f64 {
  if pool.is_empty() {
    return 0.0;
  }

  let at_or_below = pool.iter().filter(|v| **v <= value).count();
  100.0 * at_or_below as f64 / pool.len() as f64
}

/// Equal-width 1-3 tier over a 0-100 score, upper bin edges inclusive.
pub fn assign_tier(score: f64) -> u8 {
  if score <= 100.0 / 3.0 {
    1
  } else if score <= 200.0 / 3.0 {
    2
  } else {
    3
  }
}

/// Normalize raw non-negative contributions to weights summing to 1.
///
/// A degenerate all-zero input falls back to uniform weights rather than
/// dividing by zero; the sum-to-one invariant holds either way.
pub fn normalize_weights(raw: &[f64]) -> Vec<f64> {
  if raw.is_empty() {
    return Vec::new();
  }

  let total: f64 = raw.iter().sum();
  if total.abs() < 1e-12 {
    return vec![1.0 / raw.len() as f64; raw.len()];
  }

  raw.iter().map(|v| v / total).collect()
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;

  use super::*;

  #[test]
  fn percentile_of_uses_weak_ranking() {
    let pool = [1.0, 2.0, 3.0, 4.0];
    assert_relative_eq!(percentile_of(&pool, 2.0), 50.0);
    assert_relative_eq!(percentile_of(&pool, 4.0), 100.0);
    assert_relative_eq!(percentile_of(&pool, 0.5), 0.0);
  }

  #[test]
  fn percentile_of_counts_ties_at_or_below() {
    let pool = [1.0, 2.0, 2.0, 3.0];
    assert_relative_eq!(percentile_of(&pool, 2.0), 75.0);
  }

  #[test]
  fn percentile_of_empty_pool_is_zero() {
    assert_eq!(percentile_of(&[], 1.0), 0.0);
  }

  #[test]
  fn tiers_split_at_equal_width_bounds() {
    assert_eq!(assign_tier(10.0), 1);
    assert_eq!(assign_tier(100.0 / 3.0), 1);
    assert_eq!(assign_tier(50.0), 2);
    assert_eq!(assign_tier(200.0 / 3.0), 2);
    assert_eq!(assign_tier(90.0), 3);
    assert_eq!(assign_tier(100.0), 3);
  }

  #[test]
  fn normalized_weights_sum_to_one() {
    let weights = normalize_weights(&[3.0, 1.0, 4.0]);
    assert_relative_eq!(weights.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(weights[0], 0.375);
  }

  #[test]
  fn degenerate_normalization_falls_back_to_uniform() {
    let weights = normalize_weights(&[0.0, 0.0]);
    assert_eq!(weights, vec![0.5, 0.5]);
  }

  #[test]
  fn normalizing_nothing_yields_nothing() {
    assert!(normalize_weights(&[]).is_empty());
  }
}
