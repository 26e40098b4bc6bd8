//! # Tail Ratios
//!
//! $$
//! \text{pop2drop}=\left|\frac{\bar r_{\ge P_p}}{\bar r_{\le P_q}}\right|
//! $$
//!
//! Asymmetry measures over the extremes of a return distribution and over
//! adverse benchmark periods.

use ordered_float::OrderedFloat;
use statrs::statistics::Statistics;

use crate::series::Timeseries;

/// Linear-interpolation percentile over `values`, NumPy convention.
fn percentile(values: &[f64], p: f64) -> f64 {
  let mut sorted = values.to_vec();
  sorted.sort_by_key(|v| OrderedFloat(*v));

  let rank = (sorted.len() - 1) as f64 * p / 100.0;
  let low = rank.floor() as usize;
  let high = rank.ceil() as usize;
  if low == high {
    sorted[low]
  } else {
    sorted[low] * (high as f64 - rank) + sorted[high] * (rank - low as f64)
  }
}

/// Ratio of the mean extreme gain to the mean extreme loss.
///
/// Gains are returns at or above the `p`-th percentile, losses returns at
/// or below the `q`-th percentile. `+inf` when the loss-side mean is
/// exactly zero. `None` on an empty slice.
pub fn pop_to_drop(rors: &[f64], p: f64, q: f64) -> Option<f64> {
  if rors.is_empty() {
    return None;
  }

  let upper = percentile(rors, p);
  let lower = percentile(rors, q);

  // Both pools are nonempty: the extremes always qualify for their side.
  let avg_gain = rors.iter().filter(|r| **r >= upper).mean();
  let avg_loss = rors.iter().filter(|r| **r <= lower).mean();

  if avg_loss == 0.0 {
    Some(f64::INFINITY)
  } else {
    Some((avg_gain / avg_loss).abs())
  }
}

/// Gain-to-pain ratio over periods where the benchmark was down.
///
/// The program and benchmark series are synced first; the ratio sums the
/// program's gains and losses only across dates with a negative benchmark
/// return. `+inf` when no losses occurred in those periods. `None` when the
/// overlap is insufficient for syncing.
pub fn gain_to_pain(returns: &Timeseries, benchmark: &Timeseries) -> Option<f64> {
  let (synced_returns, synced_benchmark) = returns.sync(benchmark)?;

  let mut total_gain = 0.0;
  let mut total_pain = 0.0;
  for (ror, bench) in synced_returns.rors().iter().zip(synced_benchmark.rors().iter()) {
    if *bench >= 0.0 {
      continue;
    }
    if *ror > 0.0 {
      total_gain += ror;
    } else {
      total_pain += ror.abs();
    }
  }

  if total_pain == 0.0 {
    Some(f64::INFINITY)
  } else {
    Some(total_gain / total_pain)
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;
  use chrono::NaiveDate;

  use super::*;

  fn fixture_rors() -> Vec<f64> {
    vec![
      -0.0251, 0.0901, 0.0463, 0.0198, -0.0689, -0.0688, -0.0884, 0.0732, 0.0202, 0.0416, -0.0959,
      0.0940, 0.0665,
    ]
  }

  fn monthly(rors: &[f64]) -> Timeseries {
    Timeseries::from_observations(
      rors
        .iter()
        .enumerate()
        .map(|(i, r)| (NaiveDate::from_ymd_opt(2020, 1 + i as u32, 28).unwrap(), *r)),
    )
  }

  #[test]
  fn percentile_uses_linear_interpolation() {
    assert_relative_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 75.0), 3.25);
    assert_relative_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 0.0), 1.0);
    assert_relative_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 100.0), 4.0);
  }

  #[test]
  fn pop_to_drop_matches_reference() {
    let ratio = pop_to_drop(&fixture_rors(), 95.0, 5.0).unwrap();
    assert_relative_eq!(ratio, 0.98019, epsilon = 1e-4);
  }

  #[test]
  fn pop_to_drop_on_empty_slice_is_none() {
    assert!(pop_to_drop(&[], 95.0, 5.0).is_none());
  }

  #[test]
  fn pop_to_drop_with_zero_loss_mean_is_infinite() {
    let ratio = pop_to_drop(&[0.0, 0.0, 0.1], 95.0, 5.0).unwrap();
    assert!(ratio.is_infinite() && ratio.is_sign_positive());
  }

  #[test]
  fn gain_to_pain_sums_over_benchmark_down_months() {
    let program = monthly(&[0.02, -0.01, 0.03, -0.02, 0.05]);
    let benchmark = monthly(&[-0.01, -0.03, 0.02, -0.04, 0.01]);

    // Down months are 1, 2 and 4: gains 0.02, losses 0.01 + 0.02.
    let ratio = gain_to_pain(&program, &benchmark).unwrap();
    assert_relative_eq!(ratio, 0.02 / 0.03, epsilon = 1e-12);
  }

  #[test]
  fn gain_to_pain_without_losses_is_infinite() {
    let program = monthly(&[0.02, 0.01, 0.03]);
    let benchmark = monthly(&[-0.01, 0.02, -0.03]);

    let ratio = gain_to_pain(&program, &benchmark).unwrap();
    assert!(ratio.is_infinite() && ratio.is_sign_positive());
  }

  #[test]
  fn gain_to_pain_needs_sufficient_overlap() {
    let program = monthly(&[0.02, 0.01, 0.03]);
    let benchmark = Timeseries::from_observations(vec![(
      NaiveDate::from_ymd_opt(2020, 1, 28).unwrap(),
      -0.01,
    )]);

    assert!(gain_to_pain(&program, &benchmark).is_none());
  }
}
