//! # Drawdown Analysis
//!
//! $$
//! DD_i = \frac{W_i}{\max_{j \le i} W_j} - 1, \quad W_0 = 1
//! $$
//!
//! Drawdown series, the maximum drawdown with its peak-to-trough length and
//! recovery duration, and an exponentially weighted area under the drawdown
//! curve. All measures need at least 2 return observations.

use ordered_float::OrderedFloat;

/// Sub-window of a return series used for the weighted drawdown area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrawdownWindow {
  /// The entire series.
  Whole,
  /// Previous running peak to the trough of the maximum drawdown.
  Length,
  /// Drawdown start to recovery of the maximum drawdown.
  #[default]
  Duration,
}

/// Drawdown relative to the running wealth peak at each index.
///
/// The wealth index starts at 1.0 before the first return, so the first
/// entry reflects the first period's return directly. `None` for fewer than
/// 2 observations.
pub fn drawdown_series(rors: &[f64]) -> Option<Vec<f64>> {
  if rors.len() < 2 {
    return None;
  }

  let mut series = Vec::with_capacity(rors.len());
  let mut wealth: f64 = 1.0;
  let mut peak: f64 = 1.0;
  for ror in rors {
    wealth *= 1.0 + ror;
    peak = peak.max(wealth);
    series.push(wealth / peak - 1.0);
  }
  Some(series)
}

/// Most negative value of the drawdown series.
pub fn max_drawdown(rors: &[f64]) -> Option<f64> {
  let series = drawdown_series(rors)?;
  series.iter().copied().min_by_key(|dd| OrderedFloat(*dd))
}

/// Periods from the running peak preceding the deepest trough to the
/// trough itself.
pub fn max_drawdown_length(rors: &[f64]) -> Option<usize> {
  length_window(rors).map(|(peak, trough)| trough - peak)
}

/// Periods from the start of the maximum drawdown to its recovery.
///
/// The start is the last zero-drawdown point at or before the trough; the
/// recovery is the first zero-drawdown point after it. A drawdown that
/// never recovers is clamped to the series end.
pub fn max_drawdown_duration(rors: &[f64]) -> Option<usize> {
  duration_window(rors).map(|(start, end)| end - start)
}

/// `(peak, trough)` index pair of the maximum drawdown.
///
/// Indices address the drawdown series; the upper bound is exclusive when
/// used as a slice window.
pub fn length_window(rors: &[f64]) -> Option<(usize, usize)> {
  let series = drawdown_series(rors)?;
  let trough = trough_index(&series);

  let mut peak = series[0];
  let mut peak_index = 0;
  for (index, dd) in series.iter().enumerate().take(trough).skip(1) {
    if *dd >= peak {
      peak = *dd;
      peak_index = index;
    }
  }

  Some((peak_index, trough))
}

/// `(start, end)` index pair of the maximum drawdown's duration.
///
/// `end` is the first zero-drawdown index after the trough, or the series
/// length when the drawdown never recovers.
pub fn duration_window(rors: &[f64]) -> Option<(usize, usize)> {
  let series = drawdown_series(rors)?;
  let trough = trough_index(&series);

  let mut start = trough;
  for i in (0..=trough).rev() {
    if series[i] == 0.0 {
      start = i;
      break;
    }
  }

  let mut end = series.len();
  for (i, dd) in series.iter().enumerate().skip(trough) {
    if *dd == 0.0 {
      end = i;
      break;
    }
  }

  Some((start, end))
}

/// Exponentially weighted mean of the absolute drawdown over `window`.
///
/// Weights are `base^(i+1)` normalized to sum to 1, so later indices of the
/// window dominate and a drawdown that stays deep longer is penalized more.
/// Yields 0.0 when the window holds fewer than 2 returns.
pub fn weighted_drawdown_area(rors: &[f64], window: DrawdownWindow, base: f64) -> f64 {
  let (start, end) = match window {
    DrawdownWindow::Whole => (0, rors.len()),
    DrawdownWindow::Length => match length_window(rors) {
      Some(window) => window,
      None => return 0.0,
    },
    DrawdownWindow::Duration => match duration_window(rors) {
      Some(window) => window,
      None => return 0.0,
    },
  };

  let series = match drawdown_series(&rors[start..end]) {
    Some(series) => series,
    None => return 0.0,
  };

  let weight_sum: f64 = (0..series.len()).map(|i| base.powi(i as i32 + 1)).sum();
  series
    .iter()
    .enumerate()
    .map(|(i, dd)| dd.abs() * base.powi(i as i32 + 1) / weight_sum)
    .sum()
}

/// Index of the first occurrence of the minimum drawdown.
fn trough_index(series: &[f64]) -> usize {
  series
    .iter()
    .enumerate()
    .min_by_key(|(_, dd)| OrderedFloat(**dd))
    .map(|(i, _)| i)
    .unwrap_or(0)
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use approx::assert_relative_eq;

  use super::*;

  fn fixture_rors() -> Vec<f64> {
    vec![
      -0.0251, 0.0901, 0.0463, 0.0198, -0.0689, -0.0688, -0.0884, 0.0732, 0.0202, 0.0416, -0.0959,
      0.0940, 0.0665,
    ]
  }

  #[test]
  fn drawdown_series_matches_reference() {
    let expected = [
      -0.0251, 0.0, 0.0, 0.0, -0.0689, -0.1330, -0.2095, -0.1517, -0.1345, -0.0985, -0.1850,
      -0.1084, -0.0491,
    ];

    let series = drawdown_series(&fixture_rors()).unwrap();
    assert_eq!(series.len(), expected.len());
    for (actual, reference) in series.iter().zip(expected.iter()) {
      assert_abs_diff_eq!(*actual, *reference, epsilon = 1e-3);
    }
  }

  #[test]
  fn drawdown_series_requires_two_observations() {
    assert!(drawdown_series(&[0.05]).is_none());
  }

  #[test]
  fn max_drawdown_matches_reference() {
    let max_dd = max_drawdown(&fixture_rors()).unwrap();
    assert_relative_eq!(max_dd, -0.20961, epsilon = 1e-3);
  }

  #[test]
  fn max_drawdown_equals_series_minimum() {
    let rors = [0.02, -0.08, 0.01, -0.03, 0.12, -0.05];
    let series = drawdown_series(&rors).unwrap();
    let minimum = series.iter().copied().fold(f64::INFINITY, f64::min);

    assert_eq!(max_drawdown(&rors), Some(minimum));
  }

  #[test]
  fn max_drawdown_length_matches_reference() {
    assert_eq!(max_drawdown_length(&fixture_rors()), Some(3));
  }

  #[test]
  fn unrecovered_drawdown_duration_clamps_to_series_end() {
    // The fixture never returns to a zero drawdown after the trough.
    assert_eq!(duration_window(&fixture_rors()), Some((3, 13)));
    assert_eq!(max_drawdown_duration(&fixture_rors()), Some(10));
  }

  #[test]
  fn recovered_drawdown_duration_ends_at_first_zero() {
    // Drawdown starts at index 0, troughs at 1 and recovers by index 2.
    let rors = [0.1, -0.2, 0.3];
    assert_eq!(duration_window(&rors), Some((0, 2)));
    assert_eq!(max_drawdown_duration(&rors), Some(2));
    assert_eq!(max_drawdown_length(&rors), Some(1));
  }

  #[test]
  fn weighted_area_over_whole_series_matches_reference() {
    let area = weighted_drawdown_area(&fixture_rors(), DrawdownWindow::Whole, std::f64::consts::E);
    assert_relative_eq!(area, 0.0778579, epsilon = 1e-6);
  }

  #[test]
  fn weighted_area_over_length_window_matches_reference() {
    let area = weighted_drawdown_area(&fixture_rors(), DrawdownWindow::Length, std::f64::consts::E);
    assert_relative_eq!(area, 0.1053120, epsilon = 1e-6);
  }

  #[test]
  fn weighted_area_over_duration_window_matches_reference() {
    let area =
      weighted_drawdown_area(&fixture_rors(), DrawdownWindow::Duration, std::f64::consts::E);
    assert_relative_eq!(area, 0.0778611, epsilon = 1e-6);
  }

  #[test]
  fn weighted_area_on_short_series_is_zero() {
    assert_eq!(weighted_drawdown_area(&[0.05], DrawdownWindow::Whole, std::f64::consts::E), 0.0);
  }
}
