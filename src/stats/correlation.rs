//! # Correlation
//!
//! $$
//! \rho_{xy}=\frac{\sum_i (x_i-\bar x)(y_i-\bar y)}
//! {\sqrt{\sum_i (x_i-\bar x)^2 \sum_i (y_i-\bar y)^2}}
//! $$
//!
//! Pearson correlation on aligned return slices, with an explicit zero
//! fallback for insufficient or degenerate data.

use crate::series::Timeseries;

/// Pearson correlation of two equal-length return slices.
///
/// Returns 0.0 for fewer than 2 points or when either side is constant;
/// both are "no usable correlation" fallbacks, not errors.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
  let n = x.len().min(y.len());
  if n < 2 {
    return 0.0;
  }

  let mean_x = x[..n].iter().sum::<f64>() / n as f64;
  let mean_y = y[..n].iter().sum::<f64>() / n as f64;

  let mut cov = 0.0;
  let mut var_x = 0.0;
  let mut var_y = 0.0;
  for i in 0..n {
    let dx = x[i] - mean_x;
    let dy = y[i] - mean_y;
    cov += dx * dy;
    var_x += dx * dx;
    var_y += dy * dy;
  }

  let denom = (var_x * var_y).sqrt();
  if denom < 1e-15 {
    0.0
  } else {
    (cov / denom).clamp(-1.0, 1.0)
  }
}

/// Pearson correlation of two series over their overlapping dates.
///
/// Returns 0.0 when the sync sentinel fires (overlap below 2 points).
pub fn correlation(first: &Timeseries, second: &Timeseries) -> f64 {
  match first.sync(second) {
    Some((synced_first, synced_second)) => pearson(synced_first.rors(), synced_second.rors()),
    None => 0.0,
  }
}
