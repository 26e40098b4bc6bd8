//! # Return Statistics
//!
//! $$
//! R_{ann}=(1+R_{tot})^{12/n}-1
//! $$
//!
//! Compounded return measures and the omega and Sharpe ratios. Inputs are
//! decimal monthly returns in chronological order.

use statrs::statistics::Statistics;

/// Running compound return at each index, starting from wealth 1.0.
pub fn cumulative_returns(rors: &[f64]) -> Vec<f64> {
  let mut out = Vec::with_capacity(rors.len());
  let mut wealth = 1.0;
  for ror in rors {
    wealth *= 1.0 + ror;
    out.push(wealth - 1.0);
  }
  out
}

/// Annualized compound return. `None` on an empty slice.
pub fn annualized_return(rors: &[f64]) -> Option<f64> {
  let total = *cumulative_returns(rors).last()?;
  Some((1.0 + total).powf(12.0 / rors.len() as f64) - 1.0)
}

/// Omega score against an annualized threshold.
///
/// The threshold is de-annualized by compounding before deviations are
/// taken. A zero downside sum yields `+inf`, the intended signal for "no
/// downside observed," not an error. `None` on an empty slice.
pub fn omega_score(rors: &[f64], annual_threshold: f64) -> Option<f64> {
  if rors.is_empty() {
    return None;
  }

  let monthly_threshold = (1.0 + annual_threshold).powf(1.0 / 12.0) - 1.0;

  let mut numerator = 0.0;
  let mut denominator = 0.0;
  for ror in rors {
    let deviation = ror - monthly_threshold;
    if deviation > 0.0 {
      numerator += deviation;
    } else if deviation < 0.0 {
      denominator += deviation.abs();
    }
  }

  if denominator == 0.0 {
    Some(f64::INFINITY)
  } else {
    Some(numerator / denominator)
  }
}

/// Annualized Sharpe ratio with a zero risk-free rate.
///
/// Uses the population standard deviation of the monthly returns, scaled by
/// `sqrt(12)`. Requires at least 2 observations.
pub fn sharpe_ratio(rors: &[f64]) -> Option<f64> {
  if rors.len() < 2 {
    return None;
  }

  let annualized = annualized_return(rors)?;
  Some(annualized / (rors.population_std_dev() * 12f64.sqrt()))
}
