//! # Program
//!
//! One fund/manager return stream under evaluation, with the statistics and
//! weights the pipeline attaches to it.

use impl_new_derive::ImplNew;

use crate::series::Timeseries;

/// Parsed source record for one fund, as handed over by the ingestion
/// layer. Dates are calendar-normalized; returns are decimal fractions.
#[derive(ImplNew, Debug, Clone)]
pub struct SourceRecord {
  pub manager: String,
  pub fund: String,
  pub observations: Vec<(chrono::NaiveDate, f64)>,
}

/// Per-program risk statistics. `None` marks "could not be computed."
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgramStats {
  pub omega_score: Option<f64>,
  pub sharpe_ratio: Option<f64>,
  /// Weighted drawdown area, the pipeline's max-drawdown slot.
  pub drawdown_area: Option<f64>,
  pub pop_to_drop: Option<f64>,
  pub gain_to_pain: Option<f64>,
}

/// A fund/manager return stream plus its pipeline state.
///
/// Constructed once at population time; statistics, scores and weights are
/// filled in by the universe's pipeline stages in order.
#[derive(Debug, Clone)]
pub struct Program {
  /// Manager display name. Not unique across the universe.
  pub manager: String,
  /// Fund name, the identity key.
  pub fund: String,
  /// Unfiltered return history.
  pub full: Timeseries,
  /// Date-filtered history used for statistics and clustering.
  pub training: Timeseries,
  /// Held-out window for out-of-sample weighted returns.
  pub validation: Option<Timeseries>,
  pub stats: ProgramStats,
  /// Mean of the within-cluster percentile components, 0-100.
  pub overall_score: Option<f64>,
  /// Equal-width 1-3 bucket of the overall score.
  pub tier: Option<u8>,
  /// Score-derived weight, normalized across core programs.
  pub score_weight: Option<f64>,
  /// Inverse-volatility weight, normalized across core programs.
  pub vol_weight: Option<f64>,
}

impl Program {
  pub fn new(
    manager: String,
    fund: String,
    full: Timeseries,
    training: Timeseries,
    validation: Option<Timeseries>,
  ) -> Self {
    Self {
      manager,
      fund,
      full,
      training,
      validation,
      stats: ProgramStats::default(),
      overall_score: None,
      tier: None,
      score_weight: None,
      vol_weight: None,
    }
  }

  /// Identity key. Fund names disambiguate managers that share a display
  /// name.
  pub fn id(&self) -> &str {
    &self.fund
  }

  /// Training or validation series, as selected by the caller.
  pub fn series(&self, use_validation: bool) -> Option<&Timeseries> {
    if use_validation {
      self.validation.as_ref()
    } else {
      Some(&self.training)
    }
  }
}
