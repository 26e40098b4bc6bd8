//! # Stats
//!
//! $$
//! \Omega(\tau)=\frac{\sum_i (r_i-m)^+}{\sum_i |(r_i-m)^-|}, \quad
//! m=(1+\tau)^{1/12}-1
//! $$
//!
//! Pure statistics over chronological monthly return slices. Every function
//! that can run out of data reports `None` instead of failing, so a single
//! uncomputable statistic never aborts a pipeline run.

pub mod correlation;
pub mod drawdown;
pub mod returns;
pub mod tail;

pub use correlation::correlation;
pub use correlation::pearson;
pub use drawdown::DrawdownWindow;
pub use drawdown::drawdown_series;
pub use drawdown::duration_window;
pub use drawdown::length_window;
pub use drawdown::max_drawdown;
pub use drawdown::max_drawdown_duration;
pub use drawdown::max_drawdown_length;
pub use drawdown::weighted_drawdown_area;
pub use returns::annualized_return;
pub use returns::cumulative_returns;
pub use returns::omega_score;
pub use returns::sharpe_ratio;
pub use tail::gain_to_pain;
pub use tail::pop_to_drop;

/// Tunables for the per-program statistics pass.
///
/// Thresholds are call parameters rather than module constants so a run can
/// vary them without recompilation.
#[derive(Debug, Clone, Copy)]
pub struct StatsConfig {
  /// Annualized omega threshold, as a decimal return.
  pub omega_threshold: f64,
  /// Upper tail percentile for pop-to-drop.
  pub pop_percentile: f64,
  /// Lower tail percentile for pop-to-drop.
  pub drop_percentile: f64,
  /// Drawdown sub-window the weighted area is computed over.
  pub area_window: DrawdownWindow,
  /// Base of the exponential weights in the drawdown area.
  pub area_base: f64,
}

impl Default for StatsConfig {
  fn default() -> Self {
    Self {
      omega_threshold: 0.01,
      pop_percentile: 95.0,
      drop_percentile: 5.0,
      area_window: DrawdownWindow::Duration,
      area_base: std::f64::consts::E,
    }
  }
}
