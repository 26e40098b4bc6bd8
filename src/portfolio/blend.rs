//! # Portfolio Blend
//!
//! Collapses a weighted-return table into one hypothetical portfolio
//! return stream and summarizes its performance.

use statrs::statistics::Statistics;

use crate::portfolio::table::WeightedReturnsTable;
use crate::series::Timeseries;
use crate::stats::annualized_return;
use crate::stats::cumulative_returns;
use crate::stats::max_drawdown;
use crate::stats::sharpe_ratio;

/// Sum the table's present cells per date into a single return series.
///
/// Absent cells contribute nothing. Every date in the index carries at
/// least one observation by construction, so the blend is defined
/// everywhere on the index.
pub fn blend(table: &WeightedReturnsTable) -> Timeseries {
  let mut blended = Timeseries::default();
  for (position, date) in table.dates.iter().enumerate() {
    let total: f64 = table
      .columns
      .iter()
      .filter_map(|column| column.cells[position])
      .sum();
    blended.insert(*date, total);
  }
  blended
}

/// Summary performance metrics of a blended return stream.
#[derive(Debug, Clone, Default)]
pub struct PerformanceSummary {
  /// Running compound return at each period.
  pub cumulative: Vec<f64>,
  pub total_return: f64,
  pub annualized_return: f64,
  /// Population standard deviation of the monthly returns, annualized.
  pub annualized_volatility: f64,
  pub sharpe_ratio: Option<f64>,
  pub max_drawdown: Option<f64>,
}

impl PerformanceSummary {
  pub fn from_returns(rors: &[f64]) -> Self {
    let cumulative = cumulative_returns(rors);
    let total_return = cumulative.last().copied().unwrap_or(0.0);
    let annualized = annualized_return(rors).unwrap_or(0.0);
    let annualized_volatility = if rors.is_empty() {
      0.0
    } else {
      rors.population_std_dev() * 12f64.sqrt()
    };

    Self {
      cumulative,
      total_return,
      annualized_return: annualized,
      annualized_volatility,
      sharpe_ratio: sharpe_ratio(rors),
      max_drawdown: max_drawdown(rors),
    }
  }
}
