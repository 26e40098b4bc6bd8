//! # Ratings Table
//!
//! Scored view of the core programs: the raw risk statistics, the
//! within-cluster percentile score, its tier and the two weight columns.

use std::fmt;

use prettytable::Table;
use prettytable::row;

/// One scored core program.
#[derive(Debug, Clone)]
pub struct RatingsRow {
  pub fund: String,
  pub manager: String,
  pub omega_score: Option<f64>,
  pub sharpe_ratio: Option<f64>,
  pub drawdown_area: Option<f64>,
  pub pop_to_drop: Option<f64>,
  pub gain_to_pain: Option<f64>,
  /// Mean of the available percentile components, 0-100.
  pub score: f64,
  pub tier: u8,
  pub score_weight: f64,
  pub vol_weight: f64,
}

/// Ratings for every core program, in universe order.
#[derive(Debug, Clone, Default)]
pub struct RatingsTable {
  pub rows: Vec<RatingsRow>,
}

impl RatingsTable {
  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// Row for `fund`, if scored.
  pub fn row(&self, fund: &str) -> Option<&RatingsRow> {
    self.rows.iter().find(|row| row.fund == fund)
  }

  /// Terminal rendering of the table.
  pub fn to_table(&self) -> Table {
    let mut table = Table::new();
    table.set_titles(row![
      "Fund",
      "Manager",
      "Omega",
      "Sharpe",
      "DD Area",
      "Pop/Drop",
      "Gain/Pain",
      "Score",
      "Tier",
      "Weight",
      "Vol Weight"
    ]);

    for entry in &self.rows {
      table.add_row(row![
        entry.fund,
        entry.manager,
        fmt_stat(entry.omega_score),
        fmt_stat(entry.sharpe_ratio),
        fmt_stat(entry.drawdown_area),
        fmt_stat(entry.pop_to_drop),
        fmt_stat(entry.gain_to_pain),
        format!("{:.1}", entry.score),
        entry.tier,
        format!("{:.4}", entry.score_weight),
        format!("{:.4}", entry.vol_weight)
      ]);
    }

    table
  }
}

impl fmt::Display for RatingsTable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.to_table())
  }
}

fn fmt_stat(value: Option<f64>) -> String {
  match value {
    Some(v) => format!("{v:.4}"),
    None => "n/a".to_string(),
  }
}
