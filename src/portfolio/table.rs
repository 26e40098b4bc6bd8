//! # Weighted Returns Table
//!
//! Date-indexed outer join of per-program weighted returns. The date index
//! is the union of every program's observation dates; a program without an
//! observation at a date has an absent cell there, which downstream
//! summation must treat as "no contribution," never as zero.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::series::Timeseries;

/// Which per-program weight a table draws on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightKind {
  /// Performance-score weight.
  Score,
  /// Inverse-volatility weight.
  Volatility,
  /// Fixed `1 / core_count` weight.
  Equal,
}

/// One program's contribution to a table build.
#[derive(Debug, Clone)]
pub struct TableEntry<'a> {
  pub fund: String,
  /// Series to draw returns from; `None` contributes an empty column.
  pub series: Option<&'a Timeseries>,
  pub weight: f64,
}

/// One program's weighted-return column, index-aligned with the table's
/// date index.
#[derive(Debug, Clone)]
pub struct TableColumn {
  pub fund: String,
  pub cells: Vec<Option<f64>>,
}

/// Outer-joined table of weighted returns, one column per program.
#[derive(Debug, Clone, Default)]
pub struct WeightedReturnsTable {
  /// Sorted union of all observation dates.
  pub dates: Vec<NaiveDate>,
  pub columns: Vec<TableColumn>,
}

impl WeightedReturnsTable {
  /// Build the table from per-program entries.
  pub fn build(entries: &[TableEntry<'_>]) -> Self {
    let mut index = BTreeSet::new();
    for entry in entries {
      if let Some(series) = entry.series {
        index.extend(series.dates().iter().copied());
      }
    }
    let dates: Vec<NaiveDate> = index.into_iter().collect();

    let columns = entries
      .iter()
      .map(|entry| TableColumn {
        fund: entry.fund.clone(),
        cells: dates
          .iter()
          .map(|date| {
            entry
              .series
              .and_then(|series| series.get(*date))
              .map(|ror| entry.weight * ror)
          })
          .collect(),
      })
      .collect();

    Self { dates, columns }
  }

  pub fn is_empty(&self) -> bool {
    self.dates.is_empty()
  }

  /// Column for `fund`, if present.
  pub fn column(&self, fund: &str) -> Option<&TableColumn> {
    self.columns.iter().find(|column| column.fund == fund)
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;

  use super::*;

  fn date(month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, month, 28).unwrap()
  }

  fn series(months: &[u32], rors: &[f64]) -> Timeseries {
    Timeseries::from_observations(
      months.iter().zip(rors.iter()).map(|(month, ror)| (date(*month), *ror)),
    )
  }

  #[test]
  fn date_index_is_the_union_of_observations() {
    let a = series(&[1, 2, 3], &[0.01, 0.02, 0.03]);
    let b = series(&[2, 3, 4], &[0.05, 0.06, 0.07]);
    let entries = vec![
      TableEntry { fund: "A".to_string(), series: Some(&a), weight: 0.5 },
      TableEntry { fund: "B".to_string(), series: Some(&b), weight: 0.5 },
    ];

    let table = WeightedReturnsTable::build(&entries);

    assert_eq!(table.dates, vec![date(1), date(2), date(3), date(4)]);
    // A has no observation in month 4, B none in month 1.
    assert_eq!(table.column("A").unwrap().cells[3], None);
    assert_eq!(table.column("B").unwrap().cells[0], None);
  }

  #[test]
  fn cells_hold_weight_times_return() {
    let a = series(&[1, 2], &[0.04, -0.02]);
    let entries = vec![TableEntry { fund: "A".to_string(), series: Some(&a), weight: 0.25 }];

    let table = WeightedReturnsTable::build(&entries);

    assert_relative_eq!(table.column("A").unwrap().cells[0].unwrap(), 0.01, epsilon = 1e-12);
    assert_relative_eq!(table.column("A").unwrap().cells[1].unwrap(), -0.005, epsilon = 1e-12);
  }

  #[test]
  fn missing_series_contributes_an_empty_column() {
    let a = series(&[1, 2], &[0.01, 0.02]);
    let entries = vec![
      TableEntry { fund: "A".to_string(), series: Some(&a), weight: 1.0 },
      TableEntry { fund: "B".to_string(), series: None, weight: 1.0 },
    ];

    let table = WeightedReturnsTable::build(&entries);

    assert_eq!(table.dates.len(), 2);
    assert!(table.column("B").unwrap().cells.iter().all(|cell| cell.is_none()));
  }

  #[test]
  fn no_entries_build_an_empty_table() {
    let table = WeightedReturnsTable::build(&[]);
    assert!(table.is_empty());
    assert!(table.columns.is_empty());
  }
}
