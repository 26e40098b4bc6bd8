//! # Timeseries
//!
//! $$
//! (t_1, r_1), (t_2, r_2), \dots, (t_n, r_n), \quad t_1 < t_2 < \dots < t_n
//! $$
//!
//! Sparse, date-indexed periodic return series. Dates are strictly
//! increasing with one return per date; irregular gaps are allowed. Series
//! are filtered and aligned by constructing new instances, never by
//! deleting in place.

use chrono::NaiveDate;
use impl_new_derive::ImplNew;

/// Inclusive calendar filter, open on either end.
#[derive(ImplNew, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
  pub start: Option<NaiveDate>,
  pub end: Option<NaiveDate>,
}

impl DateRange {
  /// Range covering every date.
  pub fn open() -> Self {
    Self::default()
  }

  /// Whether `date` falls inside the range.
  pub fn contains(&self, date: NaiveDate) -> bool {
    self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
  }
}

/// Date-indexed sequence of decimal periodic returns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeseries {
  dates: Vec<NaiveDate>,
  rors: Vec<f64>,
}

impl Timeseries {
  /// Build a series from `(date, return)` pairs. Input order is irrelevant;
  /// a duplicate date keeps the last value seen.
  pub fn from_observations<I>(observations: I) -> Self
  where
    I: IntoIterator<Item = (NaiveDate, f64)>,
  {
    let mut series = Self::default();
    for (date, ror) in observations {
      series.insert(date, ror);
    }
    series
  }

  /// Insert-or-update the return at `date`, keeping dates sorted.
  pub fn insert(&mut self, date: NaiveDate, ror: f64) {
    match self.dates.binary_search(&date) {
      Ok(i) => self.rors[i] = ror,
      Err(i) => {
        self.dates.insert(i, date);
        self.rors.insert(i, ror);
      }
    }
  }

  pub fn len(&self) -> usize {
    self.dates.len()
  }

  pub fn is_empty(&self) -> bool {
    self.dates.is_empty()
  }

  /// Chronological date view, index-aligned with [`Self::rors`].
  pub fn dates(&self) -> &[NaiveDate] {
    &self.dates
  }

  /// Chronological return view, index-aligned with [`Self::dates`].
  pub fn rors(&self) -> &[f64] {
    &self.rors
  }

  /// Return at `date`, if observed.
  pub fn get(&self, date: NaiveDate) -> Option<f64> {
    self.dates.binary_search(&date).ok().map(|i| self.rors[i])
  }

  /// New series restricted to `range` (inclusive on both ends).
  pub fn filter(&self, range: DateRange) -> Timeseries {
    let mut filtered = Timeseries::default();
    for (date, ror) in self.dates.iter().zip(self.rors.iter()) {
      if range.contains(*date) {
        filtered.dates.push(*date);
        filtered.rors.push(*ror);
      }
    }
    filtered
  }

  /// Inner join on date against `other`, preserving chronological order.
  ///
  /// Returns `None` when the overlap has fewer than 2 points, the sentinel
  /// for "no correlation possible." Callers must treat this as insufficient
  /// data rather than an error.
  pub fn sync(&self, other: &Timeseries) -> Option<(Timeseries, Timeseries)> {
    let mut first = Timeseries::default();
    let mut second = Timeseries::default();

    let mut i = 0;
    let mut j = 0;
    while i < self.len() && j < other.len() {
      match self.dates[i].cmp(&other.dates[j]) {
        std::cmp::Ordering::Less => i += 1,
        std::cmp::Ordering::Greater => j += 1,
        std::cmp::Ordering::Equal => {
          first.dates.push(self.dates[i]);
          first.rors.push(self.rors[i]);
          second.dates.push(other.dates[j]);
          second.rors.push(other.rors[j]);
          i += 1;
          j += 1;
        }
      }
    }

    if first.len() < 2 {
      return None;
    }

    Some((first, second))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 28).unwrap()
  }

  fn monthly(rors: &[f64]) -> Timeseries {
    Timeseries::from_observations(
      rors
        .iter()
        .enumerate()
        .map(|(i, r)| (date(2020 + i as i32 / 12, 1 + i as u32 % 12), *r)),
    )
  }

  #[test]
  fn from_observations_sorts_and_deduplicates() {
    let series = Timeseries::from_observations(vec![
      (date(2020, 3), 0.03),
      (date(2020, 1), 0.01),
      (date(2020, 2), 0.02),
      (date(2020, 1), 0.10),
    ]);

    assert_eq!(series.len(), 3);
    assert_eq!(series.dates(), &[date(2020, 1), date(2020, 2), date(2020, 3)]);
    assert_eq!(series.rors(), &[0.10, 0.02, 0.03]);
  }

  #[test]
  fn insert_updates_existing_date() {
    let mut series = monthly(&[0.01, 0.02]);
    series.insert(date(2020, 2), -0.05);

    assert_eq!(series.len(), 2);
    assert_eq!(series.get(date(2020, 2)), Some(-0.05));
  }

  #[test]
  fn filter_is_inclusive_on_both_ends() {
    let series = monthly(&[0.01, 0.02, 0.03, 0.04]);
    let range = DateRange::new(Some(date(2020, 2)), Some(date(2020, 3)));
    let filtered = series.filter(range);

    assert_eq!(filtered.dates(), &[date(2020, 2), date(2020, 3)]);
    assert_eq!(filtered.rors(), &[0.02, 0.03]);
  }

  #[test]
  fn filter_with_open_range_is_identity() {
    let series = monthly(&[0.01, 0.02, 0.03]);
    assert_eq!(series.filter(DateRange::open()), series);
  }

  #[test]
  fn sync_with_itself_is_identity() {
    let series = monthly(&[0.01, -0.02, 0.03]);
    let (first, second) = series.sync(&series).unwrap();

    assert_eq!(first, series);
    assert_eq!(second, series);
  }

  #[test]
  fn sync_is_symmetric() {
    let a = monthly(&[0.01, 0.02, 0.03, 0.04]);
    let mut b = Timeseries::default();
    b.insert(date(2020, 2), -0.01);
    b.insert(date(2020, 4), -0.02);
    b.insert(date(2021, 6), -0.03);

    let (ab_first, ab_second) = a.sync(&b).unwrap();
    let (ba_first, ba_second) = b.sync(&a).unwrap();

    assert_eq!(ab_first.dates(), ba_first.dates());
    assert_eq!(ab_first, ba_second);
    assert_eq!(ab_second, ba_first);
    assert_eq!(ab_first.dates(), &[date(2020, 2), date(2020, 4)]);
  }

  #[test]
  fn sync_returns_none_on_insufficient_overlap() {
    let a = monthly(&[0.01, 0.02, 0.03]);
    let mut b = Timeseries::default();
    b.insert(date(2020, 2), 0.05);
    b.insert(date(2025, 1), 0.06);

    assert!(a.sync(&b).is_none());

    let disjoint = Timeseries::from_observations(vec![(date(2019, 1), 0.0), (date(2019, 2), 0.0)]);
    assert!(a.sync(&disjoint).is_none());
  }
}
