use anyhow::Result;
use chrono::NaiveDate;

use peerscore::portfolio::PerformanceSummary;
use peerscore::portfolio::WeightKind;
use peerscore::portfolio::blend;
use peerscore::series::DateRange;
use peerscore::series::Timeseries;
use peerscore::stats::StatsConfig;
use peerscore::universe::SourceRecord;
use peerscore::universe::Universe;
use peerscore::universe::UniverseConfig;

/// Deterministic synthetic monthly returns: a common market factor plus a
/// program-specific tilt.
fn synthetic_record(manager: &str, fund: &str, beta: f64, tilt: f64, months: usize) -> SourceRecord {
  let observations = (0..months)
    .map(|i| {
      let year = 2018 + i as i32 / 12;
      let month = 1 + i as u32 % 12;
      let factor = (i as f64 * 0.9).sin() * 0.03;
      let idiosyncratic = ((i * i + 7) % 13) as f64 / 13.0 * 0.02 - 0.01;
      let date = NaiveDate::from_ymd_opt(year, month, 28).unwrap();
      (date, beta * factor + tilt + idiosyncratic)
    })
    .collect();

  SourceRecord::new(manager.to_string(), fund.to_string(), observations)
}

fn benchmark(months: usize) -> Timeseries {
  Timeseries::from_observations((0..months).map(|i| {
    let year = 2018 + i as i32 / 12;
    let month = 1 + i as u32 % 12;
    let date = NaiveDate::from_ymd_opt(year, month, 28).unwrap();
    (date, (i as f64 * 0.9).sin() * 0.03 - 0.002)
  }))
}

fn main() -> Result<()> {
  let months = 72;
  let training = DateRange::new(None, Some(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap()));
  let validation = DateRange::new(Some(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()), None);

  let core = vec![
    synthetic_record("Alpha Capital", "Alpha Global Macro", 1.0, 0.004, months),
    synthetic_record("Beta Partners", "Beta Managed Futures", 1.4, 0.002, months),
    synthetic_record("Gamma Advisors", "Gamma Multi-Strategy", 0.7, 0.005, months),
    synthetic_record("Delta Group", "Delta Trend", 1.1, 0.001, months),
  ];
  let other = vec![
    synthetic_record("Epsilon Management", "Epsilon Equity", 0.9, 0.003, months),
    synthetic_record("Zeta Associates", "Zeta Rates", -0.8, 0.002, months),
  ];

  let mut universe = Universe::new(UniverseConfig::default());
  let core_summary = universe.populate(core, true, training, Some(validation));
  let other_summary = universe.populate(other, false, training, Some(validation));
  println!(
    "populated {} core and {} other programs ({} skipped)",
    core_summary.added,
    other_summary.added,
    core_summary.skipped + other_summary.skipped
  );

  universe.compute_statistics(Some(&benchmark(months)), &StatsConfig::default());
  universe.build_clusters();

  let ratings = universe.compute_ratings()?;
  println!("{ratings}");

  for kind in [WeightKind::Score, WeightKind::Volatility, WeightKind::Equal] {
    let table = universe.weighted_returns_table(kind, true)?;
    let blended = blend(&table);
    let summary = PerformanceSummary::from_returns(blended.rors());
    println!(
      "{kind:?} weighted validation portfolio: total {:.2}%, annualized {:.2}%, sharpe {}",
      summary.total_return * 100.0,
      summary.annualized_return * 100.0,
      summary
        .sharpe_ratio
        .map_or_else(|| "n/a".to_string(), |sharpe| format!("{sharpe:.3}")),
    );
  }

  Ok(())
}
