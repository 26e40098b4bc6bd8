//! # Universe Engine
//!
//! $$
//! \text{populate} \to \text{stats} \to \text{clusters} \to
//! \text{ratings} \to \text{tables}
//! $$
//!
//! Orchestrates the scoring pipeline over a program arena. Stages run
//! strictly in sequence; inside the statistics and clustering stages the
//! per-program work is independent and runs on the rayon pool, writing only
//! disjoint per-program state.

use anyhow::Result;
use anyhow::bail;
use rayon::prelude::*;
use statrs::statistics::Statistics;
use tracing::debug;
use tracing::warn;

use crate::portfolio::table::TableEntry;
use crate::portfolio::table::WeightKind;
use crate::portfolio::table::WeightedReturnsTable;
use crate::series::DateRange;
use crate::series::Timeseries;
use crate::stats::StatsConfig;
use crate::stats::correlation;
use crate::stats::gain_to_pain;
use crate::stats::omega_score;
use crate::stats::pop_to_drop;
use crate::stats::sharpe_ratio;
use crate::stats::weighted_drawdown_area;
use crate::universe::cluster::Cluster;
use crate::universe::program::Program;
use crate::universe::program::ProgramStats;
use crate::universe::program::SourceRecord;
use crate::universe::ratings::RatingsRow;
use crate::universe::ratings::RatingsTable;
use crate::universe::scoring::assign_tier;
use crate::universe::scoring::normalize_weights;
use crate::universe::scoring::percentile_of;

/// Runtime configuration for [`Universe`].
#[derive(Debug, Clone, Copy)]
pub struct UniverseConfig {
  /// Minimum pairwise training correlation for cluster membership. The
  /// comparison is strict: a candidate exactly at the threshold stays out.
  pub min_correlation: f64,
}

impl Default for UniverseConfig {
  fn default() -> Self {
    Self { min_correlation: 0.5 }
  }
}

/// Outcome of one population batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulateSummary {
  pub added: usize,
  pub skipped: usize,
}

/// Owns the program arena and drives the scoring pipeline.
///
/// Core programs are scored and weighted; other programs only widen the
/// peer pool clusters draw on. Membership in either list is fixed at
/// population time.
#[derive(Debug, Default)]
pub struct Universe {
  config: UniverseConfig,
  programs: Vec<Program>,
  core: Vec<usize>,
  other: Vec<usize>,
  clusters: Vec<Cluster>,
}

impl Universe {
  pub fn new(config: UniverseConfig) -> Self {
    Self {
      config,
      programs: Vec::new(),
      core: Vec::new(),
      other: Vec::new(),
      clusters: Vec::new(),
    }
  }

  pub fn config(&self) -> &UniverseConfig {
    &self.config
  }

  /// The full program arena, core and other programs alike.
  pub fn programs(&self) -> &[Program] {
    &self.programs
  }

  /// Core programs in arena order.
  pub fn core_programs(&self) -> impl Iterator<Item = &Program> {
    self.core.iter().map(|&index| &self.programs[index])
  }

  pub fn clusters(&self) -> &[Cluster] {
    &self.clusters
  }

  /// Construct programs from parsed source records and add them to the
  /// universe.
  ///
  /// A record with empty labels or a training window shorter than 2
  /// observations is skipped with a warning; the batch always continues. A
  /// validation window with no observations is treated as absent.
  pub fn populate(
    &mut self,
    records: Vec<SourceRecord>,
    is_core: bool,
    range: DateRange,
    validation_range: Option<DateRange>,
  ) -> PopulateSummary {
    let mut summary = PopulateSummary::default();

    for record in records {
      if record.manager.is_empty() || record.fund.is_empty() {
        warn!(manager = %record.manager, fund = %record.fund, "malformed source record, skipping");
        summary.skipped += 1;
        continue;
      }

      let full = Timeseries::from_observations(record.observations);
      let training = full.filter(range);
      if training.len() < 2 {
        warn!(fund = %record.fund, "insufficient training data, skipping");
        summary.skipped += 1;
        continue;
      }

      let validation = validation_range
        .map(|window| full.filter(window))
        .filter(|series| !series.is_empty());

      let program = Program::new(record.manager, record.fund, full, training, validation);
      let index = self.programs.len();
      self.programs.push(program);
      if is_core {
        self.core.push(index);
      } else {
        self.other.push(index);
      }
      summary.added += 1;
    }

    debug!(added = summary.added, skipped = summary.skipped, is_core, "populated universe");
    summary
  }

  /// Compute every program's risk statistics from its training series.
  ///
  /// `benchmark` drives the gain-to-pain ratio; without one the statistic
  /// stays uncomputed. Uncomputable statistics are logged per program and
  /// left as `None`, never aborting the pass.
  pub fn compute_statistics(&mut self, benchmark: Option<&Timeseries>, config: &StatsConfig) {
    self.programs.par_iter_mut().for_each(|program| {
      let rors = program.training.rors();

      program.stats.omega_score = omega_score(rors, config.omega_threshold);
      if program.stats.omega_score.is_none() {
        warn!(fund = %program.fund, "omega score not computable");
      }

      program.stats.sharpe_ratio = sharpe_ratio(rors);
      if program.stats.sharpe_ratio.is_none() {
        warn!(fund = %program.fund, "sharpe ratio not computable");
      }

      if rors.len() >= 2 {
        program.stats.drawdown_area =
          Some(weighted_drawdown_area(rors, config.area_window, config.area_base));
      } else {
        program.stats.drawdown_area = None;
        warn!(fund = %program.fund, "drawdown analysis not computable");
      }

      program.stats.pop_to_drop =
        pop_to_drop(rors, config.pop_percentile, config.drop_percentile);

      program.stats.gain_to_pain =
        benchmark.and_then(|bench| gain_to_pain(&program.training, bench));
      if benchmark.is_some() && program.stats.gain_to_pain.is_none() {
        warn!(fund = %program.fund, "gain-to-pain not computable");
      }
    });
  }

  /// Build one cluster per core program.
  ///
  /// A candidate joins the head's cluster when the Pearson correlation of
  /// the two training series strictly exceeds the configured minimum. Each
  /// head's cluster is computed independently; membership is directional
  /// because it depends on the head's filtered history.
  pub fn build_clusters(&mut self) {
    let programs = &self.programs;
    let min_correlation = self.config.min_correlation;
    let candidates: Vec<usize> = self.core.iter().chain(self.other.iter()).copied().collect();

    self.clusters = self
      .core
      .par_iter()
      .map(|&head| {
        let head_program = &programs[head];
        let mut members = vec![head];

        for &candidate in &candidates {
          if programs[candidate].id() == head_program.id() {
            continue;
          }
          let corr = correlation(&head_program.training, &programs[candidate].training);
          if corr > min_correlation {
            members.push(candidate);
          }
        }

        Cluster::new(head, members)
      })
      .collect();

    debug!(clusters = self.clusters.len(), "built clusters");
  }

  /// Score each cluster head against its peers and derive both weight sets.
  ///
  /// Percentile components with no computable head statistic are skipped;
  /// members missing a statistic drop out of that component's pool only.
  /// Scores are kept on the 0-100 percentile scale end to end; the 1-3 tier
  /// is reported alongside and never feeds the normalization.
  pub fn compute_ratings(&mut self) -> Result<RatingsTable> {
    if self.core.is_empty() {
      bail!("cannot compute ratings for an empty core set");
    }
    if self.clusters.is_empty() {
      bail!("ratings requested before clustering");
    }

    for cluster in &self.clusters {
      let head = &self.programs[cluster.head];
      let mut components = Vec::with_capacity(4);

      if let Some(p) = self.stat_percentile(cluster, head.stats.omega_score, |s| s.omega_score) {
        components.push(p);
      }
      if let Some(p) = self.stat_percentile(cluster, head.stats.drawdown_area, |s| s.drawdown_area)
      {
        components.push(p);
      }
      if let Some(p) = self.stat_percentile(cluster, head.stats.sharpe_ratio, |s| s.sharpe_ratio) {
        components.push(p);
      }

      // Pop-to-drop and gain-to-pain enter as one combined tail component.
      let tail: Vec<f64> = [
        self.stat_percentile(cluster, head.stats.pop_to_drop, |s| s.pop_to_drop),
        self.stat_percentile(cluster, head.stats.gain_to_pain, |s| s.gain_to_pain),
      ]
      .into_iter()
      .flatten()
      .collect();
      if !tail.is_empty() {
        components.push(tail.iter().sum::<f64>() / tail.len() as f64);
      }

      let score = if components.is_empty() {
        warn!(fund = %head.fund, "no percentile components available, scoring 0");
        0.0
      } else {
        components.iter().sum::<f64>() / components.len() as f64
      };

      let head_index = cluster.head;
      self.programs[head_index].overall_score = Some(score);
      self.programs[head_index].tier = Some(assign_tier(score));
    }

    // Global reductions over the core set run after every per-cluster score
    // is in place.
    let raw_scores: Vec<f64> = self
      .core
      .iter()
      .map(|&index| self.programs[index].overall_score.unwrap_or(0.0))
      .collect();
    let score_weights = normalize_weights(&raw_scores);

    let inverse_vols: Vec<f64> = self
      .core
      .iter()
      .map(|&index| {
        let vol = self.programs[index].training.rors().population_std_dev();
        if vol == 0.0 { 0.0 } else { 1.0 / vol }
      })
      .collect();
    let vol_weights = normalize_weights(&inverse_vols);

    for (position, &index) in self.core.iter().enumerate() {
      self.programs[index].score_weight = Some(score_weights[position]);
      self.programs[index].vol_weight = Some(vol_weights[position]);
    }

    let rows = self
      .core
      .iter()
      .enumerate()
      .map(|(position, &index)| {
        let program = &self.programs[index];
        RatingsRow {
          fund: program.fund.clone(),
          manager: program.manager.clone(),
          omega_score: program.stats.omega_score,
          sharpe_ratio: program.stats.sharpe_ratio,
          drawdown_area: program.stats.drawdown_area,
          pop_to_drop: program.stats.pop_to_drop,
          gain_to_pain: program.stats.gain_to_pain,
          score: program.overall_score.unwrap_or(0.0),
          tier: program.tier.unwrap_or(1),
          score_weight: score_weights[position],
          vol_weight: vol_weights[position],
        }
      })
      .collect();

    Ok(RatingsTable { rows })
  }

  /// Unweighted per-program return table, outer-joined on date.
  pub fn returns_table(&self, use_validation: bool) -> WeightedReturnsTable {
    let entries: Vec<TableEntry<'_>> = self
      .core_programs()
      .map(|program| TableEntry {
        fund: program.fund.clone(),
        series: program.series(use_validation),
        weight: 1.0,
      })
      .collect();

    WeightedReturnsTable::build(&entries)
  }

  /// Weighted per-program return table for the chosen weight kind.
  ///
  /// Score and volatility weights require [`Universe::compute_ratings`] to
  /// have run; the equal kind only needs a nonempty core set.
  pub fn weighted_returns_table(
    &self,
    kind: WeightKind,
    use_validation: bool,
  ) -> Result<WeightedReturnsTable> {
    if self.core.is_empty() {
      bail!("cannot build a weighted table for an empty core set");
    }

    let equal_weight = 1.0 / self.core.len() as f64;
    let mut entries = Vec::with_capacity(self.core.len());
    for program in self.core_programs() {
      let weight = match kind {
        WeightKind::Score => match program.score_weight {
          Some(weight) => weight,
          None => bail!("score weights not assigned yet, run compute_ratings first"),
        },
        WeightKind::Volatility => match program.vol_weight {
          Some(weight) => weight,
          None => bail!("volatility weights not assigned yet, run compute_ratings first"),
        },
        WeightKind::Equal => equal_weight,
      };

      entries.push(TableEntry {
        fund: program.fund.clone(),
        series: program.series(use_validation),
        weight,
      });
    }

    Ok(WeightedReturnsTable::build(&entries))
  }

  /// Percentile of the head's statistic within the cluster's pool of the
  /// same statistic. `None` when the head's statistic is uncomputable.
  fn stat_percentile(
    &self,
    cluster: &Cluster,
    head_value: Option<f64>,
    stat: impl Fn(&ProgramStats) -> Option<f64>,
  ) -> Option<f64> {
    let value = head_value?;
    let pool: Vec<f64> = cluster
      .members
      .iter()
      .filter_map(|&index| stat(&self.programs[index].stats))
      .collect();
    Some(percentile_of(&pool, value))
  }
}
