//! # Peerscore
//!
//! $$
//! w_i = \frac{s_i}{\sum_j s_j}, \quad \sum_i w_i = 1
//! $$
//!
//! Peer-cluster scoring and weighting engine for fund/manager return
//! streams. Programs are grouped into correlation clusters over their
//! overlapping training histories, scored against their peers on omega,
//! Sharpe, drawdown and tail ratios via within-cluster percentile ranks,
//! and weighted by score or inverse volatility into blended portfolio
//! return series.
//!
//! The pipeline runs strictly in stages: populate, statistics, clusters,
//! ratings, weighted tables. See [`universe::Universe`] for the entry
//! point and [`portfolio`] for table blending.

pub mod portfolio;
pub mod series;
pub mod stats;
pub mod universe;
