//! Ranged DPS calculator: library entry point.
//!
//! Exposes the ballistic model, the curve sampler, the definition catalog,
//! stat panes, graph series specs, reports and the favorites store for use by the CLI and tests.

pub mod catalog;
pub mod config;
pub mod graph;
pub mod model;
pub mod report;
pub mod series;
pub mod stats;
pub mod store;
pub mod util;
