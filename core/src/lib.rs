//! areapulse-core — KPI aggregation, ranking, and interactive state for
//! the area performance report.
//!
//! The crate is a pure engine: validated JSON rows in, derived views and
//! events out. It draws nothing and talks to no network. A presentation
//! layer applies `DashAction`s, listens to `DashEvent`s, and re-reads
//! whichever views it cares about.

pub mod action;
pub mod baseline;
pub mod cluster;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod event;
pub mod highlights;
pub mod kpi;
pub mod quiz;
pub mod ranking;
pub mod selection;
pub mod series;
pub mod types;
