//! Highlights — callout selection over the cluster rollups.
//!
//! This subsystem:
//!   1. Scores every cluster against the fixed callout criteria and
//!      keeps the strongest few
//!   2. Picks the trade-in focus list for the active selection

use crate::{cluster::ClusterAggregate, selection::ClusterSelection, types::ClusterId};
use serde::{Deserialize, Serialize};

/// Maximum number of highlight callouts.
pub const HIGHLIGHT_LIMIT: usize = 5;

/// One highlighted cluster with its composite score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterHighlight {
    pub cluster: ClusterId,
    pub score:   f64,
}

/// Pick the strongest clusters for the callout strip.
///
/// A cluster earns score for each criterion it clears, by how far it
/// clears it: sales and NC attainment over 100, retention over 40,
/// VLTZ and WRC over 70, and unregistered under 5 (weighted ×10 so a
/// clean till moves the score like a percentage-point KPI). Clusters
/// scoring zero never appear, and an undefined attainment ratio simply
/// fails its criterion.
pub fn select_highlights(clusters: &[ClusterAggregate]) -> Vec<ClusterHighlight> {
    let mut highlights: Vec<ClusterHighlight> = clusters
        .iter()
        .filter_map(|c| {
            let score = highlight_score(c);
            (score > 0.0).then(|| ClusterHighlight {
                cluster: c.cluster.clone(),
                score,
            })
        })
        .collect();
    highlights.sort_by(|a, b| b.score.total_cmp(&a.score));
    highlights.truncate(HIGHLIGHT_LIMIT);
    highlights
}

fn highlight_score(c: &ClusterAggregate) -> f64 {
    let mut score = 0.0;
    if let Some(v) = c.sales_vs_target {
        if v > 100.0 {
            score += v - 100.0;
        }
    }
    if let Some(v) = c.nc_vs_target {
        if v > 100.0 {
            score += v - 100.0;
        }
    }
    if c.retention > 40.0 {
        score += c.retention - 40.0;
    }
    if c.vltz > 70.0 {
        score += c.vltz - 70.0;
    }
    if c.wrc > 70.0 {
        score += c.wrc - 70.0;
    }
    if c.unregistered_rate < 5.0 {
        score += (5.0 - c.unregistered_rate) * 10.0;
    }
    score
}

/// Clusters to spotlight for trade-in: the top two by rate in the
/// unfiltered view, or exactly the selected cluster's rollup otherwise.
pub fn trade_in_focus(
    clusters: &[ClusterAggregate],
    selection: &ClusterSelection,
) -> Vec<ClusterAggregate> {
    if selection.is_all() {
        let mut sorted = clusters.to_vec();
        sorted.sort_by(|a, b| b.trade_in_rate.total_cmp(&a.trade_in_rate));
        sorted.truncate(2);
        sorted
    } else {
        selection.apply(clusters)
    }
}
