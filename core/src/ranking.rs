//! Regional ranking — per-KPI rank positions across the named regions.
//!
//! Ranks are computed over named rows only; the total row rides along
//! unranked. The ranking is never affected by the cluster filter — it
//! compares regions, not stores.

use crate::{dataset::RegionRow, kpi::RegionKpi};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A region row joined with its per-KPI rank positions.
/// The total row carries an empty rank map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedRegionRow {
    pub row:   RegionRow,
    pub ranks: BTreeMap<RegionKpi, u32>,
}

impl RankedRegionRow {
    /// 1-indexed rank; None for the total row.
    pub fn rank(&self, kpi: RegionKpi) -> Option<u32> {
        self.ranks.get(&kpi).copied()
    }
}

/// Rank every named region on every KPI.
///
/// For each KPI the named rows' values are sorted best-first (descending
/// when higher is better, ascending otherwise) and a row's rank is one
/// plus the position of the first sorted value equal to its own. Equal
/// values therefore share the better rank and the value after them skips
/// positions. Input row order is preserved in the output.
pub fn rank_regions(rows: &[RegionRow]) -> Vec<RankedRegionRow> {
    let named: Vec<&RegionRow> = rows.iter().filter(|r| !r.is_total).collect();

    let mut ranked: Vec<RankedRegionRow> = rows
        .iter()
        .map(|row| RankedRegionRow {
            row:   row.clone(),
            ranks: BTreeMap::new(),
        })
        .collect();

    for kpi in RegionKpi::ALL {
        let mut values: Vec<f64> = named.iter().map(|r| r.kpi(kpi)).collect();
        if kpi.higher_is_better() {
            values.sort_by(|a, b| b.total_cmp(a));
        } else {
            values.sort_by(|a, b| a.total_cmp(b));
        }
        for entry in ranked.iter_mut().filter(|e| !e.row.is_total) {
            let value = entry.row.kpi(kpi);
            // Exact equality: the value came out of this same list.
            if let Some(pos) = values.iter().position(|&v| v == value) {
                entry.ranks.insert(kpi, pos as u32 + 1);
            }
        }
    }
    ranked
}
