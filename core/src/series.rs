//! Monthly series — per-cluster trend lines derived from monthly rows.
//!
//! This subsystem:
//!   1. Rolls monthly store rows up to one point per cluster per month
//!      (retention and adoption as member means, active customer base
//!      as a member sum)
//!   2. Produces the store-level adoption snapshot for the latest
//!      tracked month
//!   3. Computes the area mean for new-customer app adoption

use crate::{
    dataset::{MonthlyRecord, NcAppAdoptionRow},
    selection::ClusterScoped,
    types::{ClusterId, StoreName},
};
use chrono::Month;
use serde::{Deserialize, Serialize};

/// Area target for new-customer app adoption, percent.
pub const NC_APP_ADOPTION_TARGET: f64 = 80.0;

// ── Series points ────────────────────────────────────────────────────────────

/// One cluster's aggregate for one tracked month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterMonthPoint {
    pub cluster:          ClusterId,
    pub month:            Month,
    /// Mean member retention.
    pub retention:        f64,
    /// Summed active customer base.
    pub active_customers: f64,
    /// Mean member app adoption.
    pub app_adoption:     f64,
}

impl ClusterScoped for ClusterMonthPoint {
    fn cluster_id(&self) -> Option<&str> {
        Some(&self.cluster)
    }
}

/// Store-level app adoption in the latest tracked month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionSnapshot {
    pub store:    StoreName,
    pub cluster:  ClusterId,
    pub month:    Month,
    pub adoption: f64,
}

impl ClusterScoped for AdoptionSnapshot {
    fn cluster_id(&self) -> Option<&str> {
        Some(&self.cluster)
    }
}

// ── Derivations ──────────────────────────────────────────────────────────────

/// Distinct tracked months in calendar order.
pub fn tracked_months(rows: &[MonthlyRecord]) -> Vec<Month> {
    let mut months: Vec<Month> = Vec::new();
    for row in rows {
        if !months.contains(&row.month) {
            months.push(row.month);
        }
    }
    months.sort_by_key(|m| m.number_from_month());
    months
}

/// Aggregate monthly rows into one point per cluster per tracked month.
///
/// Points come out grouped by cluster (first-seen order) with months in
/// calendar order inside each cluster. A cluster with no rows for some
/// month simply has no point there.
pub fn cluster_month_series(rows: &[MonthlyRecord]) -> Vec<ClusterMonthPoint> {
    let months = tracked_months(rows);
    let mut clusters: Vec<&str> = Vec::new();
    for row in rows {
        if !clusters.iter().any(|c| *c == row.cluster.as_str()) {
            clusters.push(&row.cluster);
        }
    }

    let mut points = Vec::new();
    for cluster in clusters {
        for &month in &months {
            let members: Vec<&MonthlyRecord> = rows
                .iter()
                .filter(|r| r.cluster == cluster && r.month == month)
                .collect();
            if members.is_empty() {
                continue;
            }
            let n = members.len() as f64;
            points.push(ClusterMonthPoint {
                cluster: cluster.to_string(),
                month,
                retention: members.iter().map(|r| r.retention).sum::<f64>() / n,
                active_customers: members.iter().map(|r| r.active_customers).sum(),
                app_adoption: members.iter().map(|r| r.app_adoption).sum::<f64>() / n,
            });
        }
    }
    points
}

/// Per-store adoption rows for the latest tracked month, in load order.
/// Empty when nothing is tracked.
pub fn latest_adoption_snapshot(rows: &[MonthlyRecord]) -> Vec<AdoptionSnapshot> {
    let months = tracked_months(rows);
    let latest = match months.last() {
        Some(&m) => m,
        None => return Vec::new(),
    };
    rows.iter()
        .filter(|r| r.month == latest)
        .map(|r| AdoptionSnapshot {
            store:    r.store.clone(),
            cluster:  r.cluster.clone(),
            month:    latest,
            adoption: r.app_adoption,
        })
        .collect()
}

/// Area mean of new-customer app adoption; None with no rows.
pub fn mean_nc_app_adoption(rows: &[NcAppAdoptionRow]) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    Some(rows.iter().map(|r| r.adoption).sum::<f64>() / rows.len() as f64)
}
