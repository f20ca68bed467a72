//! Cluster rollups — store rows aggregated up to their cluster.
//!
//! Two aggregation rules apply and must not be mixed:
//!   1. Target attainment (sales, new customers) is a ratio of sums:
//!      sum numerators and denominators across members first, then
//!      divide. Averaging per-store percentages would let a small store
//!      swing the cluster as hard as a large one.
//!   2. Percentage KPIs with no stored absolute base (WRC, VLTZ,
//!      unregistered, trade-in, retention) are unweighted means of the
//!      member percentages.
//!
//! Clusters come out in first-seen store order, never alphabetical.

use crate::{
    dataset::{AuditRow, StoreRecord},
    selection::ClusterScoped,
    types::ClusterId,
};
use serde::{Deserialize, Serialize};

// ── Aggregates ───────────────────────────────────────────────────────────────

/// One cluster's rolled-up numbers for the reporting period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterAggregate {
    pub cluster:             ClusterId,
    pub member_count:        usize,
    // Summed absolutes
    pub sales:               f64,
    pub sales_target:        f64,
    pub new_customers:       f64,
    pub new_customer_target: f64,
    // Ratio-of-sums attainment; None when the target sum is zero
    pub sales_vs_target:     Option<f64>,
    pub nc_vs_target:        Option<f64>,
    // Unweighted means of member percentages
    pub wrc:                 f64,
    pub unregistered_rate:   f64,
    pub trade_in_rate:       f64,
    pub vltz:                f64,
    pub retention:           f64,
}

impl ClusterScoped for ClusterAggregate {
    fn cluster_id(&self) -> Option<&str> {
        Some(&self.cluster)
    }
}

/// Audit scores rolled up per cluster (plain means of member scores).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditAggregate {
    pub cluster:      ClusterId,
    pub member_count: usize,
    pub mystery_shop: f64,
    pub compliance:   f64,
}

impl ClusterScoped for AuditAggregate {
    fn cluster_id(&self) -> Option<&str> {
        Some(&self.cluster)
    }
}

// ── Rollup ───────────────────────────────────────────────────────────────────

/// Roll store rows up to one aggregate per cluster, in first-seen order.
pub fn aggregate_clusters(stores: &[StoreRecord]) -> Vec<ClusterAggregate> {
    group_in_order(stores, |r| r.cluster.as_str())
        .into_iter()
        .map(|(cluster, rows)| {
            let sales = sum(&rows, |r| r.sales);
            let sales_target = sum(&rows, |r| r.sales_target);
            let new_customers = sum(&rows, |r| r.new_customers);
            let new_customer_target = sum(&rows, |r| r.new_customer_target);
            ClusterAggregate {
                cluster,
                member_count: rows.len(),
                sales,
                sales_target,
                new_customers,
                new_customer_target,
                sales_vs_target: ratio_pct(sales, sales_target),
                nc_vs_target: ratio_pct(new_customers, new_customer_target),
                wrc: mean(&rows, |r| r.wrc),
                unregistered_rate: mean(&rows, |r| r.unregistered_rate),
                trade_in_rate: mean(&rows, |r| r.trade_in_rate),
                vltz: mean(&rows, |r| r.vltz),
                retention: mean(&rows, |r| r.retention),
            }
        })
        .collect()
}

/// Roll audit rows up to one aggregate per cluster, in first-seen order.
pub fn aggregate_audits(audits: &[AuditRow]) -> Vec<AuditAggregate> {
    group_in_order(audits, |r| r.cluster.as_str())
        .into_iter()
        .map(|(cluster, rows)| AuditAggregate {
            cluster,
            member_count: rows.len(),
            mystery_shop: mean(&rows, |r| r.mystery_shop),
            compliance: mean(&rows, |r| r.compliance),
        })
        .collect()
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Group rows by cluster id, preserving the order clusters first appear.
/// Linear scan per row; the area has single-digit cluster counts.
fn group_in_order<'a, T>(
    rows: &'a [T],
    key: impl Fn(&T) -> &str,
) -> Vec<(ClusterId, Vec<&'a T>)> {
    let mut grouped: Vec<(ClusterId, Vec<&'a T>)> = Vec::new();
    for row in rows {
        let k = key(row);
        match grouped.iter_mut().find(|(id, _)| id.as_str() == k) {
            Some((_, members)) => members.push(row),
            None => grouped.push((k.to_string(), vec![row])),
        }
    }
    grouped
}

fn sum<T>(rows: &[&T], f: impl Fn(&T) -> f64) -> f64 {
    rows.iter().map(|r| f(r)).sum()
}

/// Unweighted mean. Groups always have at least one member.
fn mean<T>(rows: &[&T], f: impl Fn(&T) -> f64) -> f64 {
    sum(rows, f) / rows.len() as f64
}

/// num/denom as a 0–100 percentage; undefined when the denominator sum
/// is zero.
fn ratio_pct(num: f64, denom: f64) -> Option<f64> {
    (denom != 0.0).then(|| num / denom * 100.0)
}
