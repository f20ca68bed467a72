//! All-store baselines — the mean line a hovered store is judged against.
//!
//! The baseline divisor is the full store count, always. It never follows
//! the cluster filter, so a store hovered inside a filtered view is still
//! compared against the whole area.

use crate::{dataset::StoreRecord, kpi::StoreKpi};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which side of the all-store mean a value falls on, after accounting
/// for the KPI's direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineBand {
    /// Meeting or beating the mean. Equality lands here.
    AtOrAbove,
    /// Strictly on the wrong side of the mean.
    Below,
}

/// Per-KPI all-store means for the reporting period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineMap {
    means: BTreeMap<StoreKpi, f64>,
}

impl BaselineMap {
    pub fn compute(stores: &[StoreRecord]) -> Self {
        let mut means = BTreeMap::new();
        if stores.is_empty() {
            return Self { means };
        }
        let n = stores.len() as f64;
        for kpi in StoreKpi::ALL {
            let total: f64 = stores.iter().map(|s| s.kpi(kpi)).sum();
            means.insert(kpi, total / n);
        }
        Self { means }
    }

    pub fn mean(&self, kpi: StoreKpi) -> Option<f64> {
        self.means.get(&kpi).copied()
    }

    /// Band a value against this baseline; None only when the baseline
    /// was computed over an empty store table.
    pub fn classify(&self, kpi: StoreKpi, value: f64) -> Option<BaselineBand> {
        self.mean(kpi).map(|mean| band(kpi, value, mean))
    }
}

/// Direction-aware banding. For higher-is-better KPIs a value at or
/// above the mean is the good side; for lower-is-better KPIs, at or
/// below.
pub fn band(kpi: StoreKpi, value: f64, mean: f64) -> BaselineBand {
    let at_or_above = if kpi.higher_is_better() {
        value >= mean
    } else {
        value <= mean
    };
    if at_or_above {
        BaselineBand::AtOrAbove
    } else {
        BaselineBand::Below
    }
}
