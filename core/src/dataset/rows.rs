//! Typed row schemas for every dataset section.
//!
//! Rows are plain serde structs constructed once at load and never mutated.
//! Finiteness and identity checks live in `Dataset::validate` — by the time
//! a row reaches an aggregation function it is known to be well-formed.

use crate::{
    kpi::{RegionKpi, StoreKpi},
    selection::ClusterScoped,
    types::{ClusterId, RegionId, StoreName},
};
use chrono::Month;
use serde::{Deserialize, Serialize};

// ── Store-level KPI rows ─────────────────────────────────────────────────────

/// One store for the reporting period. Percentages are pre-scaled 0–100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreRecord {
    pub store:               StoreName,
    pub cluster:             ClusterId,
    // Absolute metrics — summed by the cluster rollup
    pub sales:               f64,
    pub sales_target:        f64,
    pub transactions:        f64,
    pub new_customers:       f64,
    pub new_customer_target: f64,
    // Detail-table KPIs
    pub sales_vs_target:     f64,
    pub nc_vs_target:        f64,
    pub atv:                 f64,
    pub retention:           f64,
    pub wrc:                 f64,
    pub vltz:                f64,
    pub unregistered_rate:   f64,
    pub trade_in_rate:       f64,
    pub raf_rate:            f64,
    pub email_capture:       f64,
    pub phone_capture:       f64,
}

impl StoreRecord {
    /// Value of a detail-table KPI. Absolute fields (sales, counts) are not
    /// in the KPI set; they feed the cluster rollup instead.
    pub fn kpi(&self, kpi: StoreKpi) -> f64 {
        match kpi {
            StoreKpi::SalesVsTarget => self.sales_vs_target,
            StoreKpi::NcVsTarget => self.nc_vs_target,
            StoreKpi::Atv => self.atv,
            StoreKpi::Retention => self.retention,
            StoreKpi::Wrc => self.wrc,
            StoreKpi::Vltz => self.vltz,
            StoreKpi::UnregisteredRate => self.unregistered_rate,
            StoreKpi::TradeInRate => self.trade_in_rate,
            StoreKpi::RafRate => self.raf_rate,
            StoreKpi::EmailCapture => self.email_capture,
            StoreKpi::PhoneCapture => self.phone_capture,
        }
    }
}

impl ClusterScoped for StoreRecord {
    fn cluster_id(&self) -> Option<&str> {
        Some(&self.cluster)
    }
}

// ── Region rows ──────────────────────────────────────────────────────────────

/// One named region, or the single aggregate total row (`is_total`).
/// The total row carries real KPI values but is never ranked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionRow {
    pub region:            RegionId,
    #[serde(default)]
    pub is_total:          bool,
    pub revenue_vs_target: f64,
    pub atv:               f64,
    pub nc_vs_target:      f64,
    pub raf_rate:          f64,
    pub vltz:              f64,
    pub wrc:               f64,
    pub unregistered_rate: f64,
    pub app_adoption:      f64,
    pub nc_app_adoption:   f64,
    pub retention:         f64,
}

impl RegionRow {
    pub fn kpi(&self, kpi: RegionKpi) -> f64 {
        match kpi {
            RegionKpi::RevenueVsTarget => self.revenue_vs_target,
            RegionKpi::Atv => self.atv,
            RegionKpi::NcVsTarget => self.nc_vs_target,
            RegionKpi::RafRate => self.raf_rate,
            RegionKpi::Vltz => self.vltz,
            RegionKpi::Wrc => self.wrc,
            RegionKpi::UnregisteredRate => self.unregistered_rate,
            RegionKpi::AppAdoption => self.app_adoption,
            RegionKpi::NcAppAdoption => self.nc_app_adoption,
            RegionKpi::Retention => self.retention,
        }
    }
}

// ── Monthly time-series rows ─────────────────────────────────────────────────

/// One row per store per tracked month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub store:            StoreName,
    pub cluster:          ClusterId,
    pub month:            Month,
    pub retention:        f64,
    pub active_customers: f64,
    pub app_adoption:     f64,
}

impl ClusterScoped for MonthlyRecord {
    fn cluster_id(&self) -> Option<&str> {
        Some(&self.cluster)
    }
}

// ── Review ranking rows ──────────────────────────────────────────────────────

/// Local review standing for one store. Carries no cluster of its own;
/// membership is resolved through the record store (aliases included).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRow {
    pub store:        StoreName,
    pub reviews:      u32,
    pub last_rank:    u32,
    pub current_rank: u32,
    pub change:       i32,
}

// ── Engagement rows ──────────────────────────────────────────────────────────

/// New-customer app adoption for one store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NcAppAdoptionRow {
    pub store:              StoreName,
    pub cluster:            ClusterId,
    pub adoption:           f64,
    pub missed_opportunity: u32,
}

impl ClusterScoped for NcAppAdoptionRow {
    fn cluster_id(&self) -> Option<&str> {
        Some(&self.cluster)
    }
}

// ── Audit rows ───────────────────────────────────────────────────────────────

/// Half-year audit results for one store (mystery shop + compliance, 0–100).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRow {
    pub store:        StoreName,
    pub cluster:      ClusterId,
    pub mystery_shop: f64,
    pub compliance:   f64,
}

impl ClusterScoped for AuditRow {
    fn cluster_id(&self) -> Option<&str> {
        Some(&self.cluster)
    }
}

// ── Forward-period targets (quiz-gated) ──────────────────────────────────────

/// Next-period targets for one store. Visible only once the quiz gate opens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetRow {
    pub store:                StoreName,
    pub cluster:              ClusterId,
    pub sales_target:         f64,
    pub cluster_sales_target: f64,
    pub nc_target:            f64,
    pub cluster_nc_target:    f64,
}

impl ClusterScoped for TargetRow {
    fn cluster_id(&self) -> Option<&str> {
        Some(&self.cluster)
    }
}

// ── Quiz definitions ─────────────────────────────────────────────────────────

/// One knowledge-check question. `correct` indexes into `options`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt:  String,
    pub options: Vec<String>,
    pub correct: usize,
}
