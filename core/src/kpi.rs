//! KPI definitions — the fixed metric vocabulary of the report.
//!
//! Two KPI sets exist:
//!   1. `StoreKpi` — the store detail table columns, also the baseline set
//!   2. `RegionKpi` — the smaller region comparison schema used for ranking
//!
//! Every KPI carries a direction flag (`higher_is_better`) that controls
//! both ranking sort order and baseline classification.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Units ────────────────────────────────────────────────────────────────────

/// How a KPI value is rendered at the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiUnit {
    /// Pre-scaled 0–100 percentage.
    Percent,
    /// Pound sterling amount.
    Pounds,
}

impl KpiUnit {
    pub fn format(&self, value: f64) -> String {
        match self {
            KpiUnit::Percent => format!("{value:.1}%"),
            KpiUnit::Pounds => format!("£{value:.2}"),
        }
    }
}

// ── Store-level KPIs ─────────────────────────────────────────────────────────

/// Store detail table KPIs, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKpi {
    SalesVsTarget,
    NcVsTarget,
    Atv,
    Retention,
    Wrc,
    Vltz,
    UnregisteredRate,
    TradeInRate,
    RafRate,
    EmailCapture,
    PhoneCapture,
}

impl StoreKpi {
    pub const ALL: [StoreKpi; 11] = [
        StoreKpi::SalesVsTarget,
        StoreKpi::NcVsTarget,
        StoreKpi::Atv,
        StoreKpi::Retention,
        StoreKpi::Wrc,
        StoreKpi::Vltz,
        StoreKpi::UnregisteredRate,
        StoreKpi::TradeInRate,
        StoreKpi::RafRate,
        StoreKpi::EmailCapture,
        StoreKpi::PhoneCapture,
    ];

    /// Unregistered transactions are the only store KPI where a lower
    /// value is the better one.
    pub fn higher_is_better(&self) -> bool {
        !matches!(self, StoreKpi::UnregisteredRate)
    }

    pub fn unit(&self) -> KpiUnit {
        match self {
            StoreKpi::Atv => KpiUnit::Pounds,
            _ => KpiUnit::Percent,
        }
    }

    /// Column header used by the presentation layer.
    pub fn label(&self) -> &'static str {
        match self {
            StoreKpi::SalesVsTarget => "Sales vs TGT %",
            StoreKpi::NcVsTarget => "NC vs TGT %",
            StoreKpi::Atv => "ATV",
            StoreKpi::Retention => "RET %",
            StoreKpi::Wrc => "WRC %",
            StoreKpi::Vltz => "VLTZ %",
            StoreKpi::UnregisteredRate => "Unreg %",
            StoreKpi::TradeInRate => "Trade-In %",
            StoreKpi::RafRate => "RAF %",
            StoreKpi::EmailCapture => "Email Cap %",
            StoreKpi::PhoneCapture => "Phone Cap %",
        }
    }
}

impl fmt::Display for StoreKpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreKpi::SalesVsTarget => "sales_vs_target",
            StoreKpi::NcVsTarget => "nc_vs_target",
            StoreKpi::Atv => "atv",
            StoreKpi::Retention => "retention",
            StoreKpi::Wrc => "wrc",
            StoreKpi::Vltz => "vltz",
            StoreKpi::UnregisteredRate => "unregistered_rate",
            StoreKpi::TradeInRate => "trade_in_rate",
            StoreKpi::RafRate => "raf_rate",
            StoreKpi::EmailCapture => "email_capture",
            StoreKpi::PhoneCapture => "phone_capture",
        };
        write!(f, "{name}")
    }
}

// ── Region-level KPIs ────────────────────────────────────────────────────────

/// Region comparison KPIs, in the fixed ranking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKpi {
    RevenueVsTarget,
    Atv,
    NcVsTarget,
    RafRate,
    Vltz,
    Wrc,
    UnregisteredRate,
    AppAdoption,
    NcAppAdoption,
    Retention,
}

impl RegionKpi {
    pub const ALL: [RegionKpi; 10] = [
        RegionKpi::RevenueVsTarget,
        RegionKpi::Atv,
        RegionKpi::NcVsTarget,
        RegionKpi::RafRate,
        RegionKpi::Vltz,
        RegionKpi::Wrc,
        RegionKpi::UnregisteredRate,
        RegionKpi::AppAdoption,
        RegionKpi::NcAppAdoption,
        RegionKpi::Retention,
    ];

    pub fn higher_is_better(&self) -> bool {
        !matches!(self, RegionKpi::UnregisteredRate)
    }

    pub fn unit(&self) -> KpiUnit {
        match self {
            RegionKpi::Atv => KpiUnit::Pounds,
            _ => KpiUnit::Percent,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RegionKpi::RevenueVsTarget => "Rev vs TGT",
            RegionKpi::Atv => "ATV (£)",
            RegionKpi::NcVsTarget => "NC vs TGT %",
            RegionKpi::RafRate => "RAF %",
            RegionKpi::Vltz => "VLTZ %",
            RegionKpi::Wrc => "WRC %",
            RegionKpi::UnregisteredRate => "Unreg %",
            RegionKpi::AppAdoption => "App Adop %",
            RegionKpi::NcAppAdoption => "NC App Adop %",
            RegionKpi::Retention => "RET %",
        }
    }
}

impl fmt::Display for RegionKpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegionKpi::RevenueVsTarget => "revenue_vs_target",
            RegionKpi::Atv => "atv",
            RegionKpi::NcVsTarget => "nc_vs_target",
            RegionKpi::RafRate => "raf_rate",
            RegionKpi::Vltz => "vltz",
            RegionKpi::Wrc => "wrc",
            RegionKpi::UnregisteredRate => "unregistered_rate",
            RegionKpi::AppAdoption => "app_adoption",
            RegionKpi::NcAppAdoption => "nc_app_adoption",
            RegionKpi::Retention => "retention",
        };
        write!(f, "{name}")
    }
}
