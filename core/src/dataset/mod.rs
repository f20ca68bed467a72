//! Record store — the loaded reporting snapshot plus identity resolution.
//!
//! RULE: rows are immutable after load. Every derived view (rollups,
//! rankings, baselines, series) recomputes from these rows on demand;
//! nothing writes back and nothing caches across selection changes.

mod rows;
mod sample;

pub use rows::{
    AuditRow, MonthlyRecord, NcAppAdoptionRow, QuizQuestion, RegionRow, ReviewRow, StoreRecord,
    TargetRow,
};

use crate::{
    error::{DashError, DashResult},
    kpi::{RegionKpi, StoreKpi},
    types::StoreName,
};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};

// ── File envelopes ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
struct StoresFile {
    stores: Vec<StoreRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct RegionsFile {
    regions: Vec<RegionRow>,
}

#[derive(Debug, Clone, Deserialize)]
struct MonthlyFile {
    rows: Vec<MonthlyRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct ReviewsFile {
    reviews: Vec<ReviewRow>,
    #[serde(default)]
    aliases: BTreeMap<StoreName, StoreName>,
}

#[derive(Debug, Clone, Deserialize)]
struct AdoptionFile {
    area_average: f64,
    rows:         Vec<NcAppAdoptionRow>,
}

#[derive(Debug, Clone, Deserialize)]
struct AuditsFile {
    audits: Vec<AuditRow>,
}

#[derive(Debug, Clone, Deserialize)]
struct TargetsFile {
    targets: Vec<TargetRow>,
}

#[derive(Debug, Clone, Deserialize)]
struct QuizFile {
    questions: Vec<QuizQuestion>,
}

// ── Dataset ──────────────────────────────────────────────────────────────────

/// Everything the engine knows about the reporting period, validated once.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub stores:          Vec<StoreRecord>,
    pub regions:         Vec<RegionRow>,
    pub monthly:         Vec<MonthlyRecord>,
    pub reviews:         Vec<ReviewRow>,
    pub nc_app_adoption: Vec<NcAppAdoptionRow>,
    pub audits:          Vec<AuditRow>,
    pub targets:         Vec<TargetRow>,
    pub quiz:            Vec<QuizQuestion>,
    /// Review display names → canonical store record name.
    pub aliases:         BTreeMap<StoreName, StoreName>,
    /// Area-wide app adoption mean for the snapshot month.
    pub app_adoption_area_average: f64,
}

impl Dataset {
    /// Load from the data/ directory.
    /// In tests, use Dataset::sample().
    pub fn load(data_dir: &str) -> DashResult<Self> {
        let path = format!("{data_dir}/stores.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let stores_file: StoresFile = serde_json::from_str(&content)?;

        let regions_path = format!("{data_dir}/regions.json");
        let regions_content = std::fs::read_to_string(&regions_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {regions_path}: {e}"))?;
        let regions_file: RegionsFile = serde_json::from_str(&regions_content)?;

        let monthly_path = format!("{data_dir}/monthly.json");
        let monthly_content = std::fs::read_to_string(&monthly_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {monthly_path}: {e}"))?;
        let monthly_file: MonthlyFile = serde_json::from_str(&monthly_content)?;

        let reviews_path = format!("{data_dir}/reviews.json");
        let reviews_content = std::fs::read_to_string(&reviews_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {reviews_path}: {e}"))?;
        let reviews_file: ReviewsFile = serde_json::from_str(&reviews_content)?;

        let adoption_path = format!("{data_dir}/adoption.json");
        let adoption_content = std::fs::read_to_string(&adoption_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {adoption_path}: {e}"))?;
        let adoption_file: AdoptionFile = serde_json::from_str(&adoption_content)?;

        let audits_path = format!("{data_dir}/audits.json");
        let audits_content = std::fs::read_to_string(&audits_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {audits_path}: {e}"))?;
        let audits_file: AuditsFile = serde_json::from_str(&audits_content)?;

        let targets_path = format!("{data_dir}/targets.json");
        let targets_content = std::fs::read_to_string(&targets_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {targets_path}: {e}"))?;
        let targets_file: TargetsFile = serde_json::from_str(&targets_content)?;

        let quiz_path = format!("{data_dir}/quiz.json");
        let quiz_content = std::fs::read_to_string(&quiz_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {quiz_path}: {e}"))?;
        let quiz_file: QuizFile = serde_json::from_str(&quiz_content)?;

        let dataset = Dataset {
            stores:          stores_file.stores,
            regions:         regions_file.regions,
            monthly:         monthly_file.rows,
            reviews:         reviews_file.reviews,
            nc_app_adoption: adoption_file.rows,
            audits:          audits_file.audits,
            targets:         targets_file.targets,
            quiz:            quiz_file.questions,
            aliases:         reviews_file.aliases,
            app_adoption_area_average: adoption_file.area_average,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Structural validation, run once at load.
    ///
    /// Checks, in order: core sections non-empty, store names unique,
    /// every numeric field finite (named with its row for diagnostics),
    /// exactly one total region row, secondary sections agree with the
    /// record table on cluster membership, quiz questions well-formed,
    /// and alias targets resolvable.
    pub fn validate(&self) -> DashResult<()> {
        if self.stores.is_empty() {
            return Err(DashError::EmptySection { section: "stores" });
        }
        if self.regions.is_empty() {
            return Err(DashError::EmptySection { section: "regions" });
        }
        if self.quiz.is_empty() {
            return Err(DashError::EmptySection { section: "quiz" });
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for record in &self.stores {
            if !seen.insert(&record.store) {
                return Err(DashError::DuplicateStore {
                    store: record.store.clone(),
                });
            }
            check_finite(record.sales, &record.store, "sales")?;
            check_finite(record.sales_target, &record.store, "sales_target")?;
            check_finite(record.transactions, &record.store, "transactions")?;
            check_finite(record.new_customers, &record.store, "new_customers")?;
            check_finite(record.new_customer_target, &record.store, "new_customer_target")?;
            for kpi in StoreKpi::ALL {
                check_finite(record.kpi(kpi), &record.store, &kpi.to_string())?;
            }
        }

        let totals = self.regions.iter().filter(|r| r.is_total).count();
        if totals != 1 {
            return Err(DashError::TotalRowCount { count: totals });
        }
        for row in &self.regions {
            for kpi in RegionKpi::ALL {
                check_finite(row.kpi(kpi), &row.region, &kpi.to_string())?;
            }
        }

        for row in &self.monthly {
            check_finite(row.retention, &row.store, "retention")?;
            check_finite(row.active_customers, &row.store, "active_customers")?;
            check_finite(row.app_adoption, &row.store, "app_adoption")?;
            self.check_cluster(&row.store, &row.cluster)?;
        }
        for row in &self.nc_app_adoption {
            check_finite(row.adoption, &row.store, "adoption")?;
            self.check_cluster(&row.store, &row.cluster)?;
        }
        for row in &self.audits {
            check_finite(row.mystery_shop, &row.store, "mystery_shop")?;
            check_finite(row.compliance, &row.store, "compliance")?;
            self.check_cluster(&row.store, &row.cluster)?;
        }
        for row in &self.targets {
            check_finite(row.sales_target, &row.store, "sales_target")?;
            check_finite(row.cluster_sales_target, &row.store, "cluster_sales_target")?;
            check_finite(row.nc_target, &row.store, "nc_target")?;
            check_finite(row.cluster_nc_target, &row.store, "cluster_nc_target")?;
            self.check_cluster(&row.store, &row.cluster)?;
        }

        for (index, question) in self.quiz.iter().enumerate() {
            if question.prompt.trim().is_empty() {
                return Err(DashError::InvalidQuestion {
                    index,
                    reason: "empty prompt".into(),
                });
            }
            if question.options.len() < 2 {
                return Err(DashError::InvalidQuestion {
                    index,
                    reason: format!("needs at least two options, has {}", question.options.len()),
                });
            }
            if question.correct >= question.options.len() {
                return Err(DashError::InvalidQuestion {
                    index,
                    reason: format!(
                        "correct answer index {} out of bounds for {} options",
                        question.correct,
                        question.options.len()
                    ),
                });
            }
        }

        for (alias, target) in &self.aliases {
            if !self.stores.iter().any(|s| &s.store == target) {
                return Err(DashError::UnknownAliasTarget {
                    alias: alias.clone(),
                    store: target.clone(),
                });
            }
        }

        check_finite(
            self.app_adoption_area_average,
            "area",
            "app_adoption_area_average",
        )?;

        Ok(())
    }

    /// Resolve a display name (possibly an alias) to its cluster.
    /// Returns None for names with no store record — those rows stay
    /// unmapped and only appear in the unfiltered view.
    pub fn cluster_of(&self, name: &str) -> Option<&str> {
        let canonical = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        self.stores
            .iter()
            .find(|s| s.store == canonical)
            .map(|s| s.cluster.as_str())
    }

    /// Secondary sections may only claim the cluster the record table
    /// assigns. Stores absent from the record table pass unchecked.
    fn check_cluster(&self, store: &str, claimed: &str) -> DashResult<()> {
        match self.stores.iter().find(|s| s.store == store) {
            Some(record) if record.cluster != claimed => Err(DashError::ClusterMismatch {
                row:      store.to_string(),
                expected: record.cluster.clone(),
                actual:   claimed.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

fn check_finite(value: f64, row: &str, field: &str) -> DashResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DashError::NonFiniteField {
            row:   row.to_string(),
            field: field.to_string(),
        })
    }
}
