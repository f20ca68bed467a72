//! The dashboard engine — validated data in, derived views and events out.
//!
//! DERIVATION ORDER (fixed at construction):
//!   1. Record store validated
//!   2. Cluster rollups (store KPIs, audits)
//!   3. All-store baselines
//!   4. Regional ranking
//!
//! RULES:
//!   - The dataset is immutable after construction. Interactive state
//!     (selection, hover, quiz) lives beside it, never inside it.
//!   - Filtered views are derived per call from the one shared
//!     selection. Nothing caches a filtered result.
//!   - Actions never fail: one that cannot apply degrades to a no-op
//!     and emits nothing.

use crate::{
    action::DashAction,
    baseline::{BaselineBand, BaselineMap},
    cluster::{aggregate_audits, aggregate_clusters, AuditAggregate, ClusterAggregate},
    dataset::{Dataset, NcAppAdoptionRow, StoreRecord, TargetRow},
    error::DashResult,
    event::DashEvent,
    highlights::{select_highlights, trade_in_focus, ClusterHighlight},
    kpi::StoreKpi,
    quiz::{PendingReset, QuizGate, SubmitOutcome},
    ranking::{rank_regions, RankedRegionRow},
    selection::{ClusterScoped, ClusterSelection},
    series::{
        cluster_month_series, latest_adoption_snapshot, mean_nc_app_adoption, AdoptionSnapshot,
        ClusterMonthPoint,
    },
    types::{ClusterId, StoreName},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── View structs ─────────────────────────────────────────────────────────────

/// One review row enriched with resolved cluster membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewStanding {
    pub store:        StoreName,
    /// None when the name resolves to no store record, alias or not.
    pub cluster:      Option<ClusterId>,
    pub reviews:      u32,
    pub last_rank:    u32,
    pub current_rank: u32,
    pub change:       i32,
}

impl ClusterScoped for ReviewStanding {
    fn cluster_id(&self) -> Option<&str> {
        self.cluster.as_deref()
    }
}

/// One store point for the retention-against-attainment scatter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub store:         StoreName,
    pub cluster:       ClusterId,
    /// Vertical axis.
    pub retention:     f64,
    /// Horizontal axis.
    pub nc_vs_target:  f64,
    /// Point weight.
    pub new_customers: f64,
}

impl ClusterScoped for ScatterPoint {
    fn cluster_id(&self) -> Option<&str> {
        Some(&self.cluster)
    }
}

/// Per-KPI baseline bands for the hovered store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoverBands {
    pub store: StoreName,
    pub bands: BTreeMap<StoreKpi, BaselineBand>,
}

/// Next-period targets, visible only once the quiz gate opens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TargetView {
    Locked,
    Unlocked(Vec<TargetRow>),
}

/// Interactive session state.
#[derive(Debug, Clone)]
pub struct DashState {
    pub selection:     ClusterSelection,
    pub hovered_store: Option<StoreName>,
    pub quiz:          QuizGate,
}

// ── Engine ───────────────────────────────────────────────────────────────────

pub struct DashEngine {
    dataset:        Dataset,
    clusters:       Vec<ClusterAggregate>,
    audit_clusters: Vec<AuditAggregate>,
    baseline:       BaselineMap,
    ranked_regions: Vec<RankedRegionRow>,
    state:          DashState,
}

impl DashEngine {
    /// Validate the dataset and precompute every selection-independent
    /// derivation.
    pub fn new(dataset: Dataset) -> DashResult<Self> {
        dataset.validate()?;
        let clusters = aggregate_clusters(&dataset.stores);
        let audit_clusters = aggregate_audits(&dataset.audits);
        let baseline = BaselineMap::compute(&dataset.stores);
        let ranked_regions = rank_regions(&dataset.regions);
        let quiz = QuizGate::new(dataset.quiz.clone());
        log::info!(
            "Engine: {} stores in {} clusters, {} regions, {} quiz questions",
            dataset.stores.len(),
            clusters.len(),
            dataset.regions.len(),
            dataset.quiz.len()
        );
        Ok(Self {
            dataset,
            clusters,
            audit_clusters,
            baseline,
            ranked_regions,
            state: DashState {
                selection:     ClusterSelection::All,
                hovered_store: None,
                quiz,
            },
        })
    }

    // ── Actions ───────────────────────────────────

    /// Apply one user action. Returns the events it produced; an action
    /// that changes nothing returns none.
    pub fn apply(&mut self, action: DashAction) -> Vec<DashEvent> {
        match action {
            DashAction::SelectCluster { selection } => {
                if self.state.selection == selection {
                    return Vec::new();
                }
                log::info!("Engine: selection changed to {selection:?}");
                self.state.selection = selection.clone();
                vec![DashEvent::SelectionChanged { selection }]
            }
            DashAction::HoverStore { store } => {
                if self.state.hovered_store.as_deref() == Some(store.as_str()) {
                    return Vec::new();
                }
                log::debug!("Engine: hover on {store}");
                self.state.hovered_store = Some(store.clone());
                vec![DashEvent::HoverChanged { store: Some(store) }]
            }
            DashAction::ClearHover => {
                if self.state.hovered_store.is_none() {
                    return Vec::new();
                }
                self.state.hovered_store = None;
                vec![DashEvent::HoverChanged { store: None }]
            }
            DashAction::SelectAnswer { option } => {
                let question = self.state.quiz.cursor();
                if self.state.quiz.select_answer(option) {
                    vec![DashEvent::AnswerRecorded { question, option }]
                } else {
                    Vec::new()
                }
            }
            DashAction::NextQuestion => {
                if self.state.quiz.next() {
                    vec![DashEvent::CursorMoved {
                        cursor: self.state.quiz.cursor(),
                    }]
                } else {
                    Vec::new()
                }
            }
            DashAction::PrevQuestion => {
                if self.state.quiz.prev() {
                    vec![DashEvent::CursorMoved {
                        cursor: self.state.quiz.cursor(),
                    }]
                } else {
                    Vec::new()
                }
            }
            DashAction::SubmitQuiz => match self.state.quiz.submit() {
                SubmitOutcome::AlreadyPassed => Vec::new(),
                SubmitOutcome::Incomplete { answered, total } => {
                    vec![DashEvent::QuizRejected { answered, total }]
                }
                SubmitOutcome::Passed => vec![DashEvent::QuizPassed],
                SubmitOutcome::Failed {
                    correct,
                    total,
                    reset,
                } => vec![DashEvent::QuizFailed {
                    correct,
                    total,
                    reset,
                }],
            },
        }
    }

    /// Hand a deferred quiz reset back once its delay has elapsed.
    pub fn fire_reset(&mut self, reset: PendingReset) -> Option<DashEvent> {
        if self.state.quiz.fire_reset(reset) {
            Some(DashEvent::QuizReset {
                generation: self.state.quiz.generation(),
            })
        } else {
            None
        }
    }

    // ── State accessors ───────────────────────────

    pub fn selection(&self) -> &ClusterSelection {
        &self.state.selection
    }

    pub fn hovered_store(&self) -> Option<&str> {
        self.state.hovered_store.as_deref()
    }

    pub fn quiz(&self) -> &QuizGate {
        &self.state.quiz
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn baseline(&self) -> &BaselineMap {
        &self.baseline
    }

    // ── Derived views ─────────────────────────────

    /// Cluster rollups under the active selection.
    pub fn cluster_overview(&self) -> Vec<ClusterAggregate> {
        self.state.selection.apply(&self.clusters)
    }

    /// Store detail rows under the active selection.
    pub fn store_detail(&self) -> Vec<StoreRecord> {
        self.state.selection.apply(&self.dataset.stores)
    }

    /// Ranked region comparison. Regions sit above the cluster filter,
    /// so this never shrinks.
    pub fn region_ranking(&self) -> &[RankedRegionRow] {
        &self.ranked_regions
    }

    /// Audit rollups under the active selection.
    pub fn audit_overview(&self) -> Vec<AuditAggregate> {
        self.state.selection.apply(&self.audit_clusters)
    }

    /// Monthly cluster series under the active selection.
    pub fn month_series(&self) -> Vec<ClusterMonthPoint> {
        self.state
            .selection
            .apply(&cluster_month_series(&self.dataset.monthly))
    }

    /// Latest-month adoption snapshot under the active selection.
    pub fn adoption_snapshot(&self) -> Vec<AdoptionSnapshot> {
        self.state
            .selection
            .apply(&latest_adoption_snapshot(&self.dataset.monthly))
    }

    /// Area-wide adoption reference line for the snapshot month.
    pub fn adoption_area_average(&self) -> f64 {
        self.dataset.app_adoption_area_average
    }

    /// New-customer adoption rows under the active selection.
    pub fn nc_adoption(&self) -> Vec<NcAppAdoptionRow> {
        self.state.selection.apply(&self.dataset.nc_app_adoption)
    }

    /// Area mean for NC adoption — always over every store.
    pub fn nc_adoption_mean(&self) -> Option<f64> {
        mean_nc_app_adoption(&self.dataset.nc_app_adoption)
    }

    /// Review standings under the active selection, best rank first.
    ///
    /// Names resolve to clusters through the alias table. Rows that
    /// resolve to no store record stay unmapped and only show in the
    /// unfiltered view.
    pub fn review_standings(&self) -> Vec<ReviewStanding> {
        let mut standings: Vec<ReviewStanding> = self
            .dataset
            .reviews
            .iter()
            .map(|r| ReviewStanding {
                store:        r.store.clone(),
                cluster:      self.dataset.cluster_of(&r.store).map(str::to_string),
                reviews:      r.reviews,
                last_rank:    r.last_rank,
                current_rank: r.current_rank,
                change:       r.change,
            })
            .collect();
        standings.sort_by_key(|s| s.current_rank);
        self.state.selection.apply(&standings)
    }

    /// Store scatter points (retention against NC attainment, weighted
    /// by new customers) under the active selection.
    pub fn scatter_points(&self) -> Vec<ScatterPoint> {
        let points: Vec<ScatterPoint> = self
            .dataset
            .stores
            .iter()
            .map(|s| ScatterPoint {
                store:         s.store.clone(),
                cluster:       s.cluster.clone(),
                retention:     s.retention,
                nc_vs_target:  s.nc_vs_target,
                new_customers: s.new_customers,
            })
            .collect();
        self.state.selection.apply(&points)
    }

    /// Highlight callouts — scored over every cluster, never filtered.
    pub fn highlights(&self) -> Vec<ClusterHighlight> {
        select_highlights(&self.clusters)
    }

    /// Trade-in focus list for the active selection.
    pub fn trade_in_focus(&self) -> Vec<ClusterAggregate> {
        trade_in_focus(&self.clusters, &self.state.selection)
    }

    /// Per-KPI baseline bands for the hovered store. None when nothing
    /// is hovered or the hovered name has no store record.
    pub fn hover_bands(&self) -> Option<HoverBands> {
        let name = self.state.hovered_store.as_deref()?;
        let record = self.dataset.stores.iter().find(|s| s.store == name)?;
        let mut bands = BTreeMap::new();
        for kpi in StoreKpi::ALL {
            if let Some(band) = self.baseline.classify(kpi, record.kpi(kpi)) {
                bands.insert(kpi, band);
            }
        }
        Some(HoverBands {
            store: record.store.clone(),
            bands,
        })
    }

    /// Next-period targets. Locked until the quiz gate opens; once
    /// visible the rows are never cluster-filtered.
    pub fn targets(&self) -> TargetView {
        if self.state.quiz.passed() {
            TargetView::Unlocked(self.dataset.targets.clone())
        } else {
            TargetView::Locked
        }
    }
}
