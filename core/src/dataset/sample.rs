//! Hardcoded sample dataset for unit tests.

use super::{
    AuditRow, Dataset, MonthlyRecord, NcAppAdoptionRow, QuizQuestion, RegionRow, ReviewRow,
    StoreRecord, TargetRow,
};
use chrono::Month;
use std::collections::BTreeMap;

// ── Row helpers ──────────────────────────────────────────────────────────────

fn month_row(
    store: &str,
    cluster: &str,
    month: Month,
    retention: f64,
    active_customers: f64,
    app_adoption: f64,
) -> MonthlyRecord {
    MonthlyRecord {
        store: store.into(),
        cluster: cluster.into(),
        month,
        retention,
        active_customers,
        app_adoption,
    }
}

fn review(store: &str, reviews: u32, last_rank: u32, current_rank: u32, change: i32) -> ReviewRow {
    ReviewRow {
        store: store.into(),
        reviews,
        last_rank,
        current_rank,
        change,
    }
}

fn adoption(store: &str, cluster: &str, adoption: f64, missed: u32) -> NcAppAdoptionRow {
    NcAppAdoptionRow {
        store: store.into(),
        cluster: cluster.into(),
        adoption,
        missed_opportunity: missed,
    }
}

fn audit(store: &str, cluster: &str, mystery_shop: f64, compliance: f64) -> AuditRow {
    AuditRow {
        store: store.into(),
        cluster: cluster.into(),
        mystery_shop,
        compliance,
    }
}

fn target(
    store: &str,
    cluster: &str,
    sales_target: f64,
    cluster_sales_target: f64,
    nc_target: f64,
    cluster_nc_target: f64,
) -> TargetRow {
    TargetRow {
        store: store.into(),
        cluster: cluster.into(),
        sales_target,
        cluster_sales_target,
        nc_target,
        cluster_nc_target,
    }
}

// ── Fixture ──────────────────────────────────────────────────────────────────

impl Dataset {
    /// Dataset with hardcoded rows for use in unit tests.
    ///
    /// Three cluster shapes (single store, pair, trio), four region rows
    /// with one total, two tracked months, one review alias and one
    /// unmapped review store.
    pub fn sample() -> Self {
        let stores = vec![
            StoreRecord {
                store:               "Bristol".into(),
                cluster:             "S1-1-B".into(),
                sales:               22208.84,
                sales_target:        23600.00,
                transactions:        1481.0,
                new_customers:       235.0,
                new_customer_target: 367.0,
                sales_vs_target:     94.1,
                nc_vs_target:        64.0,
                atv:                 15.00,
                retention:           30.8,
                wrc:                 65.2,
                vltz:                79.5,
                unregistered_rate:   7.5,
                trade_in_rate:       22.1,
                raf_rate:            6.0,
                email_capture:       95.7,
                phone_capture:       84.3,
            },
            StoreRecord {
                store:               "Gloucester".into(),
                cluster:             "S1-1-G".into(),
                sales:               18390.20,
                sales_target:        19600.00,
                transactions:        1052.0,
                new_customers:       198.0,
                new_customer_target: 305.0,
                sales_vs_target:     93.8,
                nc_vs_target:        64.9,
                atv:                 17.48,
                retention:           35.2,
                wrc:                 58.4,
                vltz:                71.0,
                unregistered_rate:   6.1,
                trade_in_rate:       19.4,
                raf_rate:            7.2,
                email_capture:       93.2,
                phone_capture:       80.1,
            },
            StoreRecord {
                store:               "Barnstaple".into(),
                cluster:             "S1-2-BE".into(),
                sales:               9804.50,
                sales_target:        11200.00,
                transactions:        612.0,
                new_customers:       96.0,
                new_customer_target: 170.0,
                sales_vs_target:     87.5,
                nc_vs_target:        56.5,
                atv:                 16.02,
                retention:           28.9,
                wrc:                 49.7,
                vltz:                64.2,
                unregistered_rate:   8.2,
                trade_in_rate:       15.3,
                raf_rate:            4.1,
                email_capture:       90.8,
                phone_capture:       77.6,
            },
            StoreRecord {
                store:               "Exeter".into(),
                cluster:             "S1-2-BE".into(),
                sales:               16220.11,
                sales_target:        15800.00,
                transactions:        989.0,
                new_customers:       187.0,
                new_customer_target: 181.0,
                sales_vs_target:     102.7,
                nc_vs_target:        103.3,
                atv:                 16.40,
                retention:           41.7,
                wrc:                 61.9,
                vltz:                77.1,
                unregistered_rate:   4.6,
                trade_in_rate:       24.6,
                raf_rate:            8.8,
                email_capture:       94.4,
                phone_capture:       82.0,
            },
            StoreRecord {
                store:               "Bridgend".into(),
                cluster:             "S1-3-BMR".into(),
                sales:               11980.40,
                sales_target:        13400.00,
                transactions:        744.0,
                new_customers:       121.0,
                new_customer_target: 208.0,
                sales_vs_target:     89.4,
                nc_vs_target:        58.2,
                atv:                 16.10,
                retention:           27.4,
                wrc:                 52.3,
                vltz:                62.8,
                unregistered_rate:   9.1,
                trade_in_rate:       13.8,
                raf_rate:            3.5,
                email_capture:       91.5,
                phone_capture:       79.4,
            },
            StoreRecord {
                store:               "Merthyr".into(),
                cluster:             "S1-3-BMR".into(),
                sales:               10444.90,
                sales_target:        11900.00,
                transactions:        655.0,
                new_customers:       104.0,
                new_customer_target: 185.0,
                sales_vs_target:     87.8,
                nc_vs_target:        56.2,
                atv:                 15.95,
                retention:           25.1,
                wrc:                 48.1,
                vltz:                58.6,
                unregistered_rate:   10.4,
                trade_in_rate:       12.5,
                raf_rate:            2.9,
                email_capture:       89.9,
                phone_capture:       75.2,
            },
            StoreRecord {
                store:               "Rumney".into(),
                cluster:             "S1-3-BMR".into(),
                sales:               9230.25,
                sales_target:        10700.00,
                transactions:        571.0,
                new_customers:       92.0,
                new_customer_target: 166.0,
                sales_vs_target:     86.3,
                nc_vs_target:        55.4,
                atv:                 16.16,
                retention:           26.6,
                wrc:                 50.6,
                vltz:                60.9,
                unregistered_rate:   8.8,
                trade_in_rate:       14.1,
                raf_rate:            3.8,
                email_capture:       90.2,
                phone_capture:       76.8,
            },
        ];

        let regions = vec![
            RegionRow {
                region:            "South 1".into(),
                is_total:          false,
                revenue_vs_target: 92.50,
                atv:               17.44,
                nc_vs_target:      57.00,
                raf_rate:          7.30,
                vltz:              73.30,
                wrc:               56.70,
                unregistered_rate: 6.20,
                app_adoption:      53.30,
                nc_app_adoption:   43.40,
                retention:         36.50,
            },
            RegionRow {
                region:            "South 2".into(),
                is_total:          false,
                revenue_vs_target: 89.30,
                atv:               19.26,
                nc_vs_target:      53.10,
                raf_rate:          9.00,
                vltz:              57.00,
                wrc:               62.50,
                unregistered_rate: 9.40,
                app_adoption:      45.50,
                nc_app_adoption:   50.20,
                retention:         40.40,
            },
            RegionRow {
                region:            "South 3".into(),
                is_total:          false,
                revenue_vs_target: 85.10,
                atv:               18.08,
                nc_vs_target:      41.80,
                raf_rate:          2.50,
                vltz:              67.90,
                wrc:               54.80,
                unregistered_rate: 7.50,
                app_adoption:      50.40,
                nc_app_adoption:   46.50,
                retention:         38.50,
            },
            RegionRow {
                region:            "South".into(),
                is_total:          true,
                revenue_vs_target: 89.10,
                atv:               18.18,
                nc_vs_target:      51.70,
                raf_rate:          6.60,
                vltz:              66.70,
                wrc:               57.50,
                unregistered_rate: 7.60,
                app_adoption:      50.20,
                nc_app_adoption:   45.70,
                retention:         37.80,
            },
        ];

        let monthly = vec![
            month_row("Bristol", "S1-1-B", Month::August, 29.0, 610.0, 44.0),
            month_row("Bristol", "S1-1-B", Month::September, 30.1, 625.0, 46.5),
            month_row("Gloucester", "S1-1-G", Month::August, 33.5, 540.0, 47.2),
            month_row("Gloucester", "S1-1-G", Month::September, 34.8, 552.0, 48.9),
            month_row("Barnstaple", "S1-2-BE", Month::August, 27.2, 300.0, 38.4),
            month_row("Barnstaple", "S1-2-BE", Month::September, 28.0, 310.0, 40.1),
            month_row("Exeter", "S1-2-BE", Month::August, 39.9, 480.0, 52.6),
            month_row("Exeter", "S1-2-BE", Month::September, 41.0, 492.0, 54.0),
            month_row("Bridgend", "S1-3-BMR", Month::August, 26.1, 350.0, 36.8),
            month_row("Bridgend", "S1-3-BMR", Month::September, 26.9, 355.0, 38.2),
            month_row("Merthyr", "S1-3-BMR", Month::August, 24.0, 295.0, 34.5),
            month_row("Merthyr", "S1-3-BMR", Month::September, 24.7, 301.0, 35.6),
            month_row("Rumney", "S1-3-BMR", Month::August, 25.5, 280.0, 35.9),
            month_row("Rumney", "S1-3-BMR", Month::September, 26.1, 286.0, 36.7),
        ];

        let reviews = vec![
            review("Bristol", 412, 3, 2, 1),
            review("Gloucester", 388, 2, 3, -1),
            review("Exeter", 455, 1, 1, 0),
            review("Barnstaple", 198, 5, 6, -1),
            review("Merthyr Tydfil", 176, 7, 5, 2),
            review("Bridgend", 201, 4, 4, 0),
            review("Rumney", 154, 6, 7, -1),
            review("Cardiff Queen St", 320, 8, 8, 0),
        ];

        let mut aliases = BTreeMap::new();
        aliases.insert("Merthyr Tydfil".to_string(), "Merthyr".to_string());

        let nc_app_adoption = vec![
            adoption("Bristol", "S1-1-B", 43.4, 133),
            adoption("Gloucester", "S1-1-G", 47.1, 105),
            adoption("Barnstaple", "S1-2-BE", 39.0, 59),
            adoption("Exeter", "S1-2-BE", 55.2, 84),
            adoption("Bridgend", "S1-3-BMR", 36.4, 77),
            adoption("Merthyr", "S1-3-BMR", 33.8, 69),
            adoption("Rumney", "S1-3-BMR", 35.1, 60),
        ];

        let audits = vec![
            audit("Bristol", "S1-1-B", 92.0, 88.0),
            audit("Gloucester", "S1-1-G", 85.5, 91.0),
            audit("Barnstaple", "S1-2-BE", 78.0, 82.5),
            audit("Exeter", "S1-2-BE", 95.0, 96.5),
            audit("Bridgend", "S1-3-BMR", 81.0, 79.0),
            audit("Merthyr", "S1-3-BMR", 74.5, 80.0),
            audit("Rumney", "S1-3-BMR", 77.0, 83.5),
        ];

        let targets = vec![
            target("Bristol", "S1-1-B", 23700.00, 23700.00, 370.0, 370.0),
            target("Gloucester", "S1-1-G", 19800.00, 19800.00, 310.0, 310.0),
            target("Barnstaple", "S1-2-BE", 11300.00, 27200.00, 172.0, 355.0),
            target("Exeter", "S1-2-BE", 15900.00, 27200.00, 183.0, 355.0),
            target("Bridgend", "S1-3-BMR", 13500.00, 36300.00, 210.0, 565.0),
            target("Merthyr", "S1-3-BMR", 12000.00, 36300.00, 187.0, 565.0),
            target("Rumney", "S1-3-BMR", 10800.00, 36300.00, 168.0, 565.0),
        ];

        let quiz = vec![
            QuizQuestion {
                prompt:  "Which store finished top of the local review standings?".into(),
                options: vec!["Bristol".into(), "Exeter".into(), "Gloucester".into()],
                correct: 1,
            },
            QuizQuestion {
                prompt:  "Which cluster missed its sales target by the widest margin?".into(),
                options: vec!["S1-3-BMR".into(), "S1-1-B".into(), "S1-2-BE".into()],
                correct: 0,
            },
            QuizQuestion {
                prompt:  "Lower is better for which KPI?".into(),
                options: vec![
                    "WRC".into(),
                    "Retention".into(),
                    "Unregistered transactions".into(),
                ],
                correct: 2,
            },
        ];

        Dataset {
            stores,
            regions,
            monthly,
            reviews,
            nc_app_adoption,
            audits,
            targets,
            quiz,
            aliases,
            app_adoption_area_average: 50.2,
        }
    }
}
