//! Integration tests: rolling store rows up to cluster aggregates.

use areapulse_core::cluster::{aggregate_audits, aggregate_clusters};
use areapulse_core::dataset::{AuditRow, Dataset, StoreRecord};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn store(
    name: &str,
    cluster: &str,
    sales: f64,
    sales_target: f64,
    new_customers: f64,
    new_customer_target: f64,
    wrc: f64,
) -> StoreRecord {
    StoreRecord {
        store: name.into(),
        cluster: cluster.into(),
        sales,
        sales_target,
        transactions: 500.0,
        new_customers,
        new_customer_target,
        sales_vs_target: 90.0,
        nc_vs_target: 60.0,
        atv: 16.0,
        retention: 30.0,
        wrc,
        vltz: 70.0,
        unregistered_rate: 6.0,
        trade_in_rate: 15.0,
        raf_rate: 5.0,
        email_capture: 92.0,
        phone_capture: 80.0,
    }
}

fn audit(name: &str, cluster: &str, mystery_shop: f64, compliance: f64) -> AuditRow {
    AuditRow {
        store: name.into(),
        cluster: cluster.into(),
        mystery_shop,
        compliance,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Attainment is a ratio of sums, not a mean of per-store percentages.
/// 100/200 and 300/100 roll up to 400/300 = 133.3%, where averaging the
/// member percentages (50% and 300%) would give 175%.
#[test]
fn attainment_is_ratio_of_sums() {
    let stores = vec![
        store("A", "C1", 100.0, 200.0, 10.0, 20.0, 60.0),
        store("B", "C1", 300.0, 100.0, 30.0, 10.0, 80.0),
    ];

    let aggregates = aggregate_clusters(&stores);
    assert_eq!(aggregates.len(), 1);

    let got = aggregates[0]
        .sales_vs_target
        .expect("target sum is non-zero");
    let expected = 400.0 / 300.0 * 100.0;
    assert!(
        (got - expected).abs() < 1e-9,
        "Expected sales attainment {expected}, got {got}"
    );
}

/// Percentage KPIs with no stored absolute base are unweighted means of
/// the member percentages.
#[test]
fn percentage_kpis_are_member_means() {
    let stores = vec![
        store("A", "C1", 100.0, 200.0, 10.0, 20.0, 60.0),
        store("B", "C1", 300.0, 100.0, 30.0, 10.0, 80.0),
    ];

    let c1 = &aggregate_clusters(&stores)[0];
    assert!(
        (c1.wrc - 70.0).abs() < 1e-9,
        "WRC mean should be 70, got {}",
        c1.wrc
    );
}

/// A zero target sum leaves attainment undefined; the absolute sums
/// still roll up.
#[test]
fn zero_target_sum_yields_no_attainment() {
    let stores = vec![
        store("A", "C1", 100.0, 0.0, 10.0, 0.0, 60.0),
        store("B", "C1", 300.0, 0.0, 30.0, 0.0, 80.0),
    ];

    let c1 = &aggregate_clusters(&stores)[0];
    assert_eq!(c1.sales_vs_target, None, "No target, no attainment");
    assert_eq!(c1.nc_vs_target, None);
    assert!((c1.sales - 400.0).abs() < 1e-9);
    assert!((c1.new_customers - 40.0).abs() < 1e-9);
}

/// Clusters come out in the order their first store appears, never
/// sorted by id.
#[test]
fn clusters_keep_first_seen_order() {
    let stores = vec![
        store("A", "Z-late", 100.0, 200.0, 10.0, 20.0, 60.0),
        store("B", "A-early", 300.0, 100.0, 30.0, 10.0, 80.0),
        store("C", "Z-late", 150.0, 180.0, 12.0, 25.0, 55.0),
    ];

    let aggregates = aggregate_clusters(&stores);
    let order: Vec<&str> = aggregates.iter().map(|c| c.cluster.as_str()).collect();
    assert_eq!(order, ["Z-late", "A-early"]);
    assert_eq!(aggregates[0].member_count, 2);
    assert_eq!(aggregates[1].member_count, 1);
}

/// Audit rollups are plain means per cluster, same grouping order.
#[test]
fn audit_rollup_is_mean_per_cluster() {
    let audits = vec![
        audit("A", "C1", 90.0, 80.0),
        audit("B", "C1", 70.0, 100.0),
        audit("C", "C2", 85.0, 95.0),
    ];

    let aggregates = aggregate_audits(&audits);
    assert_eq!(aggregates.len(), 2);
    assert_eq!(aggregates[0].member_count, 2);
    assert!(
        (aggregates[0].mystery_shop - 80.0).abs() < 1e-9,
        "Mystery shop mean should be 80, got {}",
        aggregates[0].mystery_shop
    );
    assert!((aggregates[0].compliance - 90.0).abs() < 1e-9);
    assert_eq!(aggregates[1].member_count, 1);
    assert!((aggregates[1].mystery_shop - 85.0).abs() < 1e-9);
}

/// The sample dataset's two-store cluster rolls up to the hand-computed
/// figures under both aggregation rules.
#[test]
fn sample_pair_cluster_matches_hand_computation() {
    let dataset = Dataset::sample();
    let aggregates = aggregate_clusters(&dataset.stores);

    let be = aggregates
        .iter()
        .find(|c| c.cluster == "S1-2-BE")
        .expect("pair cluster present");
    assert_eq!(be.member_count, 2);

    let sales_vs = be.sales_vs_target.unwrap();
    let expected_sales = (9804.50 + 16220.11) / (11200.00 + 15800.00) * 100.0;
    assert!(
        (sales_vs - expected_sales).abs() < 1e-9,
        "Expected sales attainment {expected_sales}, got {sales_vs}"
    );

    let nc_vs = be.nc_vs_target.unwrap();
    let expected_nc = 283.0 / 351.0 * 100.0;
    assert!(
        (nc_vs - expected_nc).abs() < 1e-9,
        "Expected NC attainment {expected_nc}, got {nc_vs}"
    );

    assert!(
        (be.wrc - 55.8).abs() < 1e-9,
        "Expected WRC mean 55.8, got {}",
        be.wrc
    );
}
