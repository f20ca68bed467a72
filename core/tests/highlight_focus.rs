//! Integration tests: highlight callouts and the trade-in focus list.

use areapulse_core::cluster::{aggregate_clusters, ClusterAggregate};
use areapulse_core::dataset::Dataset;
use areapulse_core::highlights::{select_highlights, trade_in_focus, HIGHLIGHT_LIMIT};
use areapulse_core::selection::ClusterSelection;

// ── Helpers ──────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn agg(
    cluster: &str,
    sales_vs_target: Option<f64>,
    nc_vs_target: Option<f64>,
    retention: f64,
    vltz: f64,
    wrc: f64,
    unregistered_rate: f64,
    trade_in_rate: f64,
) -> ClusterAggregate {
    ClusterAggregate {
        cluster: cluster.into(),
        member_count: 1,
        sales: 10_000.0,
        sales_target: 11_000.0,
        new_customers: 100.0,
        new_customer_target: 150.0,
        sales_vs_target,
        nc_vs_target,
        wrc,
        unregistered_rate,
        trade_in_rate,
        vltz,
        retention,
    }
}

/// A cluster clearing none of the callout criteria.
fn quiet(cluster: &str) -> ClusterAggregate {
    agg(cluster, Some(90.0), Some(80.0), 35.0, 60.0, 65.0, 6.0, 15.0)
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Clusters clearing no criterion never appear in the callouts.
#[test]
fn quiet_clusters_are_excluded() {
    let clusters = vec![quiet("C1"), quiet("C2")];
    assert!(select_highlights(&clusters).is_empty());
}

/// Every threshold is strict: landing exactly on one earns nothing.
#[test]
fn thresholds_are_strict() {
    let clusters = vec![agg(
        "C1",
        Some(100.0),
        Some(100.0),
        40.0,
        70.0,
        70.0,
        5.0,
        15.0,
    )];
    assert!(
        select_highlights(&clusters).is_empty(),
        "Exactly-on-threshold must not score"
    );
}

/// Margins accumulate across every criterion a cluster clears.
#[test]
fn margins_accumulate_across_criteria() {
    // Retention 45 gives 5, VLTZ 72 gives 2
    let clusters = vec![agg("C1", Some(90.0), Some(80.0), 45.0, 72.0, 65.0, 6.0, 15.0)];

    let highlights = select_highlights(&clusters);
    assert_eq!(highlights.len(), 1);
    assert!(
        (highlights[0].score - 7.0).abs() < 1e-9,
        "Expected score 7, got {}",
        highlights[0].score
    );
}

/// A low unregistered rate is weighted ten-fold, so one clean
/// percentage point outscores a modest retention margin.
#[test]
fn clean_till_carries_ten_fold_weight() {
    let clusters = vec![
        agg("Retention", Some(90.0), Some(80.0), 45.0, 60.0, 65.0, 6.0, 15.0),
        agg("CleanTill", Some(90.0), Some(80.0), 35.0, 60.0, 65.0, 4.0, 15.0),
    ];

    let highlights = select_highlights(&clusters);
    let order: Vec<&str> = highlights.iter().map(|h| h.cluster.as_str()).collect();
    assert_eq!(order, ["CleanTill", "Retention"]);
    assert!((highlights[0].score - 10.0).abs() < 1e-9);
}

/// The callout strip keeps at most five clusters, the strongest first.
#[test]
fn at_most_five_callouts() {
    let clusters: Vec<ClusterAggregate> = (1..=7)
        .map(|i| {
            let name = format!("C{i}");
            // Retention 41..=47: every cluster qualifies, scores differ
            agg(&name, Some(90.0), Some(80.0), 40.0 + i as f64, 60.0, 65.0, 6.0, 15.0)
        })
        .collect();

    let highlights = select_highlights(&clusters);
    assert_eq!(highlights.len(), HIGHLIGHT_LIMIT);
    assert_eq!(highlights[0].cluster, "C7");
    assert!(
        highlights.iter().all(|h| h.cluster != "C1" && h.cluster != "C2"),
        "The two weakest clusters must fall off the strip"
    );
}

/// An undefined attainment ratio fails its criterion quietly; other
/// criteria still score.
#[test]
fn undefined_attainment_fails_quietly() {
    let clusters = vec![agg("C1", None, None, 50.0, 60.0, 65.0, 6.0, 15.0)];

    let highlights = select_highlights(&clusters);
    assert_eq!(highlights.len(), 1);
    assert!((highlights[0].score - 10.0).abs() < 1e-9);
}

/// On the sample dataset the strip orders the three qualifying clusters
/// by VLTZ margin and leaves the flat trio out.
#[test]
fn sample_highlights_order() {
    let clusters = aggregate_clusters(&Dataset::sample().stores);
    let highlights = select_highlights(&clusters);

    let order: Vec<&str> = highlights.iter().map(|h| h.cluster.as_str()).collect();
    assert_eq!(order, ["S1-1-B", "S1-1-G", "S1-2-BE"]);
    assert!(
        !order.contains(&"S1-3-BMR"),
        "A cluster clearing nothing must not appear"
    );
}

/// Unfiltered, the trade-in focus is the top two clusters by rate.
#[test]
fn trade_in_top_two_when_unfiltered() {
    let clusters = vec![
        agg("Low", Some(90.0), Some(80.0), 35.0, 60.0, 65.0, 6.0, 10.0),
        agg("High", Some(90.0), Some(80.0), 35.0, 60.0, 65.0, 6.0, 30.0),
        agg("Mid", Some(90.0), Some(80.0), 35.0, 60.0, 65.0, 6.0, 20.0),
    ];

    let focus = trade_in_focus(&clusters, &ClusterSelection::All);
    let order: Vec<&str> = focus.iter().map(|c| c.cluster.as_str()).collect();
    assert_eq!(order, ["High", "Mid"]);
}

/// A single-cluster area still produces a focus list.
#[test]
fn single_cluster_area_focuses_on_itself() {
    let clusters = vec![quiet("Only")];
    let focus = trade_in_focus(&clusters, &ClusterSelection::All);
    assert_eq!(focus.len(), 1);
    assert_eq!(focus[0].cluster, "Only");
}

/// With a cluster selected, the focus is exactly that cluster's rollup.
#[test]
fn trade_in_focus_follows_the_selection() {
    let clusters = vec![
        agg("Low", Some(90.0), Some(80.0), 35.0, 60.0, 65.0, 6.0, 10.0),
        agg("High", Some(90.0), Some(80.0), 35.0, 60.0, 65.0, 6.0, 30.0),
    ];

    let focus = trade_in_focus(&clusters, &ClusterSelection::Only("Low".into()));
    assert_eq!(focus.len(), 1);
    assert_eq!(focus[0].cluster, "Low");

    let none = trade_in_focus(&clusters, &ClusterSelection::Only("Missing".into()));
    assert!(none.is_empty());
}
