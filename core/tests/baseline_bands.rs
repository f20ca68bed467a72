//! Integration tests: all-store baselines and band classification.

use areapulse_core::baseline::{band, BaselineBand, BaselineMap};
use areapulse_core::dataset::Dataset;
use areapulse_core::kpi::StoreKpi;

// ── Tests ────────────────────────────────────────────────────────────────────

/// The baseline for a KPI is the plain mean over every store row.
#[test]
fn baseline_is_the_all_store_mean() {
    let dataset = Dataset::sample();
    let baseline = BaselineMap::compute(&dataset.stores);

    let expected = (30.8 + 35.2 + 28.9 + 41.7 + 27.4 + 25.1 + 26.6) / 7.0;
    let got = baseline.mean(StoreKpi::Retention).unwrap();
    assert!(
        (got - expected).abs() < 1e-9,
        "Expected retention baseline {expected}, got {got}"
    );
}

/// Every KPI in the store set gets a baseline when stores exist.
#[test]
fn every_kpi_has_a_baseline() {
    let baseline = BaselineMap::compute(&Dataset::sample().stores);
    for kpi in StoreKpi::ALL {
        let mean = baseline.mean(kpi);
        assert!(mean.is_some(), "No baseline for {kpi}");
        assert!(mean.unwrap().is_finite());
    }
}

/// A value above the mean classifies as at-or-above for a
/// higher-is-better KPI, below the mean as below.
#[test]
fn classification_follows_the_mean() {
    let baseline = BaselineMap::compute(&Dataset::sample().stores);

    // Sample retention mean is ~30.81
    assert_eq!(
        baseline.classify(StoreKpi::Retention, 41.7),
        Some(BaselineBand::AtOrAbove)
    );
    assert_eq!(
        baseline.classify(StoreKpi::Retention, 25.1),
        Some(BaselineBand::Below)
    );
}

/// For the one lower-is-better KPI the direction flips: a rate under
/// the mean is the good side.
#[test]
fn lower_is_better_flips_the_band() {
    let baseline = BaselineMap::compute(&Dataset::sample().stores);

    // Sample unregistered mean is ~7.81
    assert_eq!(
        baseline.classify(StoreKpi::UnregisteredRate, 4.6),
        Some(BaselineBand::AtOrAbove)
    );
    assert_eq!(
        baseline.classify(StoreKpi::UnregisteredRate, 10.4),
        Some(BaselineBand::Below)
    );
}

/// A value exactly on the mean lands on the good side in both
/// directions.
#[test]
fn equality_lands_on_the_good_side() {
    assert_eq!(
        band(StoreKpi::Retention, 30.0, 30.0),
        BaselineBand::AtOrAbove
    );
    assert_eq!(
        band(StoreKpi::UnregisteredRate, 30.0, 30.0),
        BaselineBand::AtOrAbove
    );
}

/// An empty store table produces an empty baseline: no means, no bands.
#[test]
fn empty_store_table_has_no_baselines() {
    let baseline = BaselineMap::compute(&[]);
    assert_eq!(baseline.mean(StoreKpi::Retention), None);
    assert_eq!(baseline.classify(StoreKpi::Retention, 30.0), None);
}
