mod support;

use ride_core::config::RideCoreConfig;
use ride_core::pricing::PricingConfig;
use ride_core::routing::{RouteError, RouteEstimator};
use ride_core::spatial::{cell_of, GeoPoint, GridBucketer};
use ride_core::test_helpers::{bengaluru, mysuru, SAMPLE_PATH};
use support::fixtures::{bengaluru_mysuru, zero_results};

#[test]
fn recorded_response_summarizes_to_expected_route() {
    support::init_tracing();
    let estimate = RouteEstimator::default()
        .summarize(&bengaluru_mysuru(), &bengaluru(), &mysuru())
        .expect("route");
    let summary = &estimate.summary;

    assert!((summary.metrics.total_distance_km - 145.21).abs() < 1e-9);
    assert!((summary.metrics.duration_minutes - 152.0).abs() < 1e-9);
    assert_eq!(summary.metrics.formatted_duration(), "2h 32m");
    // 145.21 * 12 + 30 = 1772.52
    assert_eq!(estimate.fare.recommended_fare(), 1773);
    assert_eq!(estimate.fare.extra_fare(), 0);

    assert_eq!(summary.start.grid.as_str(), "259_1551");
    assert_eq!(summary.end.grid.as_str(), "245_1532");
    let cells: Vec<&str> = summary.grids_covered.iter().map(|c| c.as_str()).collect();
    assert_eq!(
        cells,
        vec!["245_1532", "250_1537", "254_1545", "258_1549", "259_1551"]
    );
}

#[test]
fn every_vertex_and_endpoint_is_tagged() {
    let bucketer = GridBucketer::default();
    let estimate = RouteEstimator::default()
        .summarize(&bengaluru_mysuru(), &bengaluru(), &mysuru())
        .expect("route");

    for vertex in SAMPLE_PATH {
        assert!(estimate.summary.covers(vertex, &bucketer));
    }
    // Far off the corridor.
    assert!(!estimate.summary.covers(GeoPoint::new(13.0827, 80.2707), &bucketer));
}

#[test]
fn zero_results_is_no_route_found() {
    let err = RouteEstimator::default()
        .summarize(&zero_results(), &bengaluru(), &mysuru())
        .expect_err("no route");
    match err {
        RouteError::NoRouteFound { status } => assert_eq!(status, "ZERO_RESULTS"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn estimator_built_from_config_uses_its_policy() {
    let config = RideCoreConfig::default()
        .with_grid(GridBucketer::new(1.0))
        .with_pricing(PricingConfig {
            base_fare: 0.0,
            rate_per_km: 10.0,
        });
    let estimate = RouteEstimator::from_config(&config)
        .summarize(&bengaluru_mysuru(), &bengaluru(), &mysuru())
        .expect("route");

    assert_eq!(estimate.fare.recommended_fare(), 1452);
    assert_eq!(estimate.summary.start.grid, cell_of(SAMPLE_PATH[0], 1.0));
    // Whole-degree cells: the route crosses from 77° into 76° longitude.
    let cells: Vec<&str> = estimate
        .summary
        .grids_covered
        .iter()
        .map(|c| c.as_str())
        .collect();
    assert_eq!(cells, vec!["12_76", "12_77"]);
}
