mod support;

use std::sync::Arc;
use std::time::Duration;

use ride_core::routing::{PlaceInput, RouteError, RouteEstimator};
use ride_core::session::{LookupState, RouteLookup};
use ride_core::spatial::GeoPoint;
use ride_core::test_helpers::{
    bengaluru, mysuru, ok_response, ScriptedDirectionsProvider, SAMPLE_POLYLINE,
};
use tokio::runtime::Handle;

fn hosur() -> PlaceInput {
    PlaceInput::new("Hosur", GeoPoint::new(12.7409, 77.8253))
}

#[tokio::test(flavor = "multi_thread")]
async fn newer_request_supersedes_slow_one() {
    support::init_tracing();
    let provider = ScriptedDirectionsProvider::new()
        .with_answer(
            mysuru().point,
            Duration::from_millis(300),
            ok_response(145_000.0, 9_000.0, SAMPLE_POLYLINE),
        )
        .with_answer(
            hosur().point,
            Duration::ZERO,
            ok_response(40_000.0, 3_600.0, SAMPLE_POLYLINE),
        );
    let mut lookup = RouteLookup::new(
        Arc::new(provider),
        RouteEstimator::default(),
        Handle::current(),
    );

    let slow = lookup.request(bengaluru(), mysuru());
    let fast = lookup.request(bengaluru(), hosur());
    assert!(fast > slow);

    match lookup.wait_settled().await {
        LookupState::Ready(token, estimate) => {
            assert_eq!(token, fast);
            assert_eq!(estimate.fare.recommended_fare(), 510);
        }
        other => panic!("expected a ready state, got {other:?}"),
    }

    // Let the superseded answer arrive; it must not replace the newer route.
    tokio::time::sleep(Duration::from_millis(500)).await;
    match lookup.current() {
        LookupState::Ready(token, estimate) => {
            assert_eq!(token, fast);
            assert_eq!(estimate.summary.end.name, "Hosur");
        }
        other => panic!("unexpected state {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn subscribers_observe_pending_then_result() {
    let provider = ScriptedDirectionsProvider::new().with_answer(
        mysuru().point,
        Duration::from_millis(50),
        ok_response(10_000.0, 600.0, SAMPLE_POLYLINE),
    );
    let mut lookup = RouteLookup::new(
        Arc::new(provider),
        RouteEstimator::default(),
        Handle::current(),
    );
    let mut rx = lookup.subscribe();

    let token = lookup.request(bengaluru(), mysuru());
    assert!(matches!(*rx.borrow_and_update(), LookupState::Pending(t) if t == token));

    rx.changed().await.expect("sender alive");
    assert!(matches!(*rx.borrow(), LookupState::Ready(t, _) if t == token));
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_destination_fails_and_cancel_discards_late_answer() {
    let provider = ScriptedDirectionsProvider::new().with_answer(
        mysuru().point,
        Duration::from_millis(200),
        ok_response(10_000.0, 600.0, SAMPLE_POLYLINE),
    );
    let mut lookup = RouteLookup::new(
        Arc::new(provider),
        RouteEstimator::default(),
        Handle::current(),
    );

    lookup.request(bengaluru(), hosur());
    assert!(matches!(
        lookup.wait_outcome().await,
        Err(RouteError::NoRouteFound { .. })
    ));

    lookup.request(bengaluru(), mysuru());
    lookup.cancel();
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(matches!(lookup.current(), LookupState::Idle));
}
