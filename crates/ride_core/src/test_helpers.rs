//! Test helpers for common fixtures: places, canned provider responses and
//! instrumented directions providers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub use crate::routing::FixedDirectionsProvider;
use crate::routing::directions::{
    DirectionsError, DirectionsResponse, DirectionsRoute, OverviewPolyline, RouteLeg, TextValue,
};
use crate::routing::{DirectionsProvider, PlaceInput};
use crate::spatial::GeoPoint;

/// Bengaluru → Mysuru along the highway, five vertices.
pub const SAMPLE_POLYLINE: &str = "oodnAgerxMzjIbyTbpe@flf@f}e@j~iAnck@fjq@";

/// Vertices encoded in [`SAMPLE_POLYLINE`].
pub const SAMPLE_PATH: [GeoPoint; 5] = [
    GeoPoint::new(12.9716, 77.5946),
    GeoPoint::new(12.9185, 77.4829),
    GeoPoint::new(12.7212, 77.2811),
    GeoPoint::new(12.5218, 76.8972),
    GeoPoint::new(12.2958, 76.6394),
];

pub fn bengaluru() -> PlaceInput {
    PlaceInput::new("Bengaluru", SAMPLE_PATH[0])
}

pub fn mysuru() -> PlaceInput {
    PlaceInput::new("Mysuru", SAMPLE_PATH[4])
}

/// Single-route, single-leg `OK` response.
pub fn ok_response(distance_m: f64, duration_s: f64, polyline: &str) -> DirectionsResponse {
    DirectionsResponse {
        status: "OK".to_string(),
        routes: vec![DirectionsRoute {
            summary: "NH275".to_string(),
            legs: vec![RouteLeg {
                distance: TextValue {
                    text: format!("{:.1} km", distance_m / 1000.0),
                    value: distance_m,
                },
                duration: TextValue {
                    text: format!("{:.0} mins", duration_s / 60.0),
                    value: duration_s,
                },
                start_address: None,
                end_address: None,
            }],
            overview_polyline: OverviewPolyline {
                points: polyline.to_string(),
            },
        }],
        error_message: None,
    }
}

pub fn zero_results_response() -> DirectionsResponse {
    DirectionsResponse {
        status: "ZERO_RESULTS".to_string(),
        routes: Vec::new(),
        error_message: None,
    }
}

/// Fixed responder that counts how often it was asked.
pub struct CountingDirectionsProvider {
    response: DirectionsResponse,
    calls: Arc<AtomicUsize>,
}

impl CountingDirectionsProvider {
    pub fn new(response: DirectionsResponse) -> Self {
        Self {
            response,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared call counter, still readable after the provider is boxed away.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl DirectionsProvider for CountingDirectionsProvider {
    fn directions(
        &self,
        _origin: GeoPoint,
        _destination: GeoPoint,
    ) -> Result<DirectionsResponse, DirectionsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// Answers per destination, optionally after a delay, to stage overlapping
/// lookups. Unknown destinations get `ZERO_RESULTS`.
#[derive(Default)]
pub struct ScriptedDirectionsProvider {
    script: HashMap<(i64, i64), (Duration, DirectionsResponse)>,
}

impl ScriptedDirectionsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer(
        mut self,
        destination: GeoPoint,
        delay: Duration,
        response: DirectionsResponse,
    ) -> Self {
        self.script.insert(key(destination), (delay, response));
        self
    }
}

fn key(point: GeoPoint) -> (i64, i64) {
    (
        (point.latitude * 1e5).round() as i64,
        (point.longitude * 1e5).round() as i64,
    )
}

impl DirectionsProvider for ScriptedDirectionsProvider {
    fn directions(
        &self,
        _origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<DirectionsResponse, DirectionsError> {
        match self.script.get(&key(destination)) {
            Some((delay, response)) => {
                std::thread::sleep(*delay);
                Ok(response.clone())
            }
            None => Ok(zero_results_response()),
        }
    }
}
