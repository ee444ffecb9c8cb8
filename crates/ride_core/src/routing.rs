//! Route planning: directions lookup, route summary and fare estimate.
//!
//! - **`DirectionsProvider`**: trait seam for the external directions service.
//!   [`HttpDirectionsClient`](directions::HttpDirectionsClient) (feature `http`)
//!   talks to the real provider, [`FixedDirectionsProvider`] replays a stored
//!   response, and [`CachedDirectionsProvider`] wraps either with an LRU cache.
//! - **`RouteEstimator`**: turns a provider response into a [`RouteSummary`]
//!   (decoded polyline, grid cells, leg metrics) and a fresh [`FareQuote`].

pub mod directions;

use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::RideCoreConfig;
use crate::duration::format_duration;
use crate::polyline::{self, PolylineError};
use crate::pricing::{FareQuote, PricingConfig};
use crate::spatial::{GeoPoint, GridBucketer, GridCell};
use directions::{primary_route, DirectionsError, DirectionsResponse, STATUS_OK};

/// Failure to produce a route summary.
#[derive(Debug, Clone, Error)]
pub enum RouteError {
    #[error("no route found (provider status {status})")]
    NoRouteFound { status: String },
    #[error("route geometry is malformed: {0}")]
    Polyline(#[from] PolylineError),
    #[error(transparent)]
    Directions(Arc<DirectionsError>),
    #[error("route lookup was cancelled")]
    Cancelled,
}

impl From<DirectionsError> for RouteError {
    fn from(err: DirectionsError) -> Self {
        RouteError::Directions(Arc::new(err))
    }
}

/// Trait for directions backends. Calls may block; the lookup session runs
/// them off the async executor.
pub trait DirectionsProvider: Send + Sync {
    fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<DirectionsResponse, DirectionsError>;
}

/// A place the host picked, before it has been bucketed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceInput {
    pub name: String,
    pub point: GeoPoint,
}

impl PlaceInput {
    pub fn new(name: impl Into<String>, point: GeoPoint) -> Self {
        Self {
            name: name.into(),
            point,
        }
    }
}

/// Route endpoint with its grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub name: String,
    pub point: GeoPoint,
    pub grid: GridCell,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMetrics {
    pub total_distance_km: f64,
    pub duration_minutes: f64,
}

impl RouteMetrics {
    /// Provider values: meters and seconds.
    pub fn from_provider(distance_m: f64, duration_s: f64) -> Self {
        Self {
            total_distance_km: distance_m / 1000.0,
            duration_minutes: duration_s / 60.0,
        }
    }

    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration_minutes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub encoded_polyline: String,
    pub grids_covered: BTreeSet<GridCell>,
    pub metrics: RouteMetrics,
    pub start: Place,
    pub end: Place,
}

impl RouteSummary {
    /// Whether `point` falls in a cell this route passes through.
    pub fn covers(&self, point: GeoPoint, grid: &GridBucketer) -> bool {
        self.grids_covered.contains(&grid.cell_of(point))
    }

    /// Decoded route geometry.
    pub fn path(&self) -> Result<Vec<GeoPoint>, PolylineError> {
        polyline::decode(&self.encoded_polyline)
    }
}

/// Summary plus its freshly computed fare (no manual adjustment).
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEstimate {
    pub summary: RouteSummary,
    pub fare: FareQuote,
}

/// Builds route summaries with an explicit grid and pricing policy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RouteEstimator {
    grid: GridBucketer,
    pricing: PricingConfig,
}

impl RouteEstimator {
    pub fn new(grid: GridBucketer, pricing: PricingConfig) -> Self {
        Self { grid, pricing }
    }

    pub fn from_config(config: &RideCoreConfig) -> Self {
        Self::new(config.grid, config.pricing)
    }

    pub fn grid(&self) -> &GridBucketer {
        &self.grid
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    /// Summarize the provider's first route between `start` and `end`.
    ///
    /// Metrics come from the first leg of that route; nothing is recomputed
    /// from the polyline. The returned fare never carries an extra adjustment.
    pub fn summarize(
        &self,
        response: &DirectionsResponse,
        start: &PlaceInput,
        end: &PlaceInput,
    ) -> Result<RouteEstimate, RouteError> {
        let route = primary_route(response)?;

        let leg = &route.legs[0];
        let metrics = RouteMetrics::from_provider(leg.distance.value, leg.duration.value);

        let path = polyline::decode(&route.overview_polyline.points)?;
        let mut grids_covered = self.grid.cells_of(path.iter().copied());
        let start = self.place(start);
        let end = self.place(end);
        grids_covered.insert(start.grid.clone());
        grids_covered.insert(end.grid.clone());

        debug!(
            distance_km = metrics.total_distance_km,
            duration_min = metrics.duration_minutes,
            vertices = path.len(),
            cells = grids_covered.len(),
            "route summarized"
        );

        let fare = self.pricing.quote(metrics.total_distance_km);
        Ok(RouteEstimate {
            summary: RouteSummary {
                encoded_polyline: route.overview_polyline.points.clone(),
                grids_covered,
                metrics,
                start,
                end,
            },
            fare,
        })
    }

    fn place(&self, input: &PlaceInput) -> Place {
        Place {
            name: input.name.clone(),
            point: input.point,
            grid: self.grid.cell_of(input.point),
        }
    }
}

/// Replays one stored response for every query.
#[derive(Debug, Clone)]
pub struct FixedDirectionsProvider {
    response: DirectionsResponse,
}

impl FixedDirectionsProvider {
    pub fn new(response: DirectionsResponse) -> Self {
        Self { response }
    }
}

impl DirectionsProvider for FixedDirectionsProvider {
    fn directions(
        &self,
        _origin: GeoPoint,
        _destination: GeoPoint,
    ) -> Result<DirectionsResponse, DirectionsError> {
        Ok(self.response.clone())
    }
}

/// Coordinates quantized to the polyline precision, so points the provider
/// cannot tell apart share a cache entry.
type CacheKey = (i64, i64, i64, i64);

fn cache_key(origin: GeoPoint, destination: GeoPoint) -> CacheKey {
    let q = |v: f64| (v * 1e5).round() as i64;
    (
        q(origin.latitude),
        q(origin.longitude),
        q(destination.latitude),
        q(destination.longitude),
    )
}

/// LRU-cached wrapper around any [`DirectionsProvider`].
///
/// Only `OK` responses are cached; failures and empty answers always go back
/// to the inner provider.
pub struct CachedDirectionsProvider {
    inner: Box<dyn DirectionsProvider>,
    cache: Mutex<LruCache<CacheKey, DirectionsResponse>>,
}

impl CachedDirectionsProvider {
    pub fn new(inner: Box<dyn DirectionsProvider>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }
}

impl DirectionsProvider for CachedDirectionsProvider {
    fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<DirectionsResponse, DirectionsError> {
        let key = cache_key(origin, destination);

        if let Ok(mut cache) = self.cache.lock() {
            if let Some(cached) = cache.get(&key) {
                debug!(%origin, %destination, "directions cache hit");
                return Ok(cached.clone());
            }
        }

        let response = self.inner.directions(origin, destination)?;

        if response.status == STATUS_OK && !response.routes.is_empty() {
            if let Ok(mut cache) = self.cache.lock() {
                cache.put(key, response.clone());
            }
        }

        Ok(response)
    }
}

/// Share `inner`, behind an LRU cache unless `cache_capacity` is 0.
pub fn shared_provider(
    inner: Box<dyn DirectionsProvider>,
    cache_capacity: usize,
) -> Arc<dyn DirectionsProvider> {
    if cache_capacity == 0 {
        return Arc::from(inner);
    }
    Arc::new(CachedDirectionsProvider::new(inner, cache_capacity))
}

/// Construct the HTTP provider described by `config`, cached when
/// `cache_capacity > 0`.
#[cfg(feature = "http")]
pub fn build_directions_provider(
    config: &crate::config::DirectionsConfig,
) -> Result<Arc<dyn DirectionsProvider>, DirectionsError> {
    let client = directions::HttpDirectionsClient::new(config)?;
    Ok(shared_provider(Box::new(client), config.cache_capacity))
}
