//! Directions provider wire format and HTTP client.
//!
//! The provider answers an origin/destination query with a status string and a
//! list of routes; the first route's legs carry distance (meters) and duration
//! (seconds), and its overview polyline carries the geometry.

#[cfg(feature = "http")]
mod client;
mod error;
mod parser;
mod response;

#[cfg(feature = "http")]
pub use client::HttpDirectionsClient;
pub use error::DirectionsError;
pub use parser::parse_response;
pub(crate) use parser::primary_route;
pub use response::{DirectionsResponse, DirectionsRoute, OverviewPolyline, RouteLeg, TextValue};

/// Status the provider reports for a usable answer.
pub const STATUS_OK: &str = "OK";
