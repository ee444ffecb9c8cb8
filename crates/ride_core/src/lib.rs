pub mod config;
pub mod draft;
pub mod duration;
pub mod payload;
pub mod polyline;
pub mod pricing;
pub mod routing;
pub mod seats;
pub mod session;
pub mod spatial;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
