//! Spatial bucketing: coarse latitude/longitude grid cells used to tag a route
//! for later matching against rider pickups and drop-offs.
//!
//! A cell key is `"<floor(lat / G)>_<floor(lng / G)>"` where `G` is the cell
//! size in degrees (0.05 by default, roughly 5 km). Indices use floor, not
//! truncation, so points just south or west of zero land in cell `-1`.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default grid cell size in degrees (~5 km).
pub const DEFAULT_CELL_SIZE_DEG: f64 = 0.05;

/// A latitude/longitude pair in degrees. Out-of-range values are accepted as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// Grid cell key, e.g. `"259_1551"` or `"-1_-1"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridCell(String);

impl GridCell {
    pub fn from_indices(lat_index: i64, lng_index: i64) -> Self {
        Self(format!("{}_{}", lat_index, lng_index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the key back into `(lat_index, lng_index)`.
    pub fn indices(&self) -> Option<(i64, i64)> {
        let (lat, lng) = self.0.split_once('_')?;
        Some((lat.parse().ok()?, lng.parse().ok()?))
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GridCell {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Map a point to its grid cell. `cell_size_deg` must be positive.
pub fn cell_of(point: GeoPoint, cell_size_deg: f64) -> GridCell {
    debug_assert!(cell_size_deg > 0.0, "cell size must be positive");
    let lat_index = (point.latitude / cell_size_deg).floor() as i64;
    let lng_index = (point.longitude / cell_size_deg).floor() as i64;
    GridCell::from_indices(lat_index, lng_index)
}

/// Distinct cells touched by `points`.
pub fn cells_of<I>(points: I, cell_size_deg: f64) -> BTreeSet<GridCell>
where
    I: IntoIterator<Item = GeoPoint>,
{
    points
        .into_iter()
        .map(|point| cell_of(point, cell_size_deg))
        .collect()
}

/// Grid bucketer carrying a configured cell size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridBucketer {
    pub cell_size_deg: f64,
}

impl Default for GridBucketer {
    fn default() -> Self {
        Self {
            cell_size_deg: DEFAULT_CELL_SIZE_DEG,
        }
    }
}

impl GridBucketer {
    pub fn new(cell_size_deg: f64) -> Self {
        Self { cell_size_deg }
    }

    pub fn cell_of(&self, point: GeoPoint) -> GridCell {
        cell_of(point, self.cell_size_deg)
    }

    pub fn cells_of<I>(&self, points: I) -> BTreeSet<GridCell>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        cells_of(points, self.cell_size_deg)
    }
}
