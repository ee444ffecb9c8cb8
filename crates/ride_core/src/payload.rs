//! Ride-creation request body sent to the backend.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::draft::{RidePreferences, Vehicle};
use crate::pricing::FareQuote;
use crate::routing::{Place, RouteSummary};
use crate::seats::{SeatAllocator, SeatType};
use crate::spatial::GridCell;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatEntry {
    pub seat_type: SeatType,
    pub label: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideCreationPayload {
    pub start: Place,
    pub end: Place,
    pub encoded_polyline: String,
    pub grids_covered: Vec<GridCell>,
    pub total_distance_km: f64,
    pub duration_minutes: f64,
    pub duration_text: String,
    pub recommended_fare: u32,
    pub extra_fare: u32,
    pub total_fare: u32,
    /// Non-zero seat counts only.
    pub seats: Vec<SeatEntry>,
    pub total_seats: u32,
    pub vehicle: Vehicle,
    pub departure_time: NaiveDateTime,
    pub preferences: RidePreferences,
}

impl RideCreationPayload {
    pub fn new(
        route: &RouteSummary,
        fare: &FareQuote,
        seats: &SeatAllocator,
        vehicle: &Vehicle,
        departure_time: NaiveDateTime,
        preferences: &RidePreferences,
    ) -> Self {
        Self {
            start: route.start.clone(),
            end: route.end.clone(),
            encoded_polyline: route.encoded_polyline.clone(),
            grids_covered: route.grids_covered.iter().cloned().collect(),
            total_distance_km: route.metrics.total_distance_km,
            duration_minutes: route.metrics.duration_minutes,
            duration_text: route.metrics.formatted_duration(),
            recommended_fare: fare.recommended_fare(),
            extra_fare: fare.extra_fare(),
            total_fare: fare.total(),
            seats: seats
                .entries()
                .map(|(seat_type, count)| SeatEntry {
                    seat_type,
                    label: seat_type.label().to_string(),
                    count,
                })
                .collect(),
            total_seats: seats.total(),
            vehicle: vehicle.clone(),
            departure_time,
            preferences: preferences.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
