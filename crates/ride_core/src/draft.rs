//! Ride draft: the state one "create ride" session builds up before posting.
//!
//! A draft is rebuilt from scratch each time the flow is entered and is owned
//! by that single session; nothing here is persisted.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::RideCoreConfig;
use crate::payload::RideCreationPayload;
use crate::pricing::FareQuote;
use crate::routing::{RouteError, RouteEstimate, RouteSummary};
use crate::seats::SeatAllocator;
use crate::session::LookupState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("no route has been planned")]
    MissingRoute,
    #[error("no departure time has been set")]
    MissingDeparture,
    #[error("at least one seat must be offered")]
    NoSeatsAllocated,
    #[error("no vehicle has been chosen")]
    MissingVehicle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    pub capacity: u32,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capacity,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RidePreferences {
    /// Riders are confirmed without host approval.
    pub instant_booking: bool,
    pub pets_allowed: bool,
    pub smoking_allowed: bool,
    pub luggage_allowed: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RideDraft {
    route: Option<RouteSummary>,
    fare: Option<FareQuote>,
    seats: SeatAllocator,
    vehicle: Option<Vehicle>,
    departure: Option<NaiveDateTime>,
    preferences: RidePreferences,
}

impl RideDraft {
    /// Empty draft offering every seat of `vehicle`.
    pub fn new(vehicle: Vehicle) -> Self {
        let seats = SeatAllocator::new(vehicle.capacity, vehicle.capacity);
        Self {
            route: None,
            fare: None,
            seats,
            vehicle: Some(vehicle),
            departure: None,
            preferences: RidePreferences::default(),
        }
    }

    /// Draft opened before a vehicle is picked; seats follow
    /// `config.default_capacity` until [`switch_vehicle`](Self::switch_vehicle).
    pub fn from_config(config: &RideCoreConfig) -> Self {
        let capacity = config.default_capacity;
        Self {
            route: None,
            fare: None,
            seats: SeatAllocator::new(capacity, capacity),
            vehicle: None,
            departure: None,
            preferences: RidePreferences::default(),
        }
    }

    pub fn route(&self) -> Option<&RouteSummary> {
        self.route.as_ref()
    }

    pub fn fare(&self) -> Option<&FareQuote> {
        self.fare.as_ref()
    }

    /// Manual fare adjustments; `None` until a route is planned.
    pub fn fare_mut(&mut self) -> Option<&mut FareQuote> {
        self.fare.as_mut()
    }

    pub fn seats(&self) -> &SeatAllocator {
        &self.seats
    }

    pub fn seats_mut(&mut self) -> &mut SeatAllocator {
        &mut self.seats
    }

    pub fn vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref()
    }

    pub fn departure(&self) -> Option<NaiveDateTime> {
        self.departure
    }

    pub fn preferences(&self) -> &RidePreferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut RidePreferences {
        &mut self.preferences
    }

    pub fn set_departure(&mut self, departure: NaiveDateTime) {
        self.departure = Some(departure);
    }

    /// Take a recomputed route. The fare is replaced wholesale, so any earlier
    /// manual adjustment is dropped. On failure the previous route is cleared
    /// and the error handed back for display.
    pub fn apply_route(
        &mut self,
        outcome: Result<RouteEstimate, RouteError>,
    ) -> Result<(), RouteError> {
        match outcome {
            Ok(estimate) => {
                debug!(
                    fare = estimate.fare.recommended_fare(),
                    distance_km = estimate.summary.metrics.total_distance_km,
                    "route applied to draft"
                );
                self.route = Some(estimate.summary);
                self.fare = Some(estimate.fare);
                Ok(())
            }
            Err(err) => {
                self.clear_route();
                Err(err)
            }
        }
    }

    /// Apply a settled lookup state; pending or idle states leave the draft
    /// untouched and return `None`.
    pub fn apply_lookup(&mut self, state: &LookupState) -> Option<Result<(), RouteError>> {
        state.outcome().map(|outcome| self.apply_route(outcome))
    }

    pub fn clear_route(&mut self) {
        self.route = None;
        self.fare = None;
    }

    /// Pick another vehicle; seats reset to all-unassigned for its capacity.
    pub fn switch_vehicle(&mut self, vehicle: Vehicle) {
        self.seats.switch_vehicle(vehicle.capacity, vehicle.capacity);
        self.vehicle = Some(vehicle);
    }

    pub fn build_payload(&self) -> Result<RideCreationPayload, DraftError> {
        let (route, fare) = match (&self.route, &self.fare) {
            (Some(route), Some(fare)) => (route, fare),
            _ => return Err(DraftError::MissingRoute),
        };
        let vehicle = self.vehicle.as_ref().ok_or(DraftError::MissingVehicle)?;
        let departure = self.departure.ok_or(DraftError::MissingDeparture)?;
        if self.seats.allocated_count() == 0 {
            return Err(DraftError::NoSeatsAllocated);
        }

        Ok(RideCreationPayload::new(
            route,
            fare,
            &self.seats,
            vehicle,
            departure,
            &self.preferences,
        ))
    }
}
