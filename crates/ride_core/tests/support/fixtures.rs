#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use ride_core::draft::Vehicle;
use ride_core::routing::directions::{parse_response, DirectionsResponse};

/// Recorded provider answer for Bengaluru → Mysuru.
pub const BENGALURU_MYSURU_JSON: &str = r#"{
    "geocoded_waypoints": [
        { "geocoder_status": "OK", "place_id": "ChIJbU60yXAWrjsR4E9-UejD3_g" },
        { "geocoder_status": "OK", "place_id": "ChIJ8Z0NaQpwrzsRA1iO9bs3Kq4" }
    ],
    "routes": [{
        "summary": "Bengaluru - Mysuru Expy",
        "legs": [{
            "distance": { "text": "145 km", "value": 145210 },
            "duration": { "text": "2 hours 32 mins", "value": 9120 },
            "start_address": "Bengaluru, Karnataka, India",
            "end_address": "Mysuru, Karnataka, India"
        }],
        "overview_polyline": { "points": "oodnAgerxMzjIbyTbpe@flf@f}e@j~iAnck@fjq@" }
    }],
    "status": "OK"
}"#;

pub const ZERO_RESULTS_JSON: &str = r#"{ "geocoded_waypoints": [], "routes": [], "status": "ZERO_RESULTS" }"#;

pub fn bengaluru_mysuru() -> DirectionsResponse {
    parse_response(BENGALURU_MYSURU_JSON).expect("fixture should parse")
}

pub fn zero_results() -> DirectionsResponse {
    parse_response(ZERO_RESULTS_JSON).expect("fixture should parse")
}

pub fn hatchback() -> Vehicle {
    Vehicle::new("veh-hatch", "Hatchback", 4)
}

pub fn mpv() -> Vehicle {
    Vehicle::new("veh-mpv", "MPV", 7)
}

pub fn morning_departure() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 20)
        .and_then(|d| d.and_hms_opt(7, 30, 0))
        .expect("valid datetime")
}
