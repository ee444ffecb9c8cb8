use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
    pub overview_polyline: OverviewPolyline,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub distance: TextValue,
    pub duration: TextValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_address: Option<String>,
}

/// Provider quantity: display text plus raw value (meters or seconds).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextValue {
    #[serde(default)]
    pub text: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}
