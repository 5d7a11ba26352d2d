use serde::Serialize;

use super::location::Coordinate;

/// Current conditions as served to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    pub temperature: i64, // °C, rounded half up
    pub description: String,
    pub coordinates: Coordinate,
    pub feels_like: i64,
    pub wind_speed: f64, // m/s
    pub country_code: Option<String>,
    pub rain_volume: Option<f64>, // mm over the last 3 hours
    pub city: String,
    pub icon: String,
}

/// Round to the nearest integer with halves going up, so -2.5 becomes -2.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
