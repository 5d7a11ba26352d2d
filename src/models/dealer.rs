use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::location::Coordinate;

/// Listing record as returned by the 2GIS items endpoint. Every field is
/// optional and may be null on the wire. A field of the wrong type reads as
/// absent, so one odd record never rejects the page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListing {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rubrics: Option<Vec<Rubric>>,
    #[serde(default, deserialize_with = "lenient")]
    pub contacts: Option<Vec<Contact>>,
    #[serde(default, deserialize_with = "lenient")]
    pub point: Option<GeoPoint>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rubric {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contact {
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct GeoPoint {
    #[serde(default, deserialize_with = "lenient_number")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub lon: Option<f64>,
}

/// Accepts string or numeric identifiers.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.filter(|id| !id.is_empty()))
}

/// Strings as-is, numbers and booleans in their JSON spelling.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Numbers, or strings holding a number.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Any nested structure; a shape mismatch reads as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|value| serde_json::from_value(value).ok()))
}

/// Placeholder opening hours; provider schedule data is not interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub monday: String,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            monday: "9:00 AM - 7:00 PM".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dealer {
    pub name: String,
    pub address: String,
    /// Kilometers from the search origin, one decimal place.
    #[serde(rename = "distance")]
    pub distance_km: String,
    pub working_hours: WorkingHours,
    pub coordinates: Coordinate,
    pub phone: String,
    pub id: Option<String>,
}
