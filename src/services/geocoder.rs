use reqwest::Client;
use serde::Deserialize;

use crate::error::GeocodeError;
use crate::models::{Coordinate, GeoPoint};

use super::{error_chain, join_url};

const GEOCODE_PATH: &str = "3.0/geo/search";

/// 2GIS geocoder response structure
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    result: Option<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    items: Vec<GeocodeItem>,
}

#[derive(Debug, Deserialize)]
struct GeocodeItem {
    #[serde(default)]
    point: Option<GeoPoint>,
}

/// Resolves city names to coordinates through the 2GIS geocoder.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    api_key: String,
    url: String,
}

impl Geocoder {
    pub fn new(client: Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            url: join_url(base_url, GEOCODE_PATH),
        }
    }

    /// Returns the provider's best city match. An empty result list is an
    /// error, not an empty value.
    pub async fn geocode_city(&self, city: &str) -> Result<Coordinate, GeocodeError> {
        tracing::info!("🌍 Geocoding city '{}'", city);

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("q", city),
                ("key", self.api_key.as_str()),
                ("type", "city"),
                ("fields", "items.point"),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Geocode request failed: {}", error_chain(&e));
                GeocodeError::Request(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("Geocoder returned HTTP {}", status);
            return Err(GeocodeError::Status(status));
        }

        let body = response.text().await?;
        let data: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Malformed(e.to_string()))?;

        let first = data
            .result
            .and_then(|result| result.items.into_iter().next())
            .ok_or_else(|| GeocodeError::NoMatch(city.to_string()))?;

        let point = first
            .point
            .ok_or_else(|| GeocodeError::Malformed("first result has no point".to_string()))?;

        match (point.lat, point.lon) {
            (Some(lat), Some(lon)) => {
                tracing::debug!("✅ '{}' resolved to ({}, {})", city, lat, lon);
                Ok(Coordinate::new(lat, lon))
            }
            _ => Err(GeocodeError::Malformed(
                "first result point lacks lat/lon".to_string(),
            )),
        }
    }
}
