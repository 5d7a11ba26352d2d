use reqwest::Client;
use serde::Deserialize;

use crate::error::{ProviderError, UpstreamError};
use crate::models::weather::round_half_up;
use crate::models::{Coordinate, Weather};

use super::error_chain;

/// OpenWeather current-weather response structure
#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    main: Option<MainReadings>,
    #[serde(default)]
    weather: Vec<Condition>,
    coord: Option<RawCoord>,
    #[serde(default)]
    wind: Option<Wind>,
    sys: Option<Sys>,
    #[serde(default)]
    rain: Option<Rain>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct RawCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    #[serde(default)]
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Sys {
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Rain {
    #[serde(default, rename = "3h")]
    three_hours: Option<f64>,
}

impl OpenWeatherResponse {
    fn into_weather(self) -> Result<Weather, ProviderError> {
        let missing = |field: &str| ProviderError::Malformed(format!("missing {}", field));

        let main = self.main.ok_or_else(|| missing("main"))?;
        let coord = self.coord.ok_or_else(|| missing("coord"))?;
        let sys = self.sys.ok_or_else(|| missing("sys"))?;
        let city = self.name.ok_or_else(|| missing("name"))?;
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| missing("weather conditions"))?;

        Ok(Weather {
            temperature: round_half_up(main.temp),
            description: condition.description,
            coordinates: Coordinate::new(coord.lat, coord.lon),
            feels_like: round_half_up(main.feels_like),
            wind_speed: self.wind.and_then(|wind| wind.speed).unwrap_or(0.0),
            country_code: sys.country,
            // Zero rainfall is reported as no rainfall
            rain_volume: self
                .rain
                .and_then(|rain| rain.three_hours)
                .filter(|volume| *volume != 0.0),
            city,
            icon: condition.icon,
        })
    }
}

/// Current weather lookups against OpenWeather, in metric units.
#[derive(Debug, Clone)]
pub struct WeatherService {
    client: Client,
    api_key: String,
    url: String,
}

impl WeatherService {
    pub fn new(client: Client, url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            url: url.to_string(),
        }
    }

    pub async fn by_city(&self, city: &str) -> Result<Weather, UpstreamError> {
        tracing::info!("☁️ Fetching weather for '{}'", city);
        self.fetch(&[("q", city.to_string())])
            .await
            .map_err(UpstreamError::Weather)
    }

    pub async fn by_coordinates(&self, lat: f64, lon: f64) -> Result<Weather, UpstreamError> {
        tracing::info!("☁️ Fetching weather at ({}, {})", lat, lon);
        self.fetch(&[("lat", lat.to_string()), ("lon", lon.to_string())])
            .await
            .map_err(UpstreamError::Weather)
    }

    async fn fetch(&self, location: &[(&str, String)]) -> Result<Weather, ProviderError> {
        let response = self
            .client
            .get(&self.url)
            .query(location)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Weather request failed: {}", error_chain(&e));
                ProviderError::Request(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("Weather provider returned HTTP {}", status);
            return Err(ProviderError::Status(status));
        }

        let body = response.text().await?;
        let data: OpenWeatherResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Malformed(e.to_string()))?;

        data.into_weather()
    }
}
