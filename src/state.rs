use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::libraries::ResultFormatter;
use crate::services::{
    build_http_client, DealerService, ExchangeRateService, Geocoder, ListingSearchClient,
    WeatherService,
};

/// Services shared by every request. All of them are immutable, so requests
/// never contend on anything but the HTTP client's connection pool.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dealers: Arc<DealerService>,
    pub weather: Arc<WeatherService>,
    pub exchange: Arc<ExchangeRateService>,
}

impl AppState {
    pub fn new(
        dealers: DealerService,
        weather: WeatherService,
        exchange: ExchangeRateService,
    ) -> Self {
        Self {
            dealers: Arc::new(dealers),
            weather: Arc::new(weather),
            exchange: Arc::new(exchange),
        }
    }

    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let client = build_http_client(Duration::from_secs(config.request_timeout_secs))?;
        let dealer_key = config.dealer_api_key();

        let dealers = DealerService::new(
            Geocoder::new(client.clone(), &config.dgis_base_url, dealer_key.clone()),
            ListingSearchClient::new(client.clone(), &config.dgis_base_url, dealer_key),
            ResultFormatter::new(),
        );
        let weather = WeatherService::new(
            client.clone(),
            &config.openweather_base_url,
            config.openweather_api_key.clone(),
        );
        let exchange = ExchangeRateService::new(
            client,
            &config.exchangerate_base_url,
            config.exchangerate_api_key.clone(),
        );

        Ok(Self::new(dealers, weather, exchange))
    }
}
