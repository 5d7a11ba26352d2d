use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ProviderError, UpstreamError};
use crate::models::exchange::EXCHANGE_SOURCE;
use crate::models::{Conversion, LatestRates};

use super::error_chain;

pub const DEFAULT_BASE_CURRENCY: &str = "USD";

/// ExchangeRate-API `latest` response structure
#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    base_code: Option<String>,
    #[serde(default)]
    time_last_update_utc: Option<String>,
    #[serde(default)]
    conversion_rates: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    rates: Option<BTreeMap<String, f64>>,
}

/// ExchangeRate-API `pair` response structure
#[derive(Debug, Deserialize)]
struct PairResponse {
    #[serde(default)]
    conversion_rate: Option<f64>,
    #[serde(default)]
    conversion_result: Option<f64>,
    #[serde(default)]
    time_last_update_utc: Option<String>,
}

/// Both endpoints report failures as `{"result": "error", "error-type": ...}`
#[derive(Debug, Deserialize)]
struct ResultStatus {
    #[serde(default)]
    result: Option<String>,
    #[serde(default, rename = "error-type")]
    error_type: Option<String>,
}

fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Exchange rates and pair conversion against ExchangeRate-API v6.
#[derive(Debug, Clone)]
pub struct ExchangeRateService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ExchangeRateService {
    pub fn new(client: Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn latest(&self, base_currency: Option<&str>) -> Result<LatestRates, UpstreamError> {
        let base = base_currency
            .filter(|code| !code.is_empty())
            .unwrap_or(DEFAULT_BASE_CURRENCY)
            .to_uppercase();

        tracing::info!("💱 Fetching latest rates for {}", base);

        let data: LatestResponse = self
            .fetch(&["latest", base.as_str()])
            .await
            .map_err(UpstreamError::ExchangeRates)?;

        Ok(LatestRates {
            base_currency: non_empty(data.base_code).unwrap_or(base),
            date: non_empty(data.time_last_update_utc).unwrap_or_else(now_iso8601),
            rates: data.conversion_rates.or(data.rates),
            source: EXCHANGE_SOURCE.to_string(),
        })
    }

    pub async fn convert(&self, from: &str, to: &str, amount: f64) -> Result<Conversion, UpstreamError> {
        let from = from.to_uppercase();
        let to = to.to_uppercase();

        tracing::info!("💱 Converting {} {} to {}", amount, from, to);

        let amount_segment = amount.to_string();
        let data: PairResponse = self
            .fetch(&["pair", from.as_str(), to.as_str(), amount_segment.as_str()])
            .await
            .map_err(UpstreamError::Conversion)?;

        let converted_amount = match (data.conversion_result, data.conversion_rate) {
            (Some(result), _) if result != 0.0 => result,
            (_, Some(rate)) => amount * rate,
            (Some(result), None) => result,
            (None, None) => {
                return Err(UpstreamError::Conversion(ProviderError::Malformed(
                    "missing conversion_result and conversion_rate".to_string(),
                )))
            }
        };

        Ok(Conversion {
            from,
            to,
            amount,
            converted_amount,
            rate: data.conversion_rate,
            date: non_empty(data.time_last_update_utc).unwrap_or_else(now_iso8601),
        })
    }

    /// Build `{base_url}/{api_key}/{segments...}` with each segment escaped
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ProviderError::InvalidUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(&self.api_key)
            .extend(segments);

        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ProviderError> {
        let url = self.endpoint(segments)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::warn!("Exchange rate request failed: {}", error_chain(&e));
            ProviderError::Request(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        // Error payloads carry the reason; prefer it over the bare status
        if let Ok(ResultStatus {
            result: Some(result),
            error_type,
        }) = serde_json::from_str::<ResultStatus>(&body)
        {
            if result == "error" {
                let reason = error_type.unwrap_or_else(|| "unknown-error".to_string());
                tracing::warn!("Exchange rate provider reported {}", reason);
                return Err(ProviderError::Api(reason));
            }
        }

        if !status.is_success() {
            tracing::warn!("Exchange rate provider returned HTTP {}", status);
            return Err(ProviderError::Status(status));
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}
