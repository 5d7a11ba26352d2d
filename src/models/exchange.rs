use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const EXCHANGE_SOURCE: &str = "exchangerate-api.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestRates {
    pub base_currency: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rates: Option<BTreeMap<String, f64>>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub converted_amount: f64,
    pub rate: Option<f64>,
    pub date: String,
}
