use reqwest::Client;
use serde_json::Value;

use crate::error::SearchError;
use crate::models::{Coordinate, RawListing};

use super::{error_chain, join_url};

const ITEMS_PATH: &str = "3.0/items";

/// Free-text query sent to the catalog ("car dealership")
pub const DEALER_QUERY: &str = "автосалон";

pub const RESULT_TYPE: &str = "branch";

/// Only the first page is ever requested
pub const PAGE_SIZE: u32 = 10;

pub const SEARCH_FIELDS: &str =
    "items.point,items.name,items.address_name,items.rubrics,items.contacts,items.schedule";

/// The items endpoint nests results under `result` on some deployments and
/// returns them at the top level on others.
#[derive(Debug)]
pub enum ListingEnvelope {
    Nested(Vec<RawListing>),
    Flat(Vec<RawListing>),
    Empty,
}

impl ListingEnvelope {
    /// Probe `result.items`, then `items`. Null counts as absent.
    pub fn probe(mut body: Value) -> Result<Self, SearchError> {
        if let Some(items) = body
            .pointer_mut("/result/items")
            .filter(|items| !items.is_null())
        {
            return parse_items(items.take()).map(ListingEnvelope::Nested);
        }

        if let Some(items) = body.get_mut("items").filter(|items| !items.is_null()) {
            return parse_items(items.take()).map(ListingEnvelope::Flat);
        }

        Ok(ListingEnvelope::Empty)
    }

    pub fn into_items(self) -> Vec<RawListing> {
        match self {
            ListingEnvelope::Nested(items) | ListingEnvelope::Flat(items) => items,
            ListingEnvelope::Empty => Vec::new(),
        }
    }
}

/// `items` must be a list; a record that is not an object is skipped.
fn parse_items(items: Value) -> Result<Vec<RawListing>, SearchError> {
    let Value::Array(records) = items else {
        return Err(SearchError::Malformed("items is not a list".to_string()));
    };

    Ok(records
        .into_iter()
        .filter_map(|record| match serde_json::from_value(record) {
            Ok(listing) => Some(listing),
            Err(e) => {
                tracing::warn!("Skipping unreadable listing: {}", e);
                None
            }
        })
        .collect())
}

/// `lon,lat` as the catalog expects
pub fn format_point(origin: &Coordinate) -> String {
    format!("{},{}", origin.longitude, origin.latitude)
}

pub fn radius_meters(radius_km: f64) -> String {
    (radius_km * 1000.0).to_string()
}

/// Client for the 2GIS catalog items search.
#[derive(Debug, Clone)]
pub struct ListingSearchClient {
    client: Client,
    api_key: String,
    url: String,
}

impl ListingSearchClient {
    pub fn new(client: Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            url: join_url(base_url, ITEMS_PATH),
        }
    }

    /// Query dealer listings around `origin`
    pub async fn search(
        &self,
        origin: &Coordinate,
        radius_km: f64,
    ) -> Result<Vec<RawListing>, SearchError> {
        let point = format_point(origin);
        let radius = radius_meters(radius_km);
        let page_size = PAGE_SIZE.to_string();

        tracing::info!("🔎 Searching listings around {} within {}m", point, radius);

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", DEALER_QUERY),
                ("point", point.as_str()),
                ("radius", radius.as_str()),
                ("type", RESULT_TYPE),
                ("fields", SEARCH_FIELDS),
                ("page_size", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Listing search request failed: {}", error_chain(&e));
                SearchError::Request(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("Listing search returned HTTP {}", status);
            return Err(SearchError::Status(status));
        }

        let body = response.text().await?;
        let body: Value =
            serde_json::from_str(&body).map_err(|e| SearchError::Malformed(e.to_string()))?;

        let items = ListingEnvelope::probe(body)?.into_items();
        tracing::debug!("✅ Listing search returned {} items", items.len());

        Ok(items)
    }
}
