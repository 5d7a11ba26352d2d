use crate::error::{SearchError, UpstreamError};
use crate::libraries::ResultFormatter;
use crate::models::{Coordinate, Dealer};

use super::{Geocoder, ListingSearchClient};

/// Search radius used for city lookups and when the caller gives none
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Finds car dealers near a city or a coordinate.
///
/// Every lookup is a sequential chain of provider calls (geocode, then
/// search); the first failure aborts the whole lookup.
#[derive(Debug, Clone)]
pub struct DealerService {
    geocoder: Geocoder,
    search: ListingSearchClient,
    formatter: ResultFormatter,
}

impl DealerService {
    pub fn new(geocoder: Geocoder, search: ListingSearchClient, formatter: ResultFormatter) -> Self {
        Self {
            geocoder,
            search,
            formatter,
        }
    }

    pub async fn find_by_city(&self, city: &str) -> Result<Vec<Dealer>, UpstreamError> {
        let origin = self.geocoder.geocode_city(city).await?;
        let dealers = self.search_dealers(&origin, DEFAULT_RADIUS_KM).await?;

        tracing::info!("Found {} dealers near '{}'", dealers.len(), city);
        Ok(dealers)
    }

    pub async fn find_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: Option<f64>,
    ) -> Result<Vec<Dealer>, UpstreamError> {
        let origin = Coordinate::new(latitude, longitude);
        let radius_km = radius_km.unwrap_or(DEFAULT_RADIUS_KM);
        let dealers = self.search_dealers(&origin, radius_km).await?;

        tracing::info!(
            "Found {} dealers within {}km of ({}, {})",
            dealers.len(),
            radius_km,
            latitude,
            longitude
        );
        Ok(dealers)
    }

    async fn search_dealers(
        &self,
        origin: &Coordinate,
        radius_km: f64,
    ) -> Result<Vec<Dealer>, SearchError> {
        let listings = self.search.search(origin, radius_km).await?;
        let total = listings.len();
        let dealers = self.formatter.format(listings, origin);

        tracing::debug!("{} of {} listings matched dealer keywords", dealers.len(), total);
        Ok(dealers)
    }
}
