use reqwest::StatusCode;

/// Failure resolving a place name to coordinates.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("geocode request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("geocoder returned HTTP {0}")]
    Status(StatusCode),

    #[error("no geocode match for '{0}'")]
    NoMatch(String),

    #[error("malformed geocode response: {0}")]
    Malformed(String),
}

/// Failure querying the listing-search provider.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("listing search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("listing search returned HTTP {0}")]
    Status(StatusCode),

    #[error("malformed listing search response: {0}")]
    Malformed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DealerLookupError {
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Failure from a single pass-through provider (weather, exchange rates).
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned HTTP {0}")]
    Status(StatusCode),

    #[error("provider reported error: {0}")]
    Api(String),

    #[error("invalid provider URL: {0}")]
    InvalidUrl(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Error surfaced to the HTTP layer. The display string names the failing
/// subsystem and is sent to the client verbatim.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Failed to fetch dealers: {0}")]
    Dealers(#[from] DealerLookupError),

    #[error("Failed to fetch weather data: {0}")]
    Weather(#[source] ProviderError),

    #[error("Failed to fetch exchange rates: {0}")]
    ExchangeRates(#[source] ProviderError),

    #[error("Failed to convert currency: {0}")]
    Conversion(#[source] ProviderError),
}

impl From<GeocodeError> for UpstreamError {
    fn from(err: GeocodeError) -> Self {
        UpstreamError::Dealers(err.into())
    }
}

impl From<SearchError> for UpstreamError {
    fn from(err: SearchError) -> Self {
        UpstreamError::Dealers(err.into())
    }
}
