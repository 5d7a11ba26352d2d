pub mod dealer;
pub mod exchange;
pub mod geocoder;
pub mod listing_search;
pub mod location;
pub mod weather;

use std::error::Error;
use std::time::Duration;

pub use dealer::DealerService;
pub use exchange::ExchangeRateService;
pub use geocoder::Geocoder;
pub use listing_search::ListingSearchClient;
pub use weather::WeatherService;

/// Build the HTTP client shared by every upstream provider
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("dashboard-service/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
}

/// Render a request error with its full source chain for logging
pub(crate) fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!("\n  Caused by: {}", cause));
        source = cause.source();
    }
    message
}

/// Join a base URL and an endpoint path without doubling slashes
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://catalog.api.2gis.com", "3.0/items"),
            "https://catalog.api.2gis.com/3.0/items"
        );
        assert_eq!(
            join_url("http://127.0.0.1:8080/", "/3.0/geo/search"),
            "http://127.0.0.1:8080/3.0/geo/search"
        );
    }
}
