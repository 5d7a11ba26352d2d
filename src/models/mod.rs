pub mod dealer;
pub mod exchange;
pub mod location;
pub mod requests;
pub mod weather;

// Re-export commonly used types
pub use dealer::{Contact, Dealer, GeoPoint, RawListing, Rubric, WorkingHours};
pub use exchange::{Conversion, LatestRates};
pub use location::Coordinate;
pub use requests::{
    ApiResponse, CityQuery, ConvertQuery, CoordinatesQuery, DealerCoordinatesQuery,
    ErrorResponse, LatestRatesQuery,
};
pub use weather::Weather;
