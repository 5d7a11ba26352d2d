pub mod dealers;
pub mod exchange;
pub mod weather;

use std::path::Path;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::error;

use crate::error::UpstreamError;
use crate::models::{Coordinate, ErrorResponse};
use crate::state::AppState;

/// Build the HTTP router. When `static_dir` is given, unmatched paths are
/// served from it.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/api/health", get(health))
        .route("/api/weather/city", get(weather::weather_by_city))
        .route("/api/weather/coordinates", get(weather::weather_by_coordinates))
        .route("/api/exchange/latest", get(exchange::latest_rates))
        .route("/api/exchange/convert", get(exchange::convert_currency))
        .route("/api/dealers/city", get(dealers::dealers_by_city))
        .route("/api/dealers/coordinates", get(dealers::dealers_by_coordinates))
        .with_state(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "message": "API is running",
        "service": "dashboard-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub(crate) fn invalid_request(error: &str, message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::invalid(error, message))).into_response()
}

pub(crate) fn upstream_failure(error: &str, err: &UpstreamError) -> Response {
    error!("{}: {}", error, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::upstream(error, err.to_string())),
    )
        .into_response()
}

pub(crate) fn missing_city() -> Response {
    invalid_request(
        "City parameter is required",
        "Please provide a city name in the query parameter",
    )
}

/// Non-blank, trimmed city name
pub(crate) fn city_param(city: Option<String>) -> Option<String> {
    city.map(|c| c.trim().to_string()).filter(|c| !c.is_empty())
}

/// Both coordinates present and within GPS ranges
pub(crate) fn coordinate_param(lat: Option<f64>, lon: Option<f64>) -> Result<Coordinate, Response> {
    let (Some(lat), Some(lon)) = (lat, lon) else {
        return Err(invalid_coordinates());
    };

    let coordinate = Coordinate::new(lat, lon);
    if !coordinate.is_valid() {
        return Err(invalid_coordinates());
    }
    Ok(coordinate)
}

pub(crate) fn invalid_coordinates() -> Response {
    invalid_request(
        "Invalid coordinates",
        "Please provide lat (-90 to 90) and lon (-180 to 180) query parameters",
    )
}
