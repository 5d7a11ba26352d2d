use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use super::{
    city_param, coordinate_param, invalid_coordinates, invalid_request, missing_city,
    upstream_failure,
};
use crate::{
    models::{ApiResponse, CityQuery, DealerCoordinatesQuery},
    state::AppState,
};

const DEALER_FAILURE: &str = "Failed to fetch dealer data";

/// Dealers around the city's geocoded center
pub async fn dealers_by_city(
    State(state): State<AppState>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> Response {
    let Some(city) = query.ok().and_then(|Query(q)| city_param(q.city)) else {
        return missing_city();
    };

    debug!("Dealer lookup for city '{}'", city);

    match state.dealers.find_by_city(&city).await {
        Ok(dealers) => Json(ApiResponse::counted(dealers)).into_response(),
        Err(e) => upstream_failure(DEALER_FAILURE, &e),
    }
}

/// Dealers within `radius` km (default 10) of a coordinate
pub async fn dealers_by_coordinates(
    State(state): State<AppState>,
    query: Result<Query<DealerCoordinatesQuery>, QueryRejection>,
) -> Response {
    let Ok(Query(query)) = query else {
        return invalid_coordinates();
    };

    let origin = match coordinate_param(query.lat, query.lon) {
        Ok(origin) => origin,
        Err(response) => return response,
    };

    if let Some(radius) = query.radius {
        if !radius.is_finite() || radius <= 0.0 {
            return invalid_request(
                "Invalid radius",
                "Radius must be a positive number of kilometers",
            );
        }
    }

    debug!(
        "Dealer lookup at ({}, {}) radius {:?}km",
        origin.latitude, origin.longitude, query.radius
    );

    match state
        .dealers
        .find_by_coordinates(origin.latitude, origin.longitude, query.radius)
        .await
    {
        Ok(dealers) => Json(ApiResponse::counted(dealers)).into_response(),
        Err(e) => upstream_failure(DEALER_FAILURE, &e),
    }
}
