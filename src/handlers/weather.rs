use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};

use super::{city_param, coordinate_param, invalid_coordinates, missing_city, upstream_failure};
use crate::{
    models::{ApiResponse, CityQuery, CoordinatesQuery},
    state::AppState,
};

const WEATHER_FAILURE: &str = "Failed to fetch weather data";

pub async fn weather_by_city(
    State(state): State<AppState>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> Response {
    let Some(city) = query.ok().and_then(|Query(q)| city_param(q.city)) else {
        return missing_city();
    };

    match state.weather.by_city(&city).await {
        Ok(weather) => Json(ApiResponse::success(weather)).into_response(),
        Err(e) => upstream_failure(WEATHER_FAILURE, &e),
    }
}

pub async fn weather_by_coordinates(
    State(state): State<AppState>,
    query: Result<Query<CoordinatesQuery>, QueryRejection>,
) -> Response {
    let Ok(Query(query)) = query else {
        return invalid_coordinates();
    };

    let origin = match coordinate_param(query.lat, query.lon) {
        Ok(origin) => origin,
        Err(response) => return response,
    };

    match state
        .weather
        .by_coordinates(origin.latitude, origin.longitude)
        .await
    {
        Ok(weather) => Json(ApiResponse::success(weather)).into_response(),
        Err(e) => upstream_failure(WEATHER_FAILURE, &e),
    }
}
