use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};

use super::{invalid_request, upstream_failure};
use crate::{
    models::{ApiResponse, ConvertQuery, LatestRatesQuery},
    state::AppState,
};

fn invalid_conversion() -> Response {
    invalid_request(
        "Invalid conversion request",
        "Please provide from, to and a numeric amount in the query parameters",
    )
}

pub async fn latest_rates(
    State(state): State<AppState>,
    Query(query): Query<LatestRatesQuery>,
) -> Response {
    match state.exchange.latest(query.base.as_deref()).await {
        Ok(rates) => Json(ApiResponse::success(rates)).into_response(),
        Err(e) => upstream_failure("Failed to fetch exchange rates", &e),
    }
}

pub async fn convert_currency(
    State(state): State<AppState>,
    query: Result<Query<ConvertQuery>, QueryRejection>,
) -> Response {
    let Ok(Query(query)) = query else {
        return invalid_conversion();
    };

    let (Some(from), Some(to), Some(amount)) = (query.from, query.to, query.amount) else {
        return invalid_conversion();
    };

    if from.trim().is_empty() || to.trim().is_empty() || !amount.is_finite() {
        return invalid_conversion();
    }

    match state.exchange.convert(from.trim(), to.trim(), amount).await {
        Ok(conversion) => Json(ApiResponse::success(conversion)).into_response(),
        Err(e) => upstream_failure("Failed to convert currency", &e),
    }
}
