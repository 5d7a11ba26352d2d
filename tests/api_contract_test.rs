//! HTTP contract of the dashboard API, with every provider mocked.

use axum::{body::Body, http::Request, http::StatusCode, Router};
use axum_test::TestServer;
use dashboard_service::{handlers, AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(upstream: &MockServer) -> Config {
    Config {
        dealer_api_key: Some("test-key".to_string()),
        openweather_api_key: "weather-key".to_string(),
        exchangerate_api_key: "fx-key".to_string(),
        dgis_base_url: upstream.uri(),
        openweather_base_url: format!("{}/data/2.5/weather", upstream.uri()),
        exchangerate_base_url: format!("{}/v6", upstream.uri()),
        request_timeout_secs: 5,
        ..Default::default()
    }
}

fn app(upstream: &MockServer) -> Router {
    let state = AppState::from_config(&test_config(upstream)).expect("state should build");
    handlers::router(state, None)
}

fn test_server(upstream: &MockServer) -> TestServer {
    TestServer::new(app(upstream)).expect("test server should start")
}

#[tokio::test]
async fn health_reports_ok() {
    let upstream = MockServer::start().await;
    let server = test_server(&upstream);

    for route in ["/api/health", "/health"] {
        let response = server.get(route).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["message"], "API is running");
    }
}

#[tokio::test]
async fn dealers_by_city_requires_city() {
    let upstream = MockServer::start().await;
    let server = test_server(&upstream);

    let response = server.get("/api/dealers/city").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "City parameter is required");
    assert_eq!(
        body["message"],
        "Please provide a city name in the query parameter"
    );
    assert!(body.get("success").is_none());
}

#[tokio::test]
async fn dealers_by_city_returns_counted_envelope() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/geo/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"items": [{"point": {"lat": 55.75, "lon": 37.62}}]}
        })))
        .mount(&upstream)
        .await;

    Mock::given(method("GET"))
        .and(path("/3.0/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"items": [
                {"name": "Major Auto", "point": {"lat": 55.76, "lon": 37.62}},
                {"name": "Coffee House", "point": {"lat": 55.75, "lon": 37.62}}
            ]}
        })))
        .mount(&upstream)
        .await;

    let response = test_server(&upstream)
        .get("/api/dealers/city")
        .add_query_param("city", "Moscow")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Major Auto");
    assert_eq!(body["data"][0]["distance"], "1.1");
    assert_eq!(body["data"][0]["address"], "Address not available");
    assert_eq!(body["data"][0]["phone"], "Phone not available");
    assert_eq!(body["data"][0]["workingHours"]["monday"], "9:00 AM - 7:00 PM");
    assert_eq!(body["data"][0]["coordinates"]["latitude"], 55.76);
    assert!(body["data"][0]["id"].is_null());
}

#[tokio::test]
async fn dealers_by_city_upstream_failure_is_500() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/geo/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"items": []}})))
        .mount(&upstream)
        .await;

    let response = test_server(&upstream)
        .get("/api/dealers/city")
        .add_query_param("city", "Atlantis")
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to fetch dealer data");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Failed to fetch dealers:"));
}

#[tokio::test]
async fn dealers_by_coordinates_defaults_radius() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/items"))
        .and(query_param("radius", "10000"))
        .and(query_param("point", "37.62,55.75"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&upstream)
        .await;

    let response = test_server(&upstream)
        .get("/api/dealers/coordinates")
        .add_query_param("lat", "55.75")
        .add_query_param("lon", "37.62")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body, json!({"success": true, "data": [], "count": 0}));
}

#[tokio::test]
async fn dealers_by_coordinates_rejects_bad_input() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(0)
        .mount(&upstream)
        .await;

    let server = test_server(&upstream);

    let bad_requests = [
        vec![("lat", "55.75")],
        vec![("lat", "north"), ("lon", "37.62")],
        vec![("lat", "95"), ("lon", "37.62")],
        vec![("lat", "55.75"), ("lon", "37.62"), ("radius", "0")],
        vec![("lat", "55.75"), ("lon", "37.62"), ("radius", "-5")],
    ];

    for params in bad_requests {
        let mut request = server.get("/api/dealers/coordinates");
        for (key, value) in &params {
            request = request.add_query_param(key, value);
        }
        let response = request.await;
        assert_eq!(
            response.status_code(),
            StatusCode::BAD_REQUEST,
            "params {:?} should be rejected",
            params
        );
    }
}

#[tokio::test]
async fn weather_by_city_envelope() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Kazan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "coord": {"lon": 49.12, "lat": 55.79},
            "weather": [{"description": "clear sky", "icon": "01d"}],
            "main": {"temp": 20.4, "feels_like": 19.5},
            "sys": {"country": "RU"},
            "rain": {"3h": 1.5},
            "name": "Kazan"
        })))
        .mount(&upstream)
        .await;

    let response = test_server(&upstream)
        .get("/api/weather/city")
        .add_query_param("city", "Kazan")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["temperature"], 20);
    assert_eq!(body["data"]["feelsLike"], 20);
    assert_eq!(body["data"]["windSpeed"], 0.0);
    assert_eq!(body["data"]["countryCode"], "RU");
    assert_eq!(body["data"]["rainVolume"], 1.5);
    assert_eq!(body["data"]["coordinates"]["longitude"], 49.12);
    assert!(body.get("count").is_none());
}

#[tokio::test]
async fn weather_by_city_requires_city() {
    let upstream = MockServer::start().await;

    let response = test_server(&upstream)
        .get("/api/weather/city")
        .add_query_param("city", "")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn weather_failure_is_500() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"cod": 401})))
        .mount(&upstream)
        .await;

    let response = test_server(&upstream)
        .get("/api/weather/coordinates")
        .add_query_param("lat", "55.79")
        .add_query_param("lon", "49.12")
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert_eq!(body["error"], "Failed to fetch weather data");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Failed to fetch weather data:"));
}

#[tokio::test]
async fn exchange_latest_uppercases_base() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v6/fx-key/latest/GBP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "base_code": "GBP",
            "time_last_update_utc": "Fri, 16 Oct 2026 00:00:01 +0000",
            "conversion_rates": {"GBP": 1.0}
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let response = test_server(&upstream)
        .get("/api/exchange/latest")
        .add_query_param("base", "gbp")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["baseCurrency"], "GBP");
    assert_eq!(body["data"]["source"], "exchangerate-api.com");
}

#[tokio::test]
async fn exchange_convert_validates_and_converts() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v6/fx-key/pair/EUR/USD/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversion_rate": 1.1,
            "conversion_result": 11.0,
            "time_last_update_utc": "Fri, 16 Oct 2026 00:00:01 +0000"
        })))
        .mount(&upstream)
        .await;

    let server = test_server(&upstream);

    let response = server
        .get("/api/exchange/convert")
        .add_query_param("from", "eur")
        .add_query_param("to", "usd")
        .add_query_param("amount", "10")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["from"], "EUR");
    assert_eq!(body["data"]["to"], "USD");
    assert_eq!(body["data"]["convertedAmount"], 11.0);
    assert_eq!(body["data"]["rate"], 1.1);

    let response = server
        .get("/api/exchange/convert")
        .add_query_param("from", "eur")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn router_allows_cross_origin_requests() {
    let upstream = MockServer::start().await;

    let response = app(&upstream)
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("origin", "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn static_directory_is_served_as_fallback() {
    let upstream = MockServer::start().await;
    let dir = std::env::temp_dir().join(format!("dashboard-static-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>dashboard</h1>").unwrap();

    let state = AppState::from_config(&test_config(&upstream)).unwrap();
    let server = TestServer::new(handlers::router(state, Some(dir.as_path()))).unwrap();

    let response = server.get("/index.html").await;
    response.assert_status_ok();
    assert!(response.text().contains("dashboard"));

    let response = server.get("/api/health").await;
    response.assert_status_ok();

    std::fs::remove_dir_all(&dir).ok();
}
