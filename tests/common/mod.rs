//! Shared fixtures: Open-Meteo payloads and a config pointing at a mock server.

#![allow(dead_code)]

use serde_json::{Value, json};
use weatherdash::DashboardConfig;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn config_for(server: &MockServer) -> DashboardConfig {
    let mut config = DashboardConfig::default();
    config.api.geocoding_base_url = format!("{}/v1", server.uri());
    config.api.forecast_base_url = format!("{}/v1", server.uri());
    config.defaults.other_cities = Vec::new();
    config
}

pub fn place(name: &str, country: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "results": [{
            "id": 1,
            "name": name,
            "latitude": latitude,
            "longitude": longitude,
            "country": country,
            "admin1": "Somewhere"
        }]
    })
}

/// Open-Meteo omits `results` when nothing matched
pub fn no_results() -> Value {
    json!({ "generationtime_ms": 0.4 })
}

/// 24 hours of 2024-05-03, observed at 14:00
pub fn forecast_body(with_daily: bool) -> Value {
    let times: Vec<String> = (0..24).map(|h| format!("2024-05-03T{h:02}:00")).collect();
    let temps: Vec<f64> = (0..24).map(|h| 24.0 + f64::from(h) * 0.5).collect();
    let humidity: Vec<u32> = (0..24).map(|h| 50 + h).collect();
    let codes: Vec<i32> = (0..24).map(|h| if h < 12 { 0 } else { 61 }).collect();

    let mut body = json!({
        "latitude": 23.81,
        "longitude": 90.41,
        "timezone": "Asia/Dhaka",
        "current_weather": {
            "temperature": 30.5,
            "windspeed": 11.2,
            "winddirection": 180,
            "weathercode": 2,
            "time": "2024-05-03T14:00"
        },
        "hourly": {
            "time": times,
            "temperature_2m": temps,
            "relativehumidity_2m": humidity,
            "weathercode": codes
        }
    });

    if with_daily {
        body["daily"] = json!({
            "time": ["2024-05-03", "2024-05-04", "2024-05-05"],
            "weathercode": [2, 61, 95],
            "temperature_2m_max": [33.4, 31.0, 29.6],
            "temperature_2m_min": [25.1, 24.8, 23.9],
            "precipitation_sum": [0.0, 4.2, 12.8],
            "sunrise": ["2024-05-03T05:18", "2024-05-04T05:17", "2024-05-05T05:17"],
            "sunset": ["2024-05-03T18:31", "2024-05-04T18:32", "2024-05-05T18:32"]
        });
    }
    body
}

pub async fn mock_search(server: &MockServer, name: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mock_reverse(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/v1/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Forecast for any coordinates
pub async fn mock_forecast(server: &MockServer, with_daily: bool) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(with_daily)))
        .mount(server)
        .await;
}

/// The standard Dhaka scenario: geocoder and forecast both succeed
pub async fn mock_dhaka(server: &MockServer) {
    mock_search(server, "Dhaka", place("Dhaka", "Bangladesh", 23.81, 90.41)).await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "23.81"))
        .and(query_param("longitude", "90.41"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(true)))
        .mount(server)
        .await;
}
