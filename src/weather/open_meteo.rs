//! Open-Meteo HTTP client and response structures
//!
//! Geocoding (`/search`, `/reverse`) and forecast (`/forecast`) endpoints.
//! No API key is required.

use std::time::{Duration, Instant};

use chrono::{NaiveDate, NaiveDateTime};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::config::ApiConfig;
use crate::models::{
    CurrentConditions, DailyColumns, DailySeries, HourlySeries, Location, WeatherSnapshot,
};
use crate::view_model::assemble;
use crate::{DashboardError, Result};

const USER_AGENT: &str = concat!("weatherdash/", env!("CARGO_PKG_VERSION"));

const HOURLY_VARIABLES: &str = "temperature_2m,relativehumidity_2m,weathercode";
const DAILY_VARIABLES: &str =
    "weathercode,temperature_2m_max,temperature_2m_min,precipitation_sum,sunrise,sunset";

/// Forecast response from the Open-Meteo API
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
    pub current_weather: Option<CurrentWeatherData>,
    pub hourly: Option<HourlyData>,
    pub daily: Option<DailyData>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherData {
    pub temperature: f64,
    pub windspeed: f64,
    pub weathercode: i32,
    pub time: String,
}

/// Hourly weather data, one array per variable
#[derive(Debug, Deserialize)]
pub struct HourlyData {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m")]
    pub temperature: Option<Vec<Option<f64>>>,
    #[serde(rename = "relativehumidity_2m")]
    pub humidity: Option<Vec<Option<f64>>>,
    #[serde(rename = "weathercode")]
    pub weather_code: Option<Vec<Option<i32>>>,
}

/// Daily weather data, one array per variable
#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Option<Vec<Option<f64>>>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Option<Vec<Option<f64>>>,
    #[serde(rename = "weathercode")]
    pub weather_code: Option<Vec<Option<i32>>>,
    #[serde(rename = "precipitation_sum")]
    pub precipitation: Option<Vec<Option<f64>>>,
    pub sunrise: Option<Vec<Option<String>>>,
    pub sunset: Option<Vec<Option<String>>>,
}

/// Geocoding response, shared by search and reverse lookups
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
    pub admin1: Option<String>,
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        Location::new(
            result.name,
            result.country.unwrap_or_default(),
            result.latitude,
            result.longitude,
        )
    }
}

/// Parse a local timestamp such as `2024-05-03T14:00`
pub fn parse_local_time(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| DashboardError::invalid_response(format!("bad timestamp '{value}': {e}")))
}

/// Parse a date such as `2024-05-03`
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| DashboardError::invalid_response(format!("bad date '{value}': {e}")))
}

fn column<T: Clone>(values: Option<Vec<Option<T>>>, len: usize) -> Vec<Option<T>> {
    values.unwrap_or_else(|| vec![None; len])
}

fn time_column(values: Option<Vec<Option<String>>>, len: usize) -> Result<Vec<Option<NaiveDateTime>>> {
    column(values, len)
        .into_iter()
        .map(|v| v.as_deref().map(parse_local_time).transpose())
        .collect()
}

impl HourlyData {
    fn into_series(self) -> Result<HourlySeries> {
        let len = self.time.len();
        let times = self
            .time
            .iter()
            .map(|t| parse_local_time(t))
            .collect::<Result<Vec<_>>>()?;
        HourlySeries::new(
            times,
            column(self.temperature, len),
            column(self.humidity, len),
            column(self.weather_code, len),
        )
    }
}

impl DailyData {
    fn into_series(self) -> Result<DailySeries> {
        let len = self.time.len();
        let times = self
            .time
            .iter()
            .map(|d| parse_date(d))
            .collect::<Result<Vec<_>>>()?;
        DailySeries::new(DailyColumns {
            times,
            max_temps: column(self.temperature_max, len),
            min_temps: column(self.temperature_min, len),
            weather_codes: column(self.weather_code, len),
            precipitation_sums: column(self.precipitation, len),
            sunrises: time_column(self.sunrise, len)?,
            sunsets: time_column(self.sunset, len)?,
        })
    }
}

impl ForecastResponse {
    /// Normalize the raw payload into a snapshot for `location`.
    ///
    /// A missing daily block is fine; a missing current block is not.
    pub fn into_snapshot(self, location: Location) -> Result<WeatherSnapshot> {
        let current = self
            .current_weather
            .ok_or_else(|| DashboardError::invalid_response("forecast has no current_weather"))?;
        let current = CurrentConditions {
            temperature: current.temperature,
            wind_speed: current.windspeed,
            weather_code: current.weathercode,
            observed_at: parse_local_time(&current.time)?,
        };

        let hourly = match self.hourly {
            Some(hourly) => hourly.into_series()?,
            None => {
                warn!("Forecast for '{}' has no hourly block", location.name);
                HourlySeries::default()
            }
        };

        let daily = self.daily.map(DailyData::into_series).transpose()?;
        if daily.is_none() {
            debug!("Forecast for '{}' has no daily block", location.name);
        }

        Ok(assemble(location, current, hourly, daily))
    }
}

/// Client for the Open-Meteo geocoding and forecast APIs
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: ClientWithMiddleware,
    geocoding_base_url: String,
    forecast_base_url: String,
}

impl OpenMeteoClient {
    /// Create a new client from the API settings
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DashboardError::config(format!("Failed to create HTTP client: {e}")))?;

        let mut builder = ClientBuilder::new(client);
        if config.max_retries > 0 {
            let policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
            builder = builder.with(RetryTransientMiddleware::new_with_policy(policy));
        }

        Ok(Self {
            http: builder.build(),
            geocoding_base_url: config.geocoding_base_url.trim_end_matches('/').to_string(),
            forecast_base_url: config.forecast_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Forward geocoding, best match only
    #[instrument(skip(self))]
    pub async fn search(&self, name: &str) -> Result<Vec<GeocodingResult>> {
        let url = format!(
            "{}/search?name={}&count=1",
            self.geocoding_base_url,
            urlencoding::encode(name)
        );
        let response: GeocodingResponse = self.get_json(&url, "geocoding search").await?;
        let results = response.results.unwrap_or_default();
        if results.is_empty() {
            warn!("No results found for location '{}'", name);
        }
        Ok(results)
    }

    /// Reverse geocoding, best match only
    #[instrument(skip(self))]
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Vec<GeocodingResult>> {
        let url = format!(
            "{}/reverse?latitude={}&longitude={}&count=1",
            self.geocoding_base_url, latitude, longitude
        );
        let response: GeocodingResponse = self.get_json(&url, "reverse geocoding").await?;
        Ok(response.results.unwrap_or_default())
    }

    /// Current, hourly and daily forecast in the local timezone of the point
    #[instrument(skip(self))]
    pub async fn forecast(&self, latitude: f64, longitude: f64) -> Result<ForecastResponse> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current_weather=true&hourly={}&daily={}&timezone=auto",
            self.forecast_base_url, latitude, longitude, HOURLY_VARIABLES, DAILY_VARIABLES
        );
        self.get_json(&url, "forecast").await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, endpoint: &str) -> Result<T> {
        debug!("Open-Meteo request URL: {}", url);
        let start_time = Instant::now();

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("{} request failed with HTTP {}", endpoint, status);
            return Err(DashboardError::fetch(endpoint, status.as_u16()));
        }

        let body = response.json::<T>().await?;

        let duration = start_time.elapsed();
        info!("{} request completed in {:.3}s", endpoint, duration.as_secs_f64());
        if duration.as_secs() > 5 {
            warn!("Slow {} response: {:.3}s", endpoint, duration.as_secs_f64());
        }
        Ok(body)
    }
}
