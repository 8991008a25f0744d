//! Configuration management for the weather dashboard
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::DashboardError;
use crate::appearance::{Appearance, ThemeMode};
use crate::view_model::{TrendAnchor, ViewSettings};
use crate::weather::codes::CodeStyle;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    /// Weather/geocoding API configuration
    pub api: ApiConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Default places
    pub defaults: DefaultsConfig,
    /// View model derivation settings
    pub view: ViewConfig,
    /// Theme and code rendering
    pub appearance: Appearance,
    /// Fixed position reported as the user's location
    pub geolocation: GeolocationConfig,
    /// JSON API server
    pub server: ServerConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the geocoding API (`/search`, `/reverse`)
    pub geocoding_base_url: String,
    /// Base URL of the forecast API (`/forecast`)
    pub forecast_base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Retries for transient failures, 0 disables retrying
    pub max_retries: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// City shown when there is neither a search nor a position
    pub default_city: String,
    /// Cities always shown next to the main location
    pub other_cities: Vec<String>,
    /// Look up a display name for coordinate queries
    pub reverse_geocode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Entries in the short forecast strip
    pub strip_hours: usize,
    /// Points in the temperature trend
    pub trend_points: usize,
    /// Where the temperature trend starts
    pub trend_anchor: TrendAnchor,
    /// Start index of the trend when anchored at a fixed offset
    pub trend_offset: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeolocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

// Default value functions
fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_city() -> String {
    "Dhaka".to_string()
}

fn default_other_cities() -> Vec<String> {
    vec!["New York".to_string(), "London".to_string()]
}

fn default_strip_hours() -> usize {
    3
}

fn default_trend_points() -> usize {
    12
}

fn default_trend_offset() -> usize {
    3
}

fn default_port() -> u16 {
    8080
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            geocoding_base_url: default_geocoding_base_url(),
            forecast_base_url: default_forecast_base_url(),
            timeout_seconds: default_timeout(),
            max_retries: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            other_cities: default_other_cities(),
            reverse_geocode: true,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            strip_hours: default_strip_hours(),
            trend_points: default_trend_points(),
            trend_anchor: TrendAnchor::FixedOffset,
            trend_offset: default_trend_offset(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl ViewConfig {
    #[must_use]
    pub fn settings(&self, code_style: CodeStyle) -> ViewSettings {
        ViewSettings {
            strip_hours: self.strip_hours,
            trend_points: self.trend_points,
            trend_anchor: self.trend_anchor,
            trend_offset: self.trend_offset,
            code_style,
            ..ViewSettings::default()
        }
    }
}

impl DashboardConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WEATHERDASH__API__TIMEOUT_SECONDS=10 overrides api.timeout_seconds
        builder = builder.add_source(
            Environment::with_prefix("WEATHERDASH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: DashboardConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weatherdash").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.api.geocoding_base_url.is_empty() {
            self.api.geocoding_base_url = default_geocoding_base_url();
        }
        if self.api.forecast_base_url.is_empty() {
            self.api.forecast_base_url = default_forecast_base_url();
        }
        if self.api.timeout_seconds == 0 {
            self.api.timeout_seconds = default_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.default_city.trim().is_empty() {
            self.defaults.default_city = default_city();
        }
        if self.view.strip_hours == 0 {
            self.view.strip_hours = default_strip_hours();
        }
        if self.view.trend_points == 0 {
            self.view.trend_points = default_trend_points();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
        // trailing slashes would double up when joining endpoint paths
        let trimmed = self.api.geocoding_base_url.trim_end_matches('/').len();
        self.api.geocoding_base_url.truncate(trimmed);
        let trimmed = self.api.forecast_base_url.trim_end_matches('/').len();
        self.api.forecast_base_url.truncate(trimmed);
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_geolocation()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.api.timeout_seconds > 300 {
            return Err(DashboardError::config("API timeout cannot exceed 300 seconds").into());
        }

        if self.api.max_retries > 10 {
            return Err(DashboardError::config("API max retries cannot exceed 10").into());
        }

        if self.view.strip_hours > 24 {
            return Err(DashboardError::config("Forecast strip cannot exceed 24 hours").into());
        }

        if self.view.trend_points > 168 {
            return Err(
                DashboardError::config("Temperature trend cannot exceed 168 points").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for url in [&self.api.geocoding_base_url, &self.api.forecast_base_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(DashboardError::config(format!(
                    "API base URL must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }

        if self.defaults.other_cities.iter().any(|c| c.trim().is_empty()) {
            return Err(DashboardError::config("Other cities cannot contain empty names").into());
        }

        Ok(())
    }

    fn validate_geolocation(&self) -> Result<()> {
        if let Some(lat) = self.geolocation.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(DashboardError::config(format!(
                    "Geolocation latitude must be between -90 and 90, got: {lat}"
                ))
                .into());
            }
        }
        if let Some(lon) = self.geolocation.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(DashboardError::config(format!(
                    "Geolocation longitude must be between -180 and 180, got: {lon}"
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Theme used when the session starts
    #[must_use]
    pub fn initial_theme(&self) -> ThemeMode {
        self.appearance.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.api.forecast_base_url, "https://api.open-meteo.com/v1");
        assert_eq!(
            config.api.geocoding_base_url,
            "https://geocoding-api.open-meteo.com/v1"
        );
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.api.max_retries, 0);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.default_city, "Dhaka");
        assert_eq!(config.defaults.other_cities, vec!["New York", "London"]);
        assert_eq!(config.view.trend_anchor, TrendAnchor::FixedOffset);
        assert_eq!(config.view.trend_offset, 3);
        assert_eq!(config.initial_theme(), ThemeMode::Light);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = DashboardConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = DashboardConfig::default();
        config.api.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("timeout cannot exceed")
        );
    }

    #[test]
    fn test_config_validation_rejects_bad_url() {
        let mut config = DashboardConfig::default();
        config.api.forecast_base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_bad_position() {
        let mut config = DashboardConfig::default();
        config.geolocation.latitude = Some(123.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = DashboardConfig::default();
        config.api.timeout_seconds = 0;
        config.defaults.default_city = "  ".to_string();
        config.api.forecast_base_url = "http://localhost:9000/v1/".to_string();
        config.apply_defaults();
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.defaults.default_city, "Dhaka");
        assert_eq!(config.api.forecast_base_url, "http://localhost:9000/v1");
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = std::env::temp_dir().join(format!("weatherdash-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[defaults]
default_city = "Berlin"
other_cities = ["Paris"]

[view]
trend_anchor = "current_hour"

[appearance]
theme = "dark"
code_style = "emoji"
"#
        )
        .unwrap();

        let config = DashboardConfig::load_from_path(Some(path)).unwrap();
        assert_eq!(config.defaults.default_city, "Berlin");
        assert_eq!(config.defaults.other_cities, vec!["Paris"]);
        assert_eq!(config.view.trend_anchor, TrendAnchor::CurrentHour);
        assert_eq!(config.appearance.theme, ThemeMode::Dark);
        assert_eq!(config.appearance.code_style, CodeStyle::Emoji);
        // untouched sections keep their defaults
        assert_eq!(config.api.timeout_seconds, 30);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = DashboardConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("weatherdash"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
