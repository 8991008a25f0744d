//! `weatherdash` - weather dashboard over the Open-Meteo APIs
//!
//! This library resolves places, fetches forecasts, translates weather codes
//! and assembles the views a dashboard session shows.

pub mod api;
pub mod appearance;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod geolocation;
pub mod location_resolver;
pub mod models;
pub mod pins;
pub mod render;
pub mod telemetry;
pub mod view_model;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use appearance::{Appearance, ThemeMode};
pub use config::DashboardConfig;
pub use dashboard::{CityOutcome, CityWeather, Dashboard, FlowOutcome, PageView};
pub use error::DashboardError;
pub use geolocation::{Coordinates, GeolocationError, GeolocationProvider};
pub use location_resolver::{LocationParser, LocationQuery, LocationResolver};
pub use models::{Location, WeatherSnapshot};
pub use pins::PinnedSet;
pub use view_model::{DashboardView, ViewSettings};
pub use weather::OpenMeteoClient;
pub use weather::codes::{CodeStyle, describe};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
