//! Data models for the weather dashboard
//!
//! - Location: resolved place names and coordinates
//! - Weather: current conditions, hourly/daily series and snapshots

pub mod location;
pub mod weather;

pub use location::{Location, PLACEHOLDER_NAME};
pub use weather::{CurrentConditions, DailyColumns, DailySeries, HourlySeries, WeatherSnapshot};
