//! Weather data: current conditions, hourly and daily series, snapshots

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::error::DashboardError;
use crate::models::Location;

/// Conditions at observation time
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// WMO weather code
    pub weather_code: i32,
    /// Local time of the observation, on the hourly grid
    pub observed_at: NaiveDateTime,
}

/// Hour-by-hour forecast stored as parallel columns.
///
/// All columns have the length of `times`; index `i` of each column
/// describes the hour `times[i]`. Missing values are `None`.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct HourlySeries {
    times: Vec<NaiveDateTime>,
    temperatures: Vec<Option<f64>>,
    humidities: Vec<Option<f64>>,
    weather_codes: Vec<Option<i32>>,
}

impl HourlySeries {
    /// Build a series, rejecting columns whose length differs from `times`
    pub fn new(
        times: Vec<NaiveDateTime>,
        temperatures: Vec<Option<f64>>,
        humidities: Vec<Option<f64>>,
        weather_codes: Vec<Option<i32>>,
    ) -> Result<Self, DashboardError> {
        let len = times.len();
        check_column("hourly temperature", temperatures.len(), len)?;
        check_column("hourly humidity", humidities.len(), len)?;
        check_column("hourly weather code", weather_codes.len(), len)?;
        Ok(Self {
            times,
            temperatures,
            humidities,
            weather_codes,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[must_use]
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    #[must_use]
    pub fn time(&self, index: usize) -> Option<NaiveDateTime> {
        self.times.get(index).copied()
    }

    #[must_use]
    pub fn temperature(&self, index: usize) -> Option<f64> {
        self.temperatures.get(index).copied().flatten()
    }

    #[must_use]
    pub fn humidity(&self, index: usize) -> Option<f64> {
        self.humidities.get(index).copied().flatten()
    }

    #[must_use]
    pub fn weather_code(&self, index: usize) -> Option<i32> {
        self.weather_codes.get(index).copied().flatten()
    }
}

/// Day-by-day forecast stored as parallel columns, like [`HourlySeries`]
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct DailySeries {
    times: Vec<NaiveDate>,
    max_temps: Vec<Option<f64>>,
    min_temps: Vec<Option<f64>>,
    weather_codes: Vec<Option<i32>>,
    precipitation_sums: Vec<Option<f64>>,
    sunrises: Vec<Option<NaiveDateTime>>,
    sunsets: Vec<Option<NaiveDateTime>>,
}

/// Columns of a [`DailySeries`] before validation
#[derive(Debug, Clone, Default)]
pub struct DailyColumns {
    pub times: Vec<NaiveDate>,
    pub max_temps: Vec<Option<f64>>,
    pub min_temps: Vec<Option<f64>>,
    pub weather_codes: Vec<Option<i32>>,
    pub precipitation_sums: Vec<Option<f64>>,
    pub sunrises: Vec<Option<NaiveDateTime>>,
    pub sunsets: Vec<Option<NaiveDateTime>>,
}

impl DailySeries {
    pub fn new(columns: DailyColumns) -> Result<Self, DashboardError> {
        let len = columns.times.len();
        check_column("daily max temperature", columns.max_temps.len(), len)?;
        check_column("daily min temperature", columns.min_temps.len(), len)?;
        check_column("daily weather code", columns.weather_codes.len(), len)?;
        check_column("daily precipitation", columns.precipitation_sums.len(), len)?;
        check_column("daily sunrise", columns.sunrises.len(), len)?;
        check_column("daily sunset", columns.sunsets.len(), len)?;
        Ok(Self {
            times: columns.times,
            max_temps: columns.max_temps,
            min_temps: columns.min_temps,
            weather_codes: columns.weather_codes,
            precipitation_sums: columns.precipitation_sums,
            sunrises: columns.sunrises,
            sunsets: columns.sunsets,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[must_use]
    pub fn times(&self) -> &[NaiveDate] {
        &self.times
    }

    #[must_use]
    pub fn date(&self, index: usize) -> Option<NaiveDate> {
        self.times.get(index).copied()
    }

    #[must_use]
    pub fn max_temp(&self, index: usize) -> Option<f64> {
        self.max_temps.get(index).copied().flatten()
    }

    #[must_use]
    pub fn min_temp(&self, index: usize) -> Option<f64> {
        self.min_temps.get(index).copied().flatten()
    }

    #[must_use]
    pub fn weather_code(&self, index: usize) -> Option<i32> {
        self.weather_codes.get(index).copied().flatten()
    }

    #[must_use]
    pub fn precipitation_sum(&self, index: usize) -> Option<f64> {
        self.precipitation_sums.get(index).copied().flatten()
    }

    #[must_use]
    pub fn sunrise(&self, index: usize) -> Option<NaiveDateTime> {
        self.sunrises.get(index).copied().flatten()
    }

    #[must_use]
    pub fn sunset(&self, index: usize) -> Option<NaiveDateTime> {
        self.sunsets.get(index).copied().flatten()
    }
}

fn check_column(name: &str, actual: usize, expected: usize) -> Result<(), DashboardError> {
    if actual == expected {
        Ok(())
    } else {
        Err(DashboardError::invalid_response(format!(
            "{name} has {actual} entries, expected {expected}"
        )))
    }
}

/// Everything known about one location at one fetch time
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    pub hourly: HourlySeries,
    /// `None` when the provider sent no daily block
    pub daily: Option<DailySeries>,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    #[must_use]
    pub fn has_weekly_forecast(&self) -> bool {
        self.daily.as_ref().is_some_and(|d| !d.is_empty())
    }
}
