//! Pinned locations
//!
//! An ordered collection of snapshots the user wants kept in view. Names are
//! unique: pinning a name that is already present keeps the first snapshot.

use serde::Serialize;
use tracing::debug;

use crate::models::WeatherSnapshot;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct PinnedSet {
    entries: Vec<WeatherSnapshot>,
}

impl PinnedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `snapshot` unless its location name is already pinned.
    /// Returns whether the set changed.
    pub fn pin(&mut self, snapshot: WeatherSnapshot) -> bool {
        if self.contains(&snapshot.location.name) {
            debug!("{} is already pinned", snapshot.location.name);
            return false;
        }
        self.entries.push(snapshot);
        true
    }

    /// Remove every entry with this name; returns how many were removed
    pub fn unpin(&mut self, name: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|s| s.location.name != name);
        before - self.entries.len()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|s| s.location.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeatherSnapshot> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrentConditions, HourlySeries, Location};
    use crate::view_model::assemble;
    use chrono::NaiveDate;

    fn snapshot(name: &str, temperature: f64) -> WeatherSnapshot {
        assemble(
            Location::new(name, "Somewhere", 10.0, 20.0),
            CurrentConditions {
                temperature,
                wind_speed: 5.0,
                weather_code: 0,
                observed_at: NaiveDate::from_ymd_opt(2024, 5, 3)
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap(),
            },
            HourlySeries::default(),
            None,
        )
    }

    #[test]
    fn test_pin_appends_in_order() {
        let mut pins = PinnedSet::new();
        assert!(pins.pin(snapshot("Dhaka", 30.0)));
        assert!(pins.pin(snapshot("London", 12.0)));
        let names: Vec<&str> = pins.iter().map(|s| s.location.name.as_str()).collect();
        assert_eq!(names, vec!["Dhaka", "London"]);
    }

    #[test]
    fn test_pin_is_idempotent_and_keeps_first() {
        let mut pins = PinnedSet::new();
        assert!(pins.pin(snapshot("Dhaka", 30.0)));
        assert!(!pins.pin(snapshot("Dhaka", 99.0)));
        assert_eq!(pins.len(), 1);
        assert_eq!(pins.iter().next().unwrap().current.temperature, 30.0);
    }

    #[test]
    fn test_unpin() {
        let mut pins = PinnedSet::new();
        pins.pin(snapshot("Dhaka", 30.0));
        pins.pin(snapshot("London", 12.0));

        assert_eq!(pins.unpin("Dhaka"), 1);
        assert!(!pins.contains("Dhaka"));
        assert!(pins.contains("London"));
        assert_eq!(pins.unpin("Dhaka"), 0);
        assert_eq!(pins.unpin("London"), 1);
        assert!(pins.is_empty());
    }
}
