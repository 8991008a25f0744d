//! Location model for geographic coordinates and display names

use serde::{Deserialize, Serialize};

use crate::geolocation::Coordinates;

/// Name shown when a position has no reverse-geocoded name
pub const PLACEHOLDER_NAME: &str = "Your Location";

/// A resolved place
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Place name, also the identity used for pinning
    pub name: String,
    /// Country name, empty when unknown
    pub country: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Location {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            latitude,
            longitude,
        }
    }

    /// Location for a bare position whose name could not be looked up
    #[must_use]
    pub fn placeholder(position: Coordinates) -> Self {
        Self::new(PLACEHOLDER_NAME, "", position.latitude, position.longitude)
    }

    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// "Dhaka, Bangladesh", or just the name when the country is unknown
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
