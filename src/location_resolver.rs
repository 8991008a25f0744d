//! Location Resolution Module
//!
//! This module handles resolving location inputs (place names, coordinates)
//! into structured Location objects for the forecast fetch.

use tracing::{debug, info, warn};

use crate::geolocation::Coordinates;
use crate::models::Location;
use crate::weather::OpenMeteoClient;
use crate::{DashboardError, Result};

/// What the user asked for
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Free-text place name
    Text(String),
    /// Known position, from geolocation, a map click or a deep link
    Coordinates(Coordinates),
}

impl LocationQuery {
    /// Build a query from deep-link parameters. `city` wins over coordinates;
    /// coordinates need both halves.
    #[must_use]
    pub fn from_params(city: Option<&str>, lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        if let Some(city) = city.map(str::trim).filter(|c| !c.is_empty()) {
            return Some(LocationQuery::Text(city.to_string()));
        }
        match (lat, lon) {
            (Some(latitude), Some(longitude)) => Some(LocationQuery::Coordinates(
                Coordinates::new(latitude, longitude),
            )),
            _ => None,
        }
    }
}

/// Location parsing utilities
pub struct LocationParser;

impl LocationParser {
    /// Parse location input: `lat,lon` / `lat lon` or a place name
    pub fn parse(input: &str) -> Result<LocationQuery> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DashboardError::validation("Location cannot be empty"));
        }

        if let Ok(coords) = Self::parse_coordinates(input) {
            return Ok(LocationQuery::Coordinates(coords));
        }

        Ok(LocationQuery::Text(input.to_string()))
    }

    /// Parse coordinates from string like "23.81,90.41" or "23.81 90.41"
    fn parse_coordinates(input: &str) -> Result<Coordinates> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() != 2 {
            return Err(DashboardError::validation(
                "Coordinates must be in format 'lat,lon'",
            ));
        }

        let lat = parts[0]
            .parse::<f64>()
            .map_err(|_| DashboardError::validation(format!("Invalid latitude: {}", parts[0])))?;
        let lon = parts[1]
            .parse::<f64>()
            .map_err(|_| DashboardError::validation(format!("Invalid longitude: {}", parts[1])))?;

        let coords = Coordinates::new(lat, lon);
        if !coords.is_valid() {
            return Err(DashboardError::validation(format!(
                "Coordinates out of range: {lat}, {lon}"
            )));
        }
        Ok(coords)
    }
}

/// Service for resolving location inputs
pub struct LocationResolver<'a> {
    client: &'a OpenMeteoClient,
    reverse_geocode: bool,
}

impl<'a> LocationResolver<'a> {
    #[must_use]
    pub fn new(client: &'a OpenMeteoClient) -> Self {
        Self {
            client,
            reverse_geocode: true,
        }
    }

    /// Skip the reverse lookup and name coordinate queries with the placeholder
    #[must_use]
    pub fn with_reverse_geocode(mut self, enabled: bool) -> Self {
        self.reverse_geocode = enabled;
        self
    }

    /// Resolve a location query into a structured Location
    pub async fn resolve(&self, query: &LocationQuery) -> Result<Location> {
        debug!("Resolving location query: {:?}", query);

        let location = match query {
            LocationQuery::Text(name) => self.resolve_name(name).await?,
            LocationQuery::Coordinates(coords) => self.resolve_coordinates(*coords).await?,
        };

        debug!(
            "Resolved location: {} at ({})",
            location.name,
            location.format_coordinates()
        );

        Ok(location)
    }

    /// Resolve a place name via forward geocoding; zero results is an error
    async fn resolve_name(&self, name: &str) -> Result<Location> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DashboardError::validation("Location cannot be empty"));
        }

        info!("Geocoding location: '{}'", name);
        let result = self
            .client
            .search(name)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DashboardError::not_found(name))?;

        debug!(
            "Found location: {} ({:.4}, {:.4})",
            result.name, result.latitude, result.longitude
        );
        Ok(Location::from(result))
    }

    /// Name a position via reverse geocoding, falling back to the placeholder
    async fn resolve_coordinates(&self, coords: Coordinates) -> Result<Location> {
        if !coords.is_valid() {
            return Err(DashboardError::validation(format!(
                "Coordinates out of range: {}, {}",
                coords.latitude, coords.longitude
            )));
        }

        if !self.reverse_geocode {
            return Ok(Location::placeholder(coords));
        }

        match self.client.reverse(coords.latitude, coords.longitude).await {
            Ok(results) => match results.into_iter().next() {
                // keep the queried position, the name is only a label for it
                Some(result) => Ok(Location::new(
                    result.name,
                    result.country.unwrap_or_default(),
                    coords.latitude,
                    coords.longitude,
                )),
                None => {
                    debug!("No reverse geocoding results, using placeholder name");
                    Ok(Location::placeholder(coords))
                }
            },
            Err(e) => {
                warn!("Reverse geocoding failed: {}, using placeholder name", e);
                Ok(Location::placeholder(coords))
            }
        }
    }
}
