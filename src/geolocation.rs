//! Position of the user, the way a browser would report it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GeolocationConfig;

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components within their geographic ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Geolocation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    Unavailable,
    #[error("Location request timed out")]
    Timeout,
}

#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Reports the position written in the configuration, if any.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredGeolocation {
    position: Option<Coordinates>,
}

impl ConfiguredGeolocation {
    #[must_use]
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }

    #[must_use]
    pub fn from_config(config: &GeolocationConfig) -> Self {
        let position = match (config.latitude, config.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        };
        Self { position }
    }
}

#[async_trait]
impl GeolocationProvider for ConfiguredGeolocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        match self.position {
            Some(position) => {
                debug!(
                    "Using configured position ({:.4}, {:.4})",
                    position.latitude, position.longitude
                );
                Ok(position)
            }
            None => Err(GeolocationError::Unavailable),
        }
    }
}

/// Always refuses, like a browser where the user declined the prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedGeolocation;

#[async_trait]
impl GeolocationProvider for DeniedGeolocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::PermissionDenied)
    }
}
