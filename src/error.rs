//! Error types and handling for the weather dashboard

use thiserror::Error;

use crate::geolocation::GeolocationError;

/// Main error type for the dashboard flows
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Geocoding returned no result for a place name
    #[error("No location found for '{query}'")]
    NotFound { query: String },

    /// The provider answered with a non-success HTTP status
    #[error("Request to {endpoint} failed with status {status}")]
    Fetch { endpoint: String, status: u16 },

    /// The position of the user could not be determined
    #[error("Geolocation error: {0}")]
    Geolocation(#[from] GeolocationError),

    /// Transport-level failure (DNS, connect, timeout, ...)
    #[error("Network error: {message}")]
    Network { message: String },

    /// The provider answered, but with a payload we cannot use
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl DashboardError {
    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(query: S) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Create a new fetch error
    pub fn fetch<S: Into<String>>(endpoint: S, status: u16) -> Self {
        Self::Fetch {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new invalid-response error
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::NotFound { .. } => "City not found".to_string(),
            DashboardError::Fetch { .. } | DashboardError::InvalidResponse { .. } => {
                "Weather data not available. Please try again.".to_string()
            }
            DashboardError::Geolocation(_) => "Unable to determine your location.".to_string(),
            DashboardError::Network { .. } => {
                "Unable to connect to the weather service. Please check your internet connection."
                    .to_string()
            }
            DashboardError::Validation { message } => format!("Invalid input: {message}"),
            DashboardError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
        }
    }
}

impl From<reqwest_middleware::Error> for DashboardError {
    fn from(err: reqwest_middleware::Error) -> Self {
        DashboardError::network(err.to_string())
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DashboardError::invalid_response(err.to_string())
        } else {
            DashboardError::network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = DashboardError::not_found("ZzzNotACity");
        assert!(matches!(err, DashboardError::NotFound { .. }));

        let err = DashboardError::fetch("forecast", 500);
        assert!(matches!(err, DashboardError::Fetch { status: 500, .. }));

        let err = DashboardError::validation("empty place name");
        assert!(matches!(err, DashboardError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            DashboardError::not_found("ZzzNotACity").user_message(),
            "City not found"
        );
        assert!(
            DashboardError::fetch("forecast", 500)
                .user_message()
                .contains("not available")
        );
        assert!(
            DashboardError::network("connection refused")
                .user_message()
                .contains("Unable to connect")
        );
        assert!(
            DashboardError::validation("test input")
                .user_message()
                .contains("test input")
        );
    }

    #[test]
    fn test_geolocation_error_conversion() {
        let err: DashboardError = GeolocationError::PermissionDenied.into();
        assert!(matches!(err, DashboardError::Geolocation(_)));
        assert_eq!(err.user_message(), "Unable to determine your location.");
    }

    #[test]
    fn test_display_includes_details() {
        let err = DashboardError::fetch("forecast", 503);
        assert_eq!(err.to_string(), "Request to forecast failed with status 503");
    }
}
