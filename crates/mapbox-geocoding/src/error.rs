//! Error types for the Mapbox geocoding client

use std::fmt;

/// Errors that can occur when geocoding an address
#[derive(Debug)]
pub enum GeocodingError {
    /// The API token environment variable is not set
    MissingToken(String),
    /// HTTP request failed
    Http(reqwest::Error),
    /// Response body is not valid JSON for the expected shape
    Json(serde_json::Error),
    /// The response carried an empty `features` list
    NoResults,
}

impl fmt::Display for GeocodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken(var) => {
                write!(f, "API token missing in environment variable {}", var)
            }
            Self::Http(e) => write!(f, "HTTP error: {}", e),
            Self::Json(e) => write!(f, "malformed geocoding response: {}", e),
            Self::NoResults => write!(f, "geocoding response contained no features"),
        }
    }
}

impl std::error::Error for GeocodingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GeocodingError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<serde_json::Error> for GeocodingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Result type for geocoding operations
pub type Result<T> = std::result::Result<T, GeocodingError>;
