//! Error types for the batch driver

use std::fmt;

use mapbox_geocoding::GeocodingError;

#[derive(Debug)]
pub enum BatchError {
    Io(std::io::Error),
    Csv(csv::Error),
    Geocoding(GeocodingError),
    Config(String),
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::Io(err) => write!(f, "I/O error: {}", err),
            BatchError::Csv(err) => write!(f, "CSV error: {}", err),
            BatchError::Geocoding(err) => write!(f, "geocoding error: {}", err),
            BatchError::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::Io(err) => Some(err),
            BatchError::Csv(err) => Some(err),
            BatchError::Geocoding(err) => Some(err),
            BatchError::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for BatchError {
    fn from(err: std::io::Error) -> Self {
        BatchError::Io(err)
    }
}

impl From<csv::Error> for BatchError {
    fn from(err: csv::Error) -> Self {
        BatchError::Csv(err)
    }
}

impl From<GeocodingError> for BatchError {
    fn from(err: GeocodingError) -> Self {
        BatchError::Geocoding(err)
    }
}

impl From<tracing_subscriber::filter::ParseError> for BatchError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        BatchError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = BatchError::Config("bad directive".to_string());
        assert_eq!(format!("{}", err), "configuration error: bad directive");
    }

    #[test]
    fn test_geocoding_error_display() {
        let err = BatchError::Geocoding(GeocodingError::NoResults);
        assert_eq!(
            format!("{}", err),
            "geocoding error: geocoding response contained no features"
        );
    }
}
