//! Mapbox Forward Geocoding Client
//!
//! A Rust client for the [Mapbox geocoding API](https://docs.mapbox.com/api/search/geocoding/)
//! that turns a free-text address query into a flat record of normalized
//! address components (street address, postcode, region, locality, country).

mod client;
mod error;
mod normalize;
mod types;

pub use client::{
    build_url, call_endpoint, ApiResponse, MapboxGeocoder, GEOCODING_ENDPOINT_PERMANENT,
    GEOCODING_ENDPOINT_TEMPORARY, TOKEN_ENV_VAR,
};
pub use error::{GeocodingError, Result};
pub use normalize::{normalize, parse};
pub use types::{CleanAddress, ContextEntry, Feature, FeatureProperties, GeocodingResponse};
