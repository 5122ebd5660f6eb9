//! Mapbox geocoding API HTTP client

use std::env;

use tracing::{debug, warn};

use crate::error::{GeocodingError, Result};
use crate::normalize::parse;
use crate::types::CleanAddress;

const API_HOST: &str = "api.mapbox.com";

/// Endpoint whose results may only be cached temporarily (provider policy)
pub const GEOCODING_ENDPOINT_TEMPORARY: &str = "geocoding/v5/mapbox.places";
/// Endpoint whose results may be stored permanently (provider policy)
pub const GEOCODING_ENDPOINT_PERMANENT: &str = "geocoding/v5/mapbox.places-permanent";

/// Environment variable holding the API access token
pub const TOKEN_ENV_VAR: &str = "MAPBOX_API_TOKEN";

/// Raw response pair handed back to callers: no retry, no status
/// classification at this layer
#[derive(Debug)]
pub struct ApiResponse {
    pub status: reqwest::StatusCode,
    pub body: String,
}

/// Build the request URL for a free-text query.
///
/// The query is percent-encoded for inclusion in a URL path segment. The
/// endpoint is passed through unvalidated; a malformed endpoint simply
/// produces a URL the provider will reject.
pub fn build_url(query: &str, endpoint: &str) -> String {
    format!(
        "https://{}/{}/{}.json",
        API_HOST,
        endpoint,
        urlencoding::encode(query)
    )
}

/// Issue a blocking GET against a geocoding endpoint.
///
/// Transport failures and non-2xx statuses pass through unmodified for the
/// caller to inspect.
pub fn call_endpoint(query: &str, token: &str, endpoint: &str) -> Result<ApiResponse> {
    let http = reqwest::blocking::Client::new();
    get_endpoint(&http, query, token, endpoint)
}

fn get_endpoint(
    http: &reqwest::blocking::Client,
    query: &str,
    token: &str,
    endpoint: &str,
) -> Result<ApiResponse> {
    let url = build_url(query, endpoint);
    let response = http
        .get(&url)
        .query(&[("access_token", token)])
        .send()
        .map_err(GeocodingError::Http)?;

    let status = response.status();
    if !status.is_success() {
        warn!(%status, query, "geocoding request returned non-success status");
    }
    let body = response.text().map_err(GeocodingError::Http)?;

    Ok(ApiResponse { status, body })
}

/// Mapbox forward geocoding client.
///
/// Holds the access token and endpoint choice for its lifetime; requests are
/// issued sequentially over blocking I/O. Use
/// [`get_clean_address`](Self::get_clean_address) to resolve a free-text
/// query into normalized address components.
#[derive(Debug)]
pub struct MapboxGeocoder {
    http: reqwest::blocking::Client,
    token: String,
    endpoint: String,
}

impl MapboxGeocoder {
    /// Create a client with an injected token and the temporary endpoint
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_endpoint(token, GEOCODING_ENDPOINT_TEMPORARY)
    }

    /// Create a client with an explicit endpoint choice
    pub fn with_endpoint(token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            token: token.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Create a client from the `MAPBOX_API_TOKEN` environment variable.
    ///
    /// Fails with [`GeocodingError::MissingToken`] before any request is
    /// attempted if the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(token_from_env(TOKEN_ENV_VAR)?))
    }

    /// Create a client from the environment with an explicit endpoint
    pub fn from_env_with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        Ok(Self::with_endpoint(token_from_env(TOKEN_ENV_VAR)?, endpoint))
    }

    /// Pass a free-text query to the geocoder and return the raw response
    pub fn geocode(&self, query: &str) -> Result<ApiResponse> {
        get_endpoint(&self.http, query, &self.token, &self.endpoint)
    }

    /// Geocode a query and normalize the response into address components
    pub fn get_clean_address(&self, query: &str) -> Result<CleanAddress> {
        let response = self.geocode(query)?;
        let record = parse(&response.body)?;
        debug!(
            query,
            address = record.address.as_deref().unwrap_or("unknown"),
            "geocoded query"
        );
        Ok(record)
    }
}

fn token_from_env(var: &str) -> Result<String> {
    match env::var(var) {
        Ok(token) if !token.is_empty() => Ok(token),
        _ => Err(GeocodingError::MissingToken(var.to_string())),
    }
}
