use serde::Deserialize;

/// Normalized address components derived from the first geocoding result.
///
/// Every field is optional; what the provider returns depends on the result
/// type (a point of interest carries its street address in
/// [`address_property`](Self::address_property), a street-level result splits
/// it across [`street_number`](Self::street_number) and
/// [`address_feature`](Self::address_feature)). The `address` field is always
/// derived from those sources, never taken verbatim from a single one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanAddress {
    pub address: Option<String>,
    pub address_property: Option<String>,
    pub place_type: Option<String>,
    pub address_feature: Option<String>,
    pub street_number: Option<String>,
    pub postcode: Option<String>,
    pub region: Option<String>,
    pub region_code: Option<String>,
    pub place: Option<String>,
    pub locality: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
}

impl CleanAddress {
    /// Field names in assembly order.
    pub const FIELDS: [&'static str; 12] = [
        "address",
        "address_property",
        "place_type",
        "address_feature",
        "street_number",
        "postcode",
        "region",
        "region_code",
        "place",
        "locality",
        "country",
        "country_code",
    ];

    /// Look up a field value by name.
    pub fn get(&self, field: &str) -> Option<&str> {
        let value = match field {
            "address" => &self.address,
            "address_property" => &self.address_property,
            "place_type" => &self.place_type,
            "address_feature" => &self.address_feature,
            "street_number" => &self.street_number,
            "postcode" => &self.postcode,
            "region" => &self.region,
            "region_code" => &self.region_code,
            "place" => &self.place,
            "locality" => &self.locality,
            "country" => &self.country,
            "country_code" => &self.country_code,
            _ => return None,
        };
        value.as_deref()
    }

    /// View the record as ordered `(field, value)` pairs.
    ///
    /// With `verbose` set, all twelve fields are present, absent values as
    /// `None`. Otherwise fields whose value is absent or empty are dropped
    /// entirely, so the key set varies per response.
    pub fn fields(&self, verbose: bool) -> Vec<(&'static str, Option<&str>)> {
        Self::FIELDS
            .iter()
            .map(|&name| (name, self.get(name)))
            .filter(|(_, value)| verbose || value.is_some_and(|v| !v.is_empty()))
            .collect()
    }
}

/// Top-level geocoding API response
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    /// Results ordered by relevance; the first is authoritative
    pub features: Vec<Feature>,
}

/// A single geocoding result
#[derive(Debug, Deserialize)]
pub struct Feature {
    /// Category tags, most specific first (e.g. `poi`, `address`).
    /// The key itself is required; an empty list is tolerated.
    pub place_type: Vec<String>,
    /// Primary name: the street for address results, the venue name for POIs
    pub text: Option<String>,
    /// Street number, present only for street-address results
    pub address: Option<String>,
    #[serde(default)]
    pub properties: FeatureProperties,
    /// Enclosing geography, from most to least specific
    #[serde(default)]
    pub context: Vec<ContextEntry>,
}

/// Free-form result properties
#[derive(Debug, Default, Deserialize)]
pub struct FeatureProperties {
    /// Full street address, populated for POI results
    pub address: Option<String>,
}

/// One entry of a feature's `context` list
#[derive(Debug, Deserialize)]
pub struct ContextEntry {
    /// Category-prefixed id, e.g. `postcode.123` or `region.456`
    pub id: String,
    pub text: Option<String>,
    pub short_code: Option<String>,
}
