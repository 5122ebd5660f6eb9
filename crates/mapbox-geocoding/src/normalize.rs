//! Response normalization: nested geocoding JSON to a flat address record

use crate::error::{GeocodingError, Result};
use crate::types::{CleanAddress, ContextEntry, GeocodingResponse};

/// Display value plus optional short code for one context category
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct ContextValue {
    text: Option<String>,
    short_code: Option<String>,
}

impl From<&ContextEntry> for ContextValue {
    fn from(entry: &ContextEntry) -> Self {
        Self {
            text: entry.text.clone(),
            short_code: entry.short_code.clone(),
        }
    }
}

/// Context entries bucketed by category, built in a single pass.
///
/// Provider ids carry a numeric suffix after the category name
/// (`postcode.123`, `region.456`), so categorization is a prefix test.
/// The first matching entry per category wins; the provider's list order
/// is canonical.
#[derive(Debug, Default)]
struct ContextIndex {
    postcode: Option<ContextValue>,
    region: Option<ContextValue>,
    place: Option<ContextValue>,
    locality: Option<ContextValue>,
    country: Option<ContextValue>,
}

impl ContextIndex {
    fn from_entries(entries: &[ContextEntry]) -> Self {
        let mut index = Self::default();
        for entry in entries {
            let slot = if entry.id.starts_with("postcode") {
                &mut index.postcode
            } else if entry.id.starts_with("region") {
                &mut index.region
            } else if entry.id.starts_with("place") {
                &mut index.place
            } else if entry.id.starts_with("locality") {
                &mut index.locality
            } else if entry.id.starts_with("country") {
                &mut index.country
            } else {
                continue;
            };
            if slot.is_none() {
                *slot = Some(ContextValue::from(entry));
            }
        }
        index
    }
}

/// The one behavioral fork in normalization, resolved once during parsing.
///
/// POI results embed the complete street address in their properties;
/// street-address results split number and street name across two
/// top-level fields.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ResolvedAddress {
    PointOfInterest { address: Option<String> },
    StreetAddress {
        number: Option<String>,
        name: Option<String>,
    },
}

impl ResolvedAddress {
    fn canonical(&self) -> Option<String> {
        match self {
            Self::PointOfInterest { address } => address.clone(),
            Self::StreetAddress { number, name } => match (number, name) {
                (Some(number), Some(name)) => Some(format!("{} {}", number, name)),
                (Some(number), None) => Some(number.clone()),
                (None, Some(name)) => Some(name.clone()),
                (None, None) => None,
            },
        }
    }
}

/// Parse a raw geocoding response body into a [`CleanAddress`].
///
/// Pure function of its input: the same body always yields the same record.
/// A body that is not valid JSON for the expected shape fails with
/// [`GeocodingError::Json`]; an empty `features` list fails with
/// [`GeocodingError::NoResults`]. Missing optional keys are not errors and
/// resolve to absent fields.
pub fn parse(body: &str) -> Result<CleanAddress> {
    let response: GeocodingResponse = serde_json::from_str(body)?;
    normalize(&response)
}

/// Derive the flat address record from the first (most relevant) feature.
pub fn normalize(response: &GeocodingResponse) -> Result<CleanAddress> {
    let feature = response.features.first().ok_or(GeocodingError::NoResults)?;

    let address_property = feature.properties.address.clone();
    let place_type = feature.place_type.first().cloned();
    let address_feature = feature.text.clone();
    let street_number = feature.address.clone();

    let context = ContextIndex::from_entries(&feature.context);

    let resolved = if place_type.as_deref() == Some("poi") {
        ResolvedAddress::PointOfInterest {
            address: address_property.clone(),
        }
    } else {
        ResolvedAddress::StreetAddress {
            number: street_number.clone(),
            name: address_feature.clone(),
        }
    };

    Ok(CleanAddress {
        address: resolved.canonical(),
        address_property,
        place_type,
        address_feature,
        street_number,
        postcode: context.postcode.and_then(|c| c.text),
        region_code: context.region.as_ref().and_then(|c| c.short_code.clone()),
        region: context.region.and_then(|c| c.text),
        place: context.place.and_then(|c| c.text),
        locality: context.locality.and_then(|c| c.text),
        country_code: context.country.as_ref().and_then(|c| c.short_code.clone()),
        country: context.country.and_then(|c| c.text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const POI_RESPONSE: &str = r#"{
        "features": [{
            "place_type": ["poi"],
            "text": "The White House",
            "properties": {"address": "1600 Pennsylvania Ave NW"},
            "context": [
                {"id": "postcode.123", "text": "20006"},
                {"id": "place.789", "text": "Washington"},
                {"id": "region.456", "text": "District of Columbia", "short_code": "US-DC"},
                {"id": "country.321", "text": "United States", "short_code": "us"}
            ]
        }]
    }"#;

    const STREET_RESPONSE: &str = r#"{
        "features": [{
            "place_type": ["address"],
            "text": "Flushing Avenue",
            "address": "21",
            "context": [
                {"id": "postcode.111", "text": "11205"},
                {"id": "locality.222", "text": "Brooklyn"},
                {"id": "place.333", "text": "New York"},
                {"id": "region.444", "text": "New York", "short_code": "US-NY"}
            ]
        }]
    }"#;

    #[test]
    fn test_poi_address_taken_from_properties() {
        let record = parse(POI_RESPONSE).unwrap();
        assert_eq!(record.address.as_deref(), Some("1600 Pennsylvania Ave NW"));
        assert_eq!(
            record.address_property.as_deref(),
            Some("1600 Pennsylvania Ave NW")
        );
        assert_eq!(record.place_type.as_deref(), Some("poi"));
        assert_eq!(record.address_feature.as_deref(), Some("The White House"));
        assert!(record.street_number.is_none());
    }

    #[test]
    fn test_street_address_joins_number_and_name() {
        let record = parse(STREET_RESPONSE).unwrap();
        assert_eq!(record.address.as_deref(), Some("21 Flushing Avenue"));
        assert_eq!(record.street_number.as_deref(), Some("21"));
        assert_eq!(record.address_feature.as_deref(), Some("Flushing Avenue"));
        assert_eq!(record.place_type.as_deref(), Some("address"));
    }

    #[test]
    fn test_context_extraction() {
        let record = parse(POI_RESPONSE).unwrap();
        assert_eq!(record.postcode.as_deref(), Some("20006"));
        assert_eq!(record.region.as_deref(), Some("District of Columbia"));
        assert_eq!(record.region_code.as_deref(), Some("US-DC"));
        assert_eq!(record.place.as_deref(), Some("Washington"));
        assert_eq!(record.country.as_deref(), Some("United States"));
        assert_eq!(record.country_code.as_deref(), Some("us"));
        assert!(record.locality.is_none());
    }

    #[test]
    fn test_first_context_match_wins() {
        let entries = vec![
            ContextEntry {
                id: "region.1".to_string(),
                text: Some("New York".to_string()),
                short_code: Some("US-NY".to_string()),
            },
            ContextEntry {
                id: "region.2".to_string(),
                text: Some("New Jersey".to_string()),
                short_code: Some("US-NJ".to_string()),
            },
        ];
        let index = ContextIndex::from_entries(&entries);
        let region = index.region.unwrap();
        assert_eq!(region.text.as_deref(), Some("New York"));
        assert_eq!(region.short_code.as_deref(), Some("US-NY"));
    }

    #[test]
    fn test_unrecognized_context_ids_ignored() {
        let entries = vec![
            ContextEntry {
                id: "neighborhood.5".to_string(),
                text: Some("Clinton Hill".to_string()),
                short_code: None,
            },
            ContextEntry {
                id: "postcode.6".to_string(),
                text: Some("11205".to_string()),
                short_code: None,
            },
        ];
        let index = ContextIndex::from_entries(&entries);
        assert_eq!(index.postcode.unwrap().text.as_deref(), Some("11205"));
        assert!(index.region.is_none());
    }

    #[test]
    fn test_missing_context_is_not_an_error() {
        let record = parse(r#"{"features": [{"place_type": ["address"]}]}"#).unwrap();
        assert!(record.postcode.is_none());
        assert!(record.region.is_none());
        assert!(record.country.is_none());
        assert!(record.address.is_none());
    }

    #[test]
    fn test_street_address_with_missing_number() {
        let record =
            parse(r#"{"features": [{"place_type": ["address"], "text": "Flushing Avenue"}]}"#)
                .unwrap();
        assert_eq!(record.address.as_deref(), Some("Flushing Avenue"));
    }

    #[test]
    fn test_empty_place_type_uses_street_branch() {
        let record = parse(
            r#"{"features": [{"place_type": [], "text": "Flushing Avenue", "address": "21"}]}"#,
        )
        .unwrap();
        assert!(record.place_type.is_none());
        assert_eq!(record.address.as_deref(), Some("21 Flushing Avenue"));
    }

    #[test]
    fn test_poi_without_property_address() {
        let record = parse(
            r#"{"features": [{"place_type": ["poi"], "text": "The White House", "properties": {}}]}"#,
        )
        .unwrap();
        assert!(record.address.is_none());
    }

    #[test]
    fn test_empty_features_fails() {
        let err = parse(r#"{"features": []}"#).unwrap_err();
        assert!(matches!(err, GeocodingError::NoResults));
    }

    #[test]
    fn test_invalid_json_fails() {
        let err = parse("not json at all").unwrap_err();
        assert!(matches!(err, GeocodingError::Json(_)));
    }

    #[test]
    fn test_feature_missing_place_type_fails() {
        let err = parse(r#"{"features": [{"text": "Flushing Avenue"}]}"#).unwrap_err();
        assert!(matches!(err, GeocodingError::Json(_)));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse(STREET_RESPONSE).unwrap();
        let second = parse(STREET_RESPONSE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_verbosity_suppression() {
        let record = parse(STREET_RESPONSE).unwrap();
        let compact = record.fields(false);
        assert!(compact.iter().all(|(name, _)| *name != "country"));
        let verbose = record.fields(true);
        assert!(verbose.contains(&("country", None)));
    }

    #[test]
    fn test_canonical_address_variants() {
        let poi = ResolvedAddress::PointOfInterest {
            address: Some("1600 Pennsylvania Ave NW".to_string()),
        };
        assert_eq!(
            poi.canonical().as_deref(),
            Some("1600 Pennsylvania Ave NW")
        );

        let street = ResolvedAddress::StreetAddress {
            number: Some("21".to_string()),
            name: Some("Flushing Avenue".to_string()),
        };
        assert_eq!(street.canonical().as_deref(), Some("21 Flushing Avenue"));

        let bare = ResolvedAddress::StreetAddress {
            number: None,
            name: None,
        };
        assert!(bare.canonical().is_none());
    }
}
