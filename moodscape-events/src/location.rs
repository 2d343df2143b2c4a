//! Decoding of OpenStreetMap Nominatim geocoder responses.

use serde::{Deserialize, Deserializer};

use crate::Location;

/// Queries shorter than this are not worth a geocoder round trip.
pub const MIN_QUERY_LEN: usize = 3;

impl Location {
    /// Where a session starts before the user picks or detects a location.
    #[must_use]
    pub fn default_city() -> Self {
        Location {
            city: "New York".into(),
            state: "NY".into(),
            country: "USA".into(),
            latitude: Some(40.7128),
            longitude: Some(-74.0060),
        }
    }
}

#[must_use]
pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_LEN
}

/// One hit of a forward (`/search`) lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(deserialize_with = "coordinate")]
    pub lat: f64,
    #[serde(deserialize_with = "coordinate")]
    pub lon: f64,
    pub display_name: String,
}

impl From<SearchResult> for Location {
    /// `display_name` reads like `City, State, ..., Country`.
    fn from(result: SearchResult) -> Self {
        let parts = result
            .display_name
            .split(',')
            .map(str::trim)
            .collect::<Vec<_>>();

        Location {
            city: parts.first().copied().unwrap_or_default().to_string(),
            state: parts.get(1).copied().unwrap_or_default().to_string(),
            country: parts.last().copied().unwrap_or_default().to_string(),
            latitude: Some(result.lat),
            longitude: Some(result.lon),
        }
    }
}

/// Response of a reverse (`/reverse`) lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReverseResult {
    #[serde(default)]
    pub address: Address,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl ReverseResult {
    /// Keeps the coordinates that were looked up rather than the ones echoed back.
    #[must_use]
    pub fn into_location(self, latitude: f64, longitude: f64) -> Location {
        let address = self.address;
        let city = address
            .city
            .or(address.town)
            .or(address.village)
            .unwrap_or_default();

        Location {
            city,
            state: address.state.unwrap_or_default(),
            country: address.country.unwrap_or_default(),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }
}

/// Nominatim sends coordinates as strings.
fn coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_result_splits_display_name() {
        let results: Vec<SearchResult> = serde_json::from_str(
            r#"[{
                "lat": "39.7392364",
                "lon": "-104.984862",
                "display_name": "Denver, Colorado, United States"
            }]"#,
        )
        .unwrap();

        let location = Location::from(results.into_iter().next().unwrap());
        assert_eq!(location.city, "Denver");
        assert_eq!(location.state, "Colorado");
        assert_eq!(location.country, "United States");
        assert_eq!(location.latitude, Some(39.7392364));
        assert_eq!(location.longitude, Some(-104.984862));
    }

    #[test]
    fn single_part_display_name_has_no_state() {
        let result = SearchResult {
            lat: 1.0,
            lon: 2.0,
            display_name: "Atlantis".into(),
        };

        let location = Location::from(result);
        assert_eq!(location.city, "Atlantis");
        assert_eq!(location.state, "");
        assert_eq!(location.country, "Atlantis");
    }

    #[test]
    fn numeric_coordinates_are_accepted() {
        let result: SearchResult =
            serde_json::from_str(r#"{"lat": 47.6, "lon": -122.3, "display_name": "Seattle"}"#)
                .unwrap();
        assert_eq!(result.lat, 47.6);
    }

    #[test]
    fn reverse_lookup_falls_back_from_city_to_town_to_village() {
        let result: ReverseResult = serde_json::from_str(
            r#"{"address": {"village": "Hallstatt", "state": "Upper Austria", "country": "Austria"}}"#,
        )
        .unwrap();

        let location = result.into_location(47.56, 13.64);
        assert_eq!(location.city, "Hallstatt");
        assert_eq!(location.state, "Upper Austria");
        assert_eq!(location.latitude, Some(47.56));

        let location = ReverseResult::default().into_location(0.0, 0.0);
        assert_eq!(location.city, "");
    }

    #[test]
    fn short_queries_are_not_searchable() {
        assert!(!is_searchable("NY"));
        assert!(!is_searchable("  ab  "));
        assert!(is_searchable("Rome"));
    }
}
