//! Request bodies and query strings for listing endpoints.

use serde::Deserialize;

use crate::adapters::http::error::ApiError;
use crate::domain::listing::{Country, ListingFilter, MapBounds, PropertyType, SearchCriteria};

/// `GET /api/properties?city=&type=&minPrice=&maxPrice=&country=`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPropertiesParams {
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
    pub country: Option<String>,
}

impl ListPropertiesParams {
    pub fn into_filter(self) -> Result<ListingFilter, ApiError> {
        Ok(ListingFilter {
            city: non_empty(self.city),
            property_type: parse_type(self.property_type)?,
            min_price: self.min_price,
            max_price: self.max_price,
            country: match non_empty(self.country) {
                Some(code) => Some(
                    Country::parse(&code)
                        .ok_or_else(|| ApiError::bad_request("Codice paese non valido"))?,
                ),
                None => None,
            },
        })
    }
}

/// `POST /api/properties/search`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
    pub north: Option<f64>,
    pub south: Option<f64>,
    pub east: Option<f64>,
    pub west: Option<f64>,
    pub is_furnished: Option<bool>,
    pub allows_pets: Option<bool>,
    pub internet_included: Option<bool>,
}

impl SearchRequest {
    pub fn into_criteria(self) -> Result<SearchCriteria, ApiError> {
        Ok(SearchCriteria {
            query: non_empty(self.q),
            property_type: parse_type(self.property_type)?,
            min_price: self.min_price,
            max_price: self.max_price,
            bounds: MapBounds::from_parts(self.north, self.south, self.east, self.west),
            is_furnished: self.is_furnished,
            allows_pets: self.allows_pets,
            internet_included: self.internet_included,
        })
    }
}

/// Viewport edges; any missing edge disables the bounds filter.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct BoundsRequest {
    pub north: Option<f64>,
    pub south: Option<f64>,
    pub east: Option<f64>,
    pub west: Option<f64>,
}

/// `POST /api/properties/map`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapRequest {
    #[serde(default)]
    pub bounds: Option<BoundsRequest>,
}

impl MapRequest {
    pub fn bounds(&self) -> Option<MapBounds> {
        self.bounds
            .and_then(|b| MapBounds::from_parts(b.north, b.south, b.east, b.west))
    }
}

/// `GET /api/cities?country=XX`, Italy when omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CitiesParams {
    pub country: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Empty and `"all"` mean no type filter.
fn parse_type(value: Option<String>) -> Result<Option<PropertyType>, ApiError> {
    match non_empty(value) {
        None => Ok(None),
        Some(t) if t == "all" => Ok(None),
        Some(t) => PropertyType::parse(&t)
            .map(Some)
            .ok_or_else(|| ApiError::bad_request("Tipo di immobile non valido")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filters_are_ignored() {
        let filter = ListPropertiesParams {
            city: Some("  ".to_string()),
            property_type: Some("all".to_string()),
            ..Default::default()
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter, ListingFilter::default());
    }

    #[test]
    fn unknown_type_is_a_bad_request() {
        let err = SearchRequest {
            property_type: Some("castello".to_string()),
            ..Default::default()
        }
        .into_criteria()
        .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn partial_bounds_mean_no_bounds() {
        let request = MapRequest {
            bounds: Some(BoundsRequest {
                north: Some(46.0),
                south: Some(45.0),
                east: None,
                west: Some(9.0),
            }),
        };
        assert!(request.bounds().is_none());
    }
}
