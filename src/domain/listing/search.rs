//! Listing search and map filters.

use serde::{Deserialize, Serialize};

use super::{city_matches, Country, Property, PropertyType};

/// Rectangular map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl MapBounds {
    /// Builds bounds only when all four edges are present.
    pub fn from_parts(
        north: Option<f64>,
        south: Option<f64>,
        east: Option<f64>,
        west: Option<f64>,
    ) -> Option<Self> {
        Some(Self {
            north: north?,
            south: south?,
            east: east?,
            west: west?,
        })
    }

    /// Listings without coordinates are never inside a viewport.
    pub fn contains(&self, property: &Property) -> bool {
        match (property.latitude, property.longitude) {
            (Some(lat), Some(lng)) => {
                lat >= self.south && lat <= self.north && lng >= self.west && lng <= self.east
            }
            _ => false,
        }
    }
}

/// Full-text and attribute search over active listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub query: Option<String>,
    pub property_type: Option<PropertyType>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
    pub bounds: Option<MapBounds>,
    pub is_furnished: Option<bool>,
    pub allows_pets: Option<bool>,
    pub internet_included: Option<bool>,
}

impl SearchCriteria {
    pub fn matches(&self, property: &Property) -> bool {
        if !property.is_active {
            return false;
        }
        if let Some(q) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let needle = q.to_lowercase();
            let hit = [&property.title, &property.description, &property.address]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if let Some(t) = self.property_type {
            if property.property_type != t {
                return false;
            }
        }
        if !price_in_range(property.price, self.min_price, self.max_price) {
            return false;
        }
        if let Some(bounds) = &self.bounds {
            if !bounds.contains(property) {
                return false;
            }
        }
        flag_matches(self.is_furnished, property.is_furnished)
            && flag_matches(self.allows_pets, property.allows_pets)
            && flag_matches(self.internet_included, property.internet_included)
    }
}

/// Query-string filters for the listing index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub city: Option<String>,
    pub property_type: Option<PropertyType>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
    pub country: Option<Country>,
}

impl ListingFilter {
    pub fn matches(&self, property: &Property) -> bool {
        property.is_active
            && self
                .city
                .as_deref()
                .map_or(true, |c| city_matches(&property.city, c))
            && self.property_type.map_or(true, |t| property.property_type == t)
            && self.country.map_or(true, |c| property.country == c)
            && price_in_range(property.price, self.min_price, self.max_price)
    }
}

fn price_in_range(price: i32, min: Option<i32>, max: Option<i32>) -> bool {
    min.map_or(true, |m| price >= m) && max.map_or(true, |m| price <= m)
}

fn flag_matches(wanted: Option<bool>, actual: bool) -> bool {
    wanted.map_or(true, |w| w == actual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PropertyId, Timestamp, UserId};
    use crate::domain::listing::property::sample_new_property;

    fn listing() -> Property {
        sample_new_property().into_property(PropertyId::from_raw(1), UserId::from_raw(1), Timestamp::now())
    }

    #[test]
    fn bounds_require_all_four_edges() {
        assert!(MapBounds::from_parts(Some(1.0), Some(0.0), Some(1.0), None).is_none());
        assert!(MapBounds::from_parts(Some(1.0), Some(0.0), Some(1.0), Some(0.0)).is_some());
    }

    #[test]
    fn query_matches_title_case_insensitively() {
        let criteria = SearchCriteria {
            query: Some("LUMINOSA".to_string()),
            ..Default::default()
        };
        assert!(criteria.matches(&listing()));
    }

    #[test]
    fn query_matches_address() {
        let criteria = SearchCriteria {
            query: Some("via roma".to_string()),
            ..Default::default()
        };
        assert!(criteria.matches(&listing()));
    }

    #[test]
    fn inactive_listings_never_match() {
        let mut property = listing();
        property.is_active = false;
        assert!(!SearchCriteria::default().matches(&property));
    }

    #[test]
    fn price_and_flag_filters_apply() {
        let criteria = SearchCriteria {
            min_price: Some(400),
            max_price: Some(500),
            is_furnished: Some(true),
            allows_pets: Some(true),
            ..Default::default()
        };
        assert!(!criteria.matches(&listing()));

        let criteria = SearchCriteria {
            allows_pets: Some(false),
            ..criteria
        };
        assert!(criteria.matches(&listing()));
    }

    #[test]
    fn bounds_exclude_listings_outside_viewport() {
        let bounds = MapBounds {
            north: 41.0,
            south: 40.0,
            east: 13.0,
            west: 12.0,
        };
        assert!(!bounds.contains(&listing()));
        let milan = MapBounds {
            north: 46.0,
            south: 45.0,
            east: 10.0,
            west: 9.0,
        };
        assert!(milan.contains(&listing()));
    }

    #[test]
    fn listing_filter_matches_city_ignoring_case() {
        let filter = ListingFilter {
            city: Some("milano".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&listing()));
    }
}
