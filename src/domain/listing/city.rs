//! Reference city records.

use serde::Serialize;

use crate::domain::foundation::CityId;

use super::Country;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub country: Country,
    pub province: Option<String>,
    pub population: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_popular: bool,
}

/// Popular cities first, then alphabetical.
pub fn sort_cities(cities: &mut [City]) {
    cities.sort_by(|a, b| b.is_popular.cmp(&a.is_popular).then_with(|| a.name.cmp(&b.name)));
}

/// Case-insensitive city match with Unicode lowercasing, the same rule as
/// `LOWER(city) = LOWER(TRIM($1))` in SQL.
pub fn city_matches(stored: &str, query: &str) -> bool {
    stored.to_lowercase() == query.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_match_folds_accented_letters() {
        assert!(city_matches("Forlì", "FORLÌ"));
        assert!(city_matches("Forlì", " forlì "));
        assert!(!city_matches("Forlì", "Forli"));
    }

    fn city(id: i32, name: &str, popular: bool) -> City {
        City {
            id: CityId::from_raw(id),
            name: name.to_string(),
            country: Country::It,
            province: None,
            population: None,
            latitude: None,
            longitude: None,
            is_popular: popular,
        }
    }

    #[test]
    fn popular_cities_come_first() {
        let mut cities = vec![city(1, "Bari", false), city(2, "Roma", true), city(3, "Ancona", false)];
        sort_cities(&mut cities);
        let names: Vec<_> = cities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Roma", "Ancona", "Bari"]);
    }
}
