//! ListCitiesHandler - Query handler for the reference city list.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::listing::{City, Country};
use crate::ports::CityRepository;

#[derive(Debug, Clone)]
pub struct ListCitiesQuery {
    /// Country code as sent by the client, e.g. `"IT"`.
    pub country: String,
}

/// Cities of one country, popular ones first, then by name.
pub struct ListCitiesHandler {
    cities: Arc<dyn CityRepository>,
}

impl ListCitiesHandler {
    pub fn new(cities: Arc<dyn CityRepository>) -> Self {
        Self { cities }
    }

    pub async fn handle(&self, query: ListCitiesQuery) -> Result<Vec<City>, DomainError> {
        let country = Country::parse(&query.country)
            .ok_or_else(|| DomainError::validation("country", "Codice paese non valido"))?;
        self.cities.list_by_country(country).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::{CityId, ErrorCode};

    fn city(id: i32, name: &str, country: Country, popular: bool) -> City {
        City {
            id: CityId::from_raw(id),
            name: name.to_string(),
            country,
            province: None,
            population: None,
            latitude: None,
            longitude: None,
            is_popular: popular,
        }
    }

    #[tokio::test]
    async fn popular_cities_come_first() {
        let store = Arc::new(InMemoryStore::with_cities(vec![
            city(1, "Bergamo", Country::It, false),
            city(2, "Milano", Country::It, true),
            city(3, "Madrid", Country::Es, true),
            city(4, "Ancona", Country::It, false),
        ]));

        let names: Vec<String> = ListCitiesHandler::new(store)
            .handle(ListCitiesQuery {
                country: "it".to_string(),
            })
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Milano", "Ancona", "Bergamo"]);
    }

    #[tokio::test]
    async fn unknown_country_is_rejected() {
        let err = ListCitiesHandler::new(Arc::new(InMemoryStore::new()))
            .handle(ListCitiesQuery {
                country: "XX".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
