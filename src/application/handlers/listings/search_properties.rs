//! Search and map viewport queries.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::listing::{MapBounds, Property, SearchCriteria};
use crate::ports::PropertyRepository;

// ════════════════════════════════════════════════════════════════════════════════
// Free-text search
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct SearchPropertiesQuery {
    pub criteria: SearchCriteria,
}

/// Active listings matching the search criteria, newest first.
pub struct SearchPropertiesHandler {
    properties: Arc<dyn PropertyRepository>,
}

impl SearchPropertiesHandler {
    pub fn new(properties: Arc<dyn PropertyRepository>) -> Self {
        Self { properties }
    }

    pub async fn handle(&self, query: SearchPropertiesQuery) -> Result<Vec<Property>, DomainError> {
        let results = self.properties.search(&query.criteria).await?;
        tracing::debug!(
            query = ?query.criteria.query,
            results = results.len(),
            "Property search"
        );
        Ok(results)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Map viewport
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct MapPropertiesQuery {
    /// `None` when the viewport is incomplete; every active listing is returned.
    pub bounds: Option<MapBounds>,
}

pub struct MapPropertiesHandler {
    properties: Arc<dyn PropertyRepository>,
}

impl MapPropertiesHandler {
    pub fn new(properties: Arc<dyn PropertyRepository>) -> Self {
        Self { properties }
    }

    pub async fn handle(&self, query: MapPropertiesQuery) -> Result<Vec<Property>, DomainError> {
        self.properties.in_bounds(query.bounds).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::listing::property::sample_new_property;

    async fn seeded() -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        let now = Timestamp::now();

        let mut milan = sample_new_property();
        milan.title = "Bilocale Navigli".to_string();
        store.create(UserId::from_raw(1), milan, now).await.unwrap();

        let mut naples = sample_new_property();
        naples.title = "Stanza vista mare".to_string();
        naples.city = "Napoli".to_string();
        naples.latitude = Some(40.85);
        naples.longitude = Some(14.27);
        naples.is_furnished = false;
        store
            .create(UserId::from_raw(1), naples, now.add_days(1))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn text_query_is_case_insensitive() {
        let found = SearchPropertiesHandler::new(seeded().await)
            .handle(SearchPropertiesQuery {
                criteria: SearchCriteria {
                    query: Some("NAVIGLI".to_string()),
                    ..SearchCriteria::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Bilocale Navigli");
    }

    #[tokio::test]
    async fn flags_narrow_the_results() {
        let found = SearchPropertiesHandler::new(seeded().await)
            .handle(SearchPropertiesQuery {
                criteria: SearchCriteria {
                    is_furnished: Some(false),
                    ..SearchCriteria::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].city, "Napoli");
    }

    #[tokio::test]
    async fn map_without_bounds_returns_everything() {
        let handler = MapPropertiesHandler::new(seeded().await);
        let all = handler.handle(MapPropertiesQuery { bounds: None }).await.unwrap();
        assert_eq!(all.len(), 2);

        let south = handler
            .handle(MapPropertiesQuery {
                bounds: Some(MapBounds {
                    north: 42.0,
                    south: 38.0,
                    east: 16.0,
                    west: 12.0,
                }),
            })
            .await
            .unwrap();
        assert_eq!(south.len(), 1);
        assert_eq!(south[0].city, "Napoli");
    }
}
