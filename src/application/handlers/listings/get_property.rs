//! GetPropertyHandler - Query handler for a single listing.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, PropertyId};
use crate::domain::listing::Property;
use crate::ports::PropertyRepository;

use super::require_property;

#[derive(Debug, Clone)]
pub struct GetPropertyQuery {
    pub property_id: PropertyId,
}

pub struct GetPropertyHandler {
    properties: Arc<dyn PropertyRepository>,
}

impl GetPropertyHandler {
    pub fn new(properties: Arc<dyn PropertyRepository>) -> Self {
        Self { properties }
    }

    pub async fn handle(&self, query: GetPropertyQuery) -> Result<Property, DomainError> {
        require_property(self.properties.as_ref(), query.property_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::{ErrorCode, Timestamp, UserId};
    use crate::domain::listing::property::sample_new_property;

    #[tokio::test]
    async fn finds_existing_listing() {
        let store = Arc::new(InMemoryStore::new());
        let created = store
            .create(UserId::from_raw(1), sample_new_property(), Timestamp::now())
            .await
            .unwrap();

        let found = GetPropertyHandler::new(store)
            .handle(GetPropertyQuery {
                property_id: created.id,
            })
            .await
            .unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn missing_listing_is_not_found() {
        let err = GetPropertyHandler::new(Arc::new(InMemoryStore::new()))
            .handle(GetPropertyQuery {
                property_id: PropertyId::from_raw(77),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Proprietà non trovata");
    }
}
