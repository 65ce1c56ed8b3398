//! ListPropertiesHandler - Query handler for the filtered listing index.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::listing::{ListingFilter, Property};
use crate::ports::PropertyRepository;

#[derive(Debug, Clone, Default)]
pub struct ListPropertiesQuery {
    pub filter: ListingFilter,
}

/// Active listings matching the filter, newest first.
pub struct ListPropertiesHandler {
    properties: Arc<dyn PropertyRepository>,
}

impl ListPropertiesHandler {
    pub fn new(properties: Arc<dyn PropertyRepository>) -> Self {
        Self { properties }
    }

    pub async fn handle(&self, query: ListPropertiesQuery) -> Result<Vec<Property>, DomainError> {
        self.properties.list(&query.filter).await
    }
}
