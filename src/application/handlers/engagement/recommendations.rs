//! Recommendation and similar-listing queries.

use std::sync::Arc;

use crate::domain::engagement::{preferred_type, similar_listings, DEFAULT_RECOMMENDATION_LIMIT};
use crate::domain::foundation::{DomainError, PropertyId, UserId};
use crate::domain::listing::Property;
use crate::ports::{EngagementRepository, PropertyRepository};

#[derive(Debug, Clone)]
pub struct GetRecommendationsQuery {
    pub user_id: UserId,
    pub limit: Option<usize>,
}

/// Latest listings of the type the user interacts with most. Users with no
/// history get the latest listings of any type.
pub struct GetRecommendationsHandler {
    engagement: Arc<dyn EngagementRepository>,
    properties: Arc<dyn PropertyRepository>,
}

impl GetRecommendationsHandler {
    pub fn new(
        engagement: Arc<dyn EngagementRepository>,
        properties: Arc<dyn PropertyRepository>,
    ) -> Self {
        Self {
            engagement,
            properties,
        }
    }

    pub async fn handle(&self, query: GetRecommendationsQuery) -> Result<Vec<Property>, DomainError> {
        let limit = query
            .limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_RECOMMENDATION_LIMIT);

        let types = self.engagement.interacted_types(query.user_id).await?;
        let preferred = preferred_type(types);

        self.properties.latest(preferred, limit).await
    }
}

#[derive(Debug, Clone)]
pub struct GetSimilarPropertiesQuery {
    pub property_id: PropertyId,
}

/// Listings comparable to one listing. Unknown listings have none.
pub struct GetSimilarPropertiesHandler {
    properties: Arc<dyn PropertyRepository>,
}

impl GetSimilarPropertiesHandler {
    pub fn new(properties: Arc<dyn PropertyRepository>) -> Self {
        Self { properties }
    }

    pub async fn handle(&self, query: GetSimilarPropertiesQuery) -> Result<Vec<Property>, DomainError> {
        let Some(base) = self.properties.find_by_id(query.property_id).await? else {
            return Ok(Vec::new());
        };

        let candidates = self
            .properties
            .in_city_of_type(&base.city, base.property_type)
            .await?;
        Ok(similar_listings(&base, candidates))
    }
}
