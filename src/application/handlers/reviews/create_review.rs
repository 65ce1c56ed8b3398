//! CreateReviewHandler - Command handler for reviewing a listing.

use std::sync::Arc;

use crate::application::handlers::listings::require_property;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::review::{NewReview, Review};
use crate::ports::{PropertyRepository, ReviewRepository};

#[derive(Debug, Clone)]
pub struct CreateReviewCommand {
    pub author_id: UserId,
    pub review: NewReview,
}

pub struct CreateReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
    properties: Arc<dyn PropertyRepository>,
}

impl CreateReviewHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>, properties: Arc<dyn PropertyRepository>) -> Self {
        Self {
            reviews,
            properties,
        }
    }

    pub async fn handle(&self, cmd: CreateReviewCommand) -> Result<Review, DomainError> {
        cmd.review.validate()?;
        require_property(self.properties.as_ref(), cmd.review.property_id).await?;

        let review = self
            .reviews
            .create(cmd.author_id, cmd.review, Timestamp::now())
            .await?;

        tracing::info!(
            review_id = %review.id,
            property_id = %review.property_id,
            rating = review.rating,
            "Review created"
        );
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::{ErrorCode, PropertyId};
    use crate::domain::listing::property::sample_new_property;

    #[tokio::test]
    async fn review_starts_without_votes_or_response() {
        let store = Arc::new(InMemoryStore::new());
        let property = PropertyRepository::create(
            store.as_ref(),
            UserId::from_raw(1),
            sample_new_property(),
            Timestamp::now(),
        )
        .await
        .unwrap();

        let review = CreateReviewHandler::new(store.clone(), store.clone())
            .handle(CreateReviewCommand {
                author_id: UserId::from_raw(2),
                review: NewReview {
                    property_id: property.id,
                    rating: 4,
                    comment: None,
                },
            })
            .await
            .unwrap();

        assert_eq!(review.helpful_count, 0);
        assert_eq!(review.unhelpful_count, 0);
        assert!(review.owner_response.is_none());
    }

    #[tokio::test]
    async fn rating_out_of_range_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let err = CreateReviewHandler::new(store.clone(), store)
            .handle(CreateReviewCommand {
                author_id: UserId::from_raw(2),
                review: NewReview {
                    property_id: PropertyId::from_raw(1),
                    rating: 6,
                    comment: None,
                },
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
