//! RespondToReviewHandler - Command handler for the listing owner's reply.

use std::sync::Arc;

use crate::application::handlers::listings::require_property;
use crate::domain::foundation::{DomainError, ReviewId, UserId};
use crate::domain::review::{validate_owner_response, Review};
use crate::ports::{PropertyRepository, ReviewRepository};

use super::require_review;

#[derive(Debug, Clone)]
pub struct RespondToReviewCommand {
    pub user_id: UserId,
    pub review_id: ReviewId,
    pub response: String,
}

/// Sets the owner response. A later response replaces the earlier one.
pub struct RespondToReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
    properties: Arc<dyn PropertyRepository>,
}

impl RespondToReviewHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>, properties: Arc<dyn PropertyRepository>) -> Self {
        Self {
            reviews,
            properties,
        }
    }

    pub async fn handle(&self, cmd: RespondToReviewCommand) -> Result<Review, DomainError> {
        let response = validate_owner_response(&cmd.response)?;

        let mut review = require_review(self.reviews.as_ref(), cmd.review_id).await?;
        let property = require_property(self.properties.as_ref(), review.property_id).await?;
        if !property.is_owned_by(cmd.user_id) {
            return Err(DomainError::forbidden(
                "Solo il proprietario può rispondere alle recensioni",
            ));
        }

        review.owner_response = Some(response);
        self.reviews.update(&review).await?;
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::{ErrorCode, Timestamp};
    use crate::domain::listing::property::sample_new_property;
    use crate::domain::review::NewReview;

    async fn seeded() -> (Arc<InMemoryStore>, Review) {
        let store = Arc::new(InMemoryStore::new());
        let now = Timestamp::now();
        let property =
            PropertyRepository::create(store.as_ref(), UserId::from_raw(1), sample_new_property(), now)
                .await
                .unwrap();
        let review = ReviewRepository::create(
            store.as_ref(),
            UserId::from_raw(2),
            NewReview {
                property_id: property.id,
                rating: 3,
                comment: Some("Rumorosa".to_string()),
            },
            now,
        )
        .await
        .unwrap();
        (store, review)
    }

    fn respond(user: i32, review: &Review, text: &str) -> RespondToReviewCommand {
        RespondToReviewCommand {
            user_id: UserId::from_raw(user),
            review_id: review.id,
            response: text.to_string(),
        }
    }

    #[tokio::test]
    async fn owner_response_is_trimmed_and_stored() {
        let (store, review) = seeded().await;
        let updated = RespondToReviewHandler::new(store.clone(), store.clone())
            .handle(respond(1, &review, "  Abbiamo cambiato le finestre. "))
            .await
            .unwrap();
        assert_eq!(
            updated.owner_response.as_deref(),
            Some("Abbiamo cambiato le finestre.")
        );
    }

    #[tokio::test]
    async fn only_the_listing_owner_may_respond() {
        let (store, review) = seeded().await;
        let err = RespondToReviewHandler::new(store.clone(), store)
            .handle(respond(2, &review, "Grazie"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn overlong_response_is_rejected() {
        let (store, review) = seeded().await;
        let err = RespondToReviewHandler::new(store.clone(), store)
            .handle(respond(1, &review, &"a".repeat(501)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
