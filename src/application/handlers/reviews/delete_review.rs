//! DeleteReviewHandler - Command handler for removing a review.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ReviewId, UserId};
use crate::ports::ReviewRepository;

use super::require_review;

#[derive(Debug, Clone)]
pub struct DeleteReviewCommand {
    pub user_id: UserId,
    pub review_id: ReviewId,
}

/// Author-only delete. Votes and reports on the review go with it.
pub struct DeleteReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl DeleteReviewHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(&self, cmd: DeleteReviewCommand) -> Result<(), DomainError> {
        let review = require_review(self.reviews.as_ref(), cmd.review_id).await?;
        if !review.is_authored_by(cmd.user_id) {
            return Err(DomainError::forbidden(
                "Non autorizzato a eliminare questa recensione",
            ));
        }

        if !self.reviews.delete(review.id).await? {
            return Err(DomainError::not_found("Recensione non trovata"));
        }
        tracing::info!(review_id = %review.id, user_id = %cmd.user_id, "Review deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::{ErrorCode, PropertyId, Timestamp};
    use crate::domain::review::NewReview;

    #[tokio::test]
    async fn only_the_author_can_delete() {
        let store = Arc::new(InMemoryStore::new());
        let review = store
            .create(
                UserId::from_raw(3),
                NewReview {
                    property_id: PropertyId::from_raw(10),
                    rating: 3,
                    comment: None,
                },
                Timestamp::now(),
            )
            .await
            .unwrap();
        let handler = DeleteReviewHandler::new(store.clone());

        let err = handler
            .handle(DeleteReviewCommand {
                user_id: UserId::from_raw(4),
                review_id: review.id,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        handler
            .handle(DeleteReviewCommand {
                user_id: UserId::from_raw(3),
                review_id: review.id,
            })
            .await
            .unwrap();
        assert!(store.find_by_id(review.id).await.unwrap().is_none());
    }
}
