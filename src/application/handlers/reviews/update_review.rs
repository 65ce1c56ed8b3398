//! UpdateReviewHandler - Command handler for editing a review.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ReviewId, UserId};
use crate::domain::review::{Review, ReviewUpdate};
use crate::ports::ReviewRepository;

use super::require_review;

#[derive(Debug, Clone)]
pub struct UpdateReviewCommand {
    pub user_id: UserId,
    pub review_id: ReviewId,
    pub update: ReviewUpdate,
}

pub struct UpdateReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl UpdateReviewHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(&self, cmd: UpdateReviewCommand) -> Result<Review, DomainError> {
        let mut review = require_review(self.reviews.as_ref(), cmd.review_id).await?;
        if !review.is_authored_by(cmd.user_id) {
            return Err(DomainError::forbidden(
                "Non autorizzato a modificare questa recensione",
            ));
        }

        cmd.update.validate()?;
        cmd.update.apply(&mut review);
        self.reviews.update(&review).await?;
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::{ErrorCode, PropertyId, Timestamp};
    use crate::domain::review::NewReview;

    async fn seeded() -> (Arc<InMemoryStore>, Review) {
        let store = Arc::new(InMemoryStore::new());
        let review = store
            .create(
                UserId::from_raw(3),
                NewReview {
                    property_id: PropertyId::from_raw(10),
                    rating: 2,
                    comment: None,
                },
                Timestamp::now(),
            )
            .await
            .unwrap();
        (store, review)
    }

    #[tokio::test]
    async fn author_updates_rating_and_comment() {
        let (store, review) = seeded().await;
        let updated = UpdateReviewHandler::new(store.clone())
            .handle(UpdateReviewCommand {
                user_id: UserId::from_raw(3),
                review_id: review.id,
                update: ReviewUpdate {
                    rating: Some(4),
                    comment: Some("Il proprietario ha risolto".to_string()),
                },
            })
            .await
            .unwrap();

        assert_eq!(updated.rating, 4);
        let stored = store.find_by_id(review.id).await.unwrap().unwrap();
        assert_eq!(stored.comment.as_deref(), Some("Il proprietario ha risolto"));
    }

    #[tokio::test]
    async fn other_users_cannot_edit() {
        let (store, review) = seeded().await;
        let err = UpdateReviewHandler::new(store)
            .handle(UpdateReviewCommand {
                user_id: UserId::from_raw(4),
                review_id: review.id,
                update: ReviewUpdate::default(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn invalid_rating_is_rejected() {
        let (store, review) = seeded().await;
        let err = UpdateReviewHandler::new(store)
            .handle(UpdateReviewCommand {
                user_id: UserId::from_raw(3),
                review_id: review.id,
                update: ReviewUpdate {
                    rating: Some(0),
                    comment: None,
                },
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
