//! VoteReviewHandler - Command handler for helpful / unhelpful votes.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ReviewId, Timestamp, UserId};
use crate::domain::review::Review;
use crate::ports::ReviewRepository;

use super::require_review;

#[derive(Debug, Clone)]
pub struct VoteReviewCommand {
    pub user_id: UserId,
    pub review_id: ReviewId,
    pub is_helpful: bool,
}

/// Casts or switches a vote and returns the review with its new counters.
/// Repeating the same vote leaves the counters as they are.
pub struct VoteReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl VoteReviewHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(&self, cmd: VoteReviewCommand) -> Result<Review, DomainError> {
        // 1. Load and check the voter
        let review = require_review(self.reviews.as_ref(), cmd.review_id).await?;
        if review.is_authored_by(cmd.user_id) {
            return Err(DomainError::validation(
                "reviewId",
                "Non puoi votare le tue recensioni",
            ));
        }

        // 2. Vote and counters move together in storage
        let (review, change) = self
            .reviews
            .cast_vote(review.id, cmd.user_id, cmd.is_helpful, Timestamp::now())
            .await?
            .ok_or_else(|| DomainError::not_found("Recensione non trovata"))?;

        tracing::debug!(review_id = %review.id, change = ?change, "Review vote");
        Ok(review)
    }
}
