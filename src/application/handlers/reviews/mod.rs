//! Review handlers.
//!
//! ## Commands
//! - Creating, updating and deleting a review (author only)
//! - Owner response, reports and helpfulness votes
//!
//! ## Queries
//! - Reviews of a listing, a single review, the caller's own review

mod create_review;
mod delete_review;
mod get_reviews;
mod report_review;
mod respond_to_review;
mod update_review;
mod vote_review;

use crate::domain::foundation::{DomainError, ReviewId};
use crate::domain::review::Review;
use crate::ports::ReviewRepository;

// Commands
pub use create_review::{CreateReviewCommand, CreateReviewHandler};
pub use delete_review::{DeleteReviewCommand, DeleteReviewHandler};
pub use report_review::{ReportReviewCommand, ReportReviewHandler};
pub use respond_to_review::{RespondToReviewCommand, RespondToReviewHandler};
pub use update_review::{UpdateReviewCommand, UpdateReviewHandler};
pub use vote_review::{VoteReviewCommand, VoteReviewHandler};

// Queries
pub use get_reviews::{
    GetReviewHandler, GetReviewQuery, GetUserReviewHandler, GetUserReviewQuery,
    ListPropertyReviewsHandler, ListPropertyReviewsQuery,
};

pub(crate) async fn require_review(
    reviews: &dyn ReviewRepository,
    id: ReviewId,
) -> Result<Review, DomainError> {
    reviews
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Recensione non trovata"))
}
