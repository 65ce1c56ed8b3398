//! Review domain module.
//!
//! Ratings on listings, the owner's reply, moderation reports and
//! helpfulness votes.

mod report;
pub(crate) mod record;
mod vote;

pub use report::{NewReport, ReportStatus, ReviewReport};
pub use record::{
    validate_owner_response, NewReview, Review, ReviewUpdate, MAX_RATING, MAX_RESPONSE_LEN,
    MIN_RATING,
};
pub use vote::{apply_vote, ReviewVote, VoteChange};
