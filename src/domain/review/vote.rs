//! Helpful / unhelpful votes on reviews.

use serde::Serialize;

use crate::domain::foundation::{ReviewId, Timestamp, UserId, VoteId};

use super::Review;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewVote {
    pub id: VoteId,
    pub review_id: ReviewId,
    pub user_id: UserId,
    pub is_helpful: bool,
    pub created_at: Timestamp,
}

/// What casting a vote does to the stored vote and the review counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChange {
    /// First vote from this user.
    Cast,
    /// The user flipped their vote.
    Switched,
    /// Same vote as before.
    Unchanged,
}

impl VoteChange {
    pub fn between(previous: Option<bool>, is_helpful: bool) -> Self {
        match previous {
            None => VoteChange::Cast,
            Some(prev) if prev == is_helpful => VoteChange::Unchanged,
            Some(_) => VoteChange::Switched,
        }
    }
}

impl VoteChange {
    /// Counter deltas `(helpful, unhelpful)` for this change.
    pub fn deltas(self, is_helpful: bool) -> (i32, i32) {
        match (self, is_helpful) {
            (VoteChange::Unchanged, _) => (0, 0),
            (VoteChange::Cast, true) => (1, 0),
            (VoteChange::Cast, false) => (0, 1),
            (VoteChange::Switched, true) => (1, -1),
            (VoteChange::Switched, false) => (-1, 1),
        }
    }
}

/// Adjusts the review counters for a vote.
pub fn apply_vote(review: &mut Review, previous: Option<bool>, is_helpful: bool) -> VoteChange {
    let change = VoteChange::between(previous, is_helpful);
    let (helpful, unhelpful) = change.deltas(is_helpful);
    review.helpful_count = (review.helpful_count + helpful).max(0);
    review.unhelpful_count = (review.unhelpful_count + unhelpful).max(0);
    change
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::review::record::sample_review;

    #[test]
    fn first_vote_increments_matching_counter() {
        let mut review = sample_review(1, 1, 1);
        assert_eq!(apply_vote(&mut review, None, true), VoteChange::Cast);
        assert_eq!((review.helpful_count, review.unhelpful_count), (1, 0));
    }

    #[test]
    fn switching_moves_one_count() {
        let mut review = sample_review(1, 1, 1);
        apply_vote(&mut review, None, true);
        assert_eq!(apply_vote(&mut review, Some(true), false), VoteChange::Switched);
        assert_eq!((review.helpful_count, review.unhelpful_count), (0, 1));
    }

    #[test]
    fn deltas_move_one_count_at_most() {
        assert_eq!(VoteChange::Cast.deltas(false), (0, 1));
        assert_eq!(VoteChange::Switched.deltas(true), (1, -1));
        assert_eq!(VoteChange::Unchanged.deltas(true), (0, 0));
    }

    #[test]
    fn repeating_a_vote_changes_nothing() {
        let mut review = sample_review(1, 1, 1);
        apply_vote(&mut review, None, false);
        assert_eq!(apply_vote(&mut review, Some(false), false), VoteChange::Unchanged);
        assert_eq!((review.helpful_count, review.unhelpful_count), (0, 1));
    }
}
