use async_trait::async_trait;

use crate::domain::foundation::{
    DomainError, PropertyId, ReportId, ReviewId, Timestamp, UserId, VoteId,
};
use crate::domain::review::{
    apply_vote, NewReport, NewReview, ReportStatus, Review, ReviewReport, ReviewVote, VoteChange,
};
use crate::ports::ReviewRepository;

use super::InMemoryStore;

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, DomainError> {
        Ok(self.state.read().await.reviews.get(&id).cloned())
    }

    async fn for_property(&self, property_id: PropertyId) -> Result<Vec<Review>, DomainError> {
        let state = self.state.read().await;
        let mut reviews: Vec<Review> = state
            .reviews
            .values()
            .filter(|r| r.property_id == property_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(reviews)
    }

    async fn find_by_author(
        &self,
        property_id: PropertyId,
        user_id: UserId,
    ) -> Result<Option<Review>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .reviews
            .values()
            .find(|r| r.property_id == property_id && r.user_id == user_id)
            .cloned())
    }

    async fn create(
        &self,
        author: UserId,
        review: NewReview,
        now: Timestamp,
    ) -> Result<Review, DomainError> {
        let mut state = self.state.write().await;
        let id = ReviewId::from_raw(state.next_id());
        let review = review.into_review(id, author, now);
        state.reviews.insert(id, review.clone());
        Ok(review)
    }

    async fn update(&self, review: &Review) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.reviews.get_mut(&review.id) {
            Some(stored) => {
                *stored = review.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("Review not found")),
        }
    }

    async fn delete(&self, id: ReviewId) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        if state.reviews.remove(&id).is_none() {
            return Ok(false);
        }
        state.votes.retain(|v| v.review_id != id);
        state.reports.retain(|_, r| r.review_id != id);
        Ok(true)
    }

    async fn find_report_by(
        &self,
        review_id: ReviewId,
        user_id: UserId,
    ) -> Result<Option<ReviewReport>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .reports
            .values()
            .find(|r| r.review_id == review_id && r.user_id == user_id)
            .cloned())
    }

    async fn create_report(
        &self,
        review_id: ReviewId,
        reporter: UserId,
        report: NewReport,
        now: Timestamp,
    ) -> Result<ReviewReport, DomainError> {
        let mut state = self.state.write().await;
        let id = ReportId::from_raw(state.next_id());
        let report = report.into_report(id, review_id, reporter, now);
        state.reports.insert(id, report.clone());
        Ok(report)
    }

    async fn find_report(&self, id: ReportId) -> Result<Option<ReviewReport>, DomainError> {
        Ok(self.state.read().await.reports.get(&id).cloned())
    }

    async fn list_reports(
        &self,
        status: Option<ReportStatus>,
    ) -> Result<Vec<ReviewReport>, DomainError> {
        let state = self.state.read().await;
        let mut reports: Vec<ReviewReport> = state
            .reports
            .values()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        reports.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(reports)
    }

    async fn update_report(&self, report: &ReviewReport) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.reports.get_mut(&report.id) {
            Some(stored) => {
                *stored = report.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("Report not found")),
        }
    }

    async fn cast_vote(
        &self,
        review_id: ReviewId,
        voter: UserId,
        is_helpful: bool,
        now: Timestamp,
    ) -> Result<Option<(Review, VoteChange)>, DomainError> {
        let mut state = self.state.write().await;
        if !state.reviews.contains_key(&review_id) {
            return Ok(None);
        }

        let existing = state
            .votes
            .iter()
            .position(|v| v.review_id == review_id && v.user_id == voter);
        let previous = existing.map(|i| state.votes[i].is_helpful);

        match existing {
            Some(i) => state.votes[i].is_helpful = is_helpful,
            None => {
                let id = VoteId::from_raw(state.next_id());
                state.votes.push(ReviewVote {
                    id,
                    review_id,
                    user_id: voter,
                    is_helpful,
                    created_at: now,
                });
            }
        }

        let Some(review) = state.reviews.get_mut(&review_id) else {
            return Ok(None);
        };
        let change = apply_vote(review, previous, is_helpful);
        Ok(Some((review.clone(), change)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_review() -> NewReview {
        NewReview {
            property_id: PropertyId::from_raw(3),
            rating: 4,
            comment: Some("Ottimo".into()),
        }
    }

    #[tokio::test]
    async fn votes_and_counters_are_stored_together() {
        let store = InMemoryStore::new();
        let review = store
            .create(UserId::from_raw(1), new_review(), Timestamp::now())
            .await
            .unwrap();
        let voter = UserId::from_raw(2);

        let (_, change) = store.cast_vote(review.id, voter, true, Timestamp::now()).await.unwrap().unwrap();
        assert_eq!(change, VoteChange::Cast);

        let (after, change) = store.cast_vote(review.id, voter, false, Timestamp::now()).await.unwrap().unwrap();
        assert_eq!(change, VoteChange::Switched);
        assert_eq!((after.helpful_count, after.unhelpful_count), (0, 1));

        let (_, change) = store.cast_vote(review.id, voter, false, Timestamp::now()).await.unwrap().unwrap();
        assert_eq!(change, VoteChange::Unchanged);

        let stored = ReviewRepository::find_by_id(&store, review.id).await.unwrap().unwrap();
        assert_eq!((stored.helpful_count, stored.unhelpful_count), (0, 1));
    }

    #[tokio::test]
    async fn concurrent_votes_from_different_users_all_count() {
        let store = InMemoryStore::new();
        let review = store
            .create(UserId::from_raw(1), new_review(), Timestamp::now())
            .await
            .unwrap();

        let (a, b) = tokio::join!(
            store.cast_vote(review.id, UserId::from_raw(5), true, Timestamp::now()),
            store.cast_vote(review.id, UserId::from_raw(6), true, Timestamp::now())
        );
        a.unwrap().unwrap();
        b.unwrap().unwrap();

        let stored = ReviewRepository::find_by_id(&store, review.id).await.unwrap().unwrap();
        assert_eq!(stored.helpful_count, 2);
    }

    #[tokio::test]
    async fn voting_on_a_missing_review_is_none() {
        let store = InMemoryStore::new();
        let missing = store
            .cast_vote(ReviewId::from_raw(99), UserId::from_raw(2), true, Timestamp::now())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn deleting_a_review_drops_its_reports() {
        let store = InMemoryStore::new();
        let review = store
            .create(UserId::from_raw(1), new_review(), Timestamp::now())
            .await
            .unwrap();
        let report = NewReport {
            reason: "spam".into(),
            details: None,
        };
        store
            .create_report(review.id, UserId::from_raw(2), report, Timestamp::now())
            .await
            .unwrap();

        assert!(ReviewRepository::delete(&store, review.id).await.unwrap());
        assert!(store.list_reports(None).await.unwrap().is_empty());
        assert!(!ReviewRepository::delete(&store, review.id).await.unwrap());
    }

    #[tokio::test]
    async fn reports_filter_by_status() {
        let store = InMemoryStore::new();
        let review = store
            .create(UserId::from_raw(1), new_review(), Timestamp::now())
            .await
            .unwrap();
        let mut report = store
            .create_report(
                review.id,
                UserId::from_raw(2),
                NewReport { reason: "spam".into(), details: None },
                Timestamp::now(),
            )
            .await
            .unwrap();
        report.moderate(ReportStatus::Resolved, None, Timestamp::now());
        store.update_report(&report).await.unwrap();

        assert!(store.list_reports(Some(ReportStatus::Pending)).await.unwrap().is_empty());
        assert_eq!(store.list_reports(Some(ReportStatus::Resolved)).await.unwrap().len(), 1);
    }
}
