//! Review queries: by listing, by id, and the caller's own.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, PropertyId, ReviewId, UserId};
use crate::domain::review::Review;
use crate::ports::ReviewRepository;

use super::require_review;

#[derive(Debug, Clone)]
pub struct ListPropertyReviewsQuery {
    pub property_id: PropertyId,
}

pub struct ListPropertyReviewsHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl ListPropertyReviewsHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(&self, query: ListPropertyReviewsQuery) -> Result<Vec<Review>, DomainError> {
        self.reviews.for_property(query.property_id).await
    }
}

#[derive(Debug, Clone)]
pub struct GetReviewQuery {
    pub review_id: ReviewId,
}

pub struct GetReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl GetReviewHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(&self, query: GetReviewQuery) -> Result<Review, DomainError> {
        require_review(self.reviews.as_ref(), query.review_id).await
    }
}

#[derive(Debug, Clone)]
pub struct GetUserReviewQuery {
    pub user_id: UserId,
    pub property_id: PropertyId,
}

/// The caller's review of a listing; 404 when they have not written one.
pub struct GetUserReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
}

impl GetUserReviewHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn handle(&self, query: GetUserReviewQuery) -> Result<Review, DomainError> {
        self.reviews
            .find_by_author(query.property_id, query.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Recensione non trovata"))
    }
}
