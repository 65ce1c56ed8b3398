//! Axum router configuration for review endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_review, delete_review, get_review, get_user_review, list_property_reviews,
    report_review, respond_to_review, update_review, vote_review, ReviewsAppState,
};

/// Create the reviews API router.
///
/// Listing reviews and fetching a single review are public; everything else
/// requires authentication.
pub fn reviews_router() -> Router<ReviewsAppState> {
    Router::new()
        .route("/api/properties/:id/reviews", get(list_property_reviews))
        .route("/api/properties/:id/user-review", get(get_user_review))
        .route("/api/reviews", post(create_review))
        .route(
            "/api/reviews/:id",
            get(get_review).put(update_review).delete(delete_review),
        )
        .route("/api/reviews/:id/respond", post(respond_to_review))
        .route("/api/reviews/:id/report", post(report_review))
        .route("/api/reviews/:id/vote", post(vote_review))
}
