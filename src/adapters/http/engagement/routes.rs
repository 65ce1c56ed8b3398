//! Axum router configuration for engagement endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    add_favorite, create_saved_search, delete_saved_search, list_favorites,
    list_saved_searches, recommendations, record_interaction, remove_favorite,
    similar_properties, EngagementAppState,
};

/// Create the engagement API router.
///
/// Similar listings are public; every other route requires authentication.
pub fn engagement_router() -> Router<EngagementAppState> {
    Router::new()
        .route("/api/favorites", get(list_favorites).post(add_favorite))
        .route("/api/favorites/:id", delete(remove_favorite))
        .route(
            "/api/saved-searches",
            get(list_saved_searches).post(create_saved_search),
        )
        .route("/api/saved-searches/:id", delete(delete_saved_search))
        .route("/api/interactions", post(record_interaction))
        .route("/api/user-interactions", post(record_interaction))
        .route("/api/recommendations", get(recommendations))
        .route("/api/recommended-properties", get(recommendations))
        .route("/api/properties/:id/similar", get(similar_properties))
}
