//! HTTP handlers for engagement endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::engagement::{
    AddFavoriteCommand, AddFavoriteHandler, CreateSavedSearchCommand, CreateSavedSearchHandler,
    DeleteSavedSearchCommand, DeleteSavedSearchHandler, GetRecommendationsHandler,
    GetRecommendationsQuery, GetSimilarPropertiesHandler, GetSimilarPropertiesQuery,
    ListFavoritesHandler, ListFavoritesQuery, ListSavedSearchesHandler, ListSavedSearchesQuery,
    RecordInteractionCommand, RecordInteractionHandler, RemoveFavoriteCommand,
    RemoveFavoriteHandler,
};
use crate::domain::engagement::{NewInteraction, NewSavedSearch};
use crate::domain::foundation::{FavoriteId, PropertyId, SavedSearchId};
use crate::ports::{EngagementRepository, PropertyRepository};

use super::dto::{AddFavoriteRequest, RecommendationParams};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct EngagementAppState {
    pub engagement: Arc<dyn EngagementRepository>,
    pub properties: Arc<dyn PropertyRepository>,
}

impl EngagementAppState {
    pub fn new(
        engagement: Arc<dyn EngagementRepository>,
        properties: Arc<dyn PropertyRepository>,
    ) -> Self {
        Self {
            engagement,
            properties,
        }
    }

    pub fn list_favorites_handler(&self) -> ListFavoritesHandler {
        ListFavoritesHandler::new(self.engagement.clone())
    }

    pub fn add_favorite_handler(&self) -> AddFavoriteHandler {
        AddFavoriteHandler::new(self.engagement.clone(), self.properties.clone())
    }

    pub fn remove_favorite_handler(&self) -> RemoveFavoriteHandler {
        RemoveFavoriteHandler::new(self.engagement.clone())
    }

    pub fn list_searches_handler(&self) -> ListSavedSearchesHandler {
        ListSavedSearchesHandler::new(self.engagement.clone())
    }

    pub fn create_search_handler(&self) -> CreateSavedSearchHandler {
        CreateSavedSearchHandler::new(self.engagement.clone())
    }

    pub fn delete_search_handler(&self) -> DeleteSavedSearchHandler {
        DeleteSavedSearchHandler::new(self.engagement.clone())
    }

    pub fn interaction_handler(&self) -> RecordInteractionHandler {
        RecordInteractionHandler::new(self.engagement.clone(), self.properties.clone())
    }

    pub fn recommendations_handler(&self) -> GetRecommendationsHandler {
        GetRecommendationsHandler::new(self.engagement.clone(), self.properties.clone())
    }

    pub fn similar_handler(&self) -> GetSimilarPropertiesHandler {
        GetSimilarPropertiesHandler::new(self.properties.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Favorites
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/favorites
pub async fn list_favorites(
    State(state): State<EngagementAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let favorites = state
        .list_favorites_handler()
        .handle(ListFavoritesQuery { user_id: user.id })
        .await?;
    Ok(Json(favorites))
}

/// POST /api/favorites
pub async fn add_favorite(
    State(state): State<EngagementAppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<AddFavoriteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let favorite = state
        .add_favorite_handler()
        .handle(AddFavoriteCommand {
            user_id: user.id,
            property_id: req.property_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// DELETE /api/favorites/:id
pub async fn remove_favorite(
    State(state): State<EngagementAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let favorite_id: FavoriteId = id.parse()?;
    state
        .remove_favorite_handler()
        .handle(RemoveFavoriteCommand {
            user_id: user.id,
            favorite_id,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Saved searches
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/saved-searches
pub async fn list_saved_searches(
    State(state): State<EngagementAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let searches = state
        .list_searches_handler()
        .handle(ListSavedSearchesQuery { user_id: user.id })
        .await?;
    Ok(Json(searches))
}

/// POST /api/saved-searches
pub async fn create_saved_search(
    State(state): State<EngagementAppState>,
    RequireAuth(user): RequireAuth,
    Json(search): Json<NewSavedSearch>,
) -> Result<impl IntoResponse, ApiError> {
    let search = state
        .create_search_handler()
        .handle(CreateSavedSearchCommand {
            user_id: user.id,
            search,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(search)))
}

/// DELETE /api/saved-searches/:id
pub async fn delete_saved_search(
    State(state): State<EngagementAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let search_id: SavedSearchId = id.parse()?;
    state
        .delete_search_handler()
        .handle(DeleteSavedSearchCommand {
            user_id: user.id,
            search_id,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Interactions and recommendations
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/interactions and POST /api/user-interactions
pub async fn record_interaction(
    State(state): State<EngagementAppState>,
    RequireAuth(user): RequireAuth,
    Json(interaction): Json<NewInteraction>,
) -> Result<impl IntoResponse, ApiError> {
    let interaction = state
        .interaction_handler()
        .handle(RecordInteractionCommand {
            user_id: user.id,
            interaction,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(interaction)))
}

/// GET /api/recommendations and GET /api/recommended-properties
pub async fn recommendations(
    State(state): State<EngagementAppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<RecommendationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let properties = state
        .recommendations_handler()
        .handle(GetRecommendationsQuery {
            user_id: user.id,
            limit: params.limit,
        })
        .await?;
    Ok(Json(properties))
}

/// GET /api/properties/:id/similar
pub async fn similar_properties(
    State(state): State<EngagementAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let property_id: PropertyId = id.parse()?;
    let properties = state
        .similar_handler()
        .handle(GetSimilarPropertiesQuery { property_id })
        .await?;
    Ok(Json(properties))
}
