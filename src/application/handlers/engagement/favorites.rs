//! Favorite handlers: list, add, remove.

use std::sync::Arc;

use crate::application::handlers::listings::require_property;
use crate::domain::engagement::{Favorite, FavoriteProperty};
use crate::domain::foundation::{DomainError, ErrorCode, FavoriteId, PropertyId, Timestamp, UserId};
use crate::ports::{EngagementRepository, PropertyRepository};

#[derive(Debug, Clone)]
pub struct ListFavoritesQuery {
    pub user_id: UserId,
}

pub struct ListFavoritesHandler {
    engagement: Arc<dyn EngagementRepository>,
}

impl ListFavoritesHandler {
    pub fn new(engagement: Arc<dyn EngagementRepository>) -> Self {
        Self { engagement }
    }

    pub async fn handle(&self, query: ListFavoritesQuery) -> Result<Vec<FavoriteProperty>, DomainError> {
        self.engagement.favorites(query.user_id).await
    }
}

#[derive(Debug, Clone)]
pub struct AddFavoriteCommand {
    pub user_id: UserId,
    pub property_id: PropertyId,
}

pub struct AddFavoriteHandler {
    engagement: Arc<dyn EngagementRepository>,
    properties: Arc<dyn PropertyRepository>,
}

impl AddFavoriteHandler {
    pub fn new(
        engagement: Arc<dyn EngagementRepository>,
        properties: Arc<dyn PropertyRepository>,
    ) -> Self {
        Self {
            engagement,
            properties,
        }
    }

    pub async fn handle(&self, cmd: AddFavoriteCommand) -> Result<Favorite, DomainError> {
        require_property(self.properties.as_ref(), cmd.property_id).await?;

        self.engagement
            .add_favorite(cmd.user_id, cmd.property_id, Timestamp::now())
            .await
            .map_err(|err| match err.code {
                ErrorCode::Conflict => {
                    DomainError::conflict("Questa proprietà è già nei tuoi preferiti")
                }
                _ => err,
            })
    }
}

#[derive(Debug, Clone)]
pub struct RemoveFavoriteCommand {
    pub user_id: UserId,
    pub favorite_id: FavoriteId,
}

/// Removes a favorite owned by the caller. Someone else's favorite looks
/// the same as a missing one.
pub struct RemoveFavoriteHandler {
    engagement: Arc<dyn EngagementRepository>,
}

impl RemoveFavoriteHandler {
    pub fn new(engagement: Arc<dyn EngagementRepository>) -> Self {
        Self { engagement }
    }

    pub async fn handle(&self, cmd: RemoveFavoriteCommand) -> Result<(), DomainError> {
        if !self
            .engagement
            .remove_favorite(cmd.favorite_id, cmd.user_id)
            .await?
        {
            return Err(DomainError::not_found(
                "Preferito non trovato o non autorizzato",
            ));
        }
        Ok(())
    }
}
