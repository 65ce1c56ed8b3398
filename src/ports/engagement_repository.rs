//! Engagement repository port: favorites, saved searches, interactions.

use async_trait::async_trait;

use crate::domain::engagement::{
    Favorite, FavoriteProperty, Interaction, NewInteraction, NewSavedSearch, SavedSearch,
};
use crate::domain::foundation::{DomainError, FavoriteId, PropertyId, SavedSearchId, Timestamp, UserId};
use crate::domain::listing::PropertyType;

#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Favorites joined with their listings, newest first.
    async fn favorites(&self, user_id: UserId) -> Result<Vec<FavoriteProperty>, DomainError>;

    /// # Errors
    ///
    /// - `Conflict` when the listing is already a favorite
    async fn add_favorite(
        &self,
        user_id: UserId,
        property_id: PropertyId,
        now: Timestamp,
    ) -> Result<Favorite, DomainError>;

    /// Deletes only when owned by `user_id`. Returns false otherwise.
    async fn remove_favorite(&self, id: FavoriteId, user_id: UserId) -> Result<bool, DomainError>;

    async fn saved_searches(&self, user_id: UserId) -> Result<Vec<SavedSearch>, DomainError>;

    async fn find_saved_search(&self, id: SavedSearchId) -> Result<Option<SavedSearch>, DomainError>;

    async fn create_saved_search(
        &self,
        user_id: UserId,
        search: NewSavedSearch,
        now: Timestamp,
    ) -> Result<SavedSearch, DomainError>;

    async fn delete_saved_search(&self, id: SavedSearchId) -> Result<bool, DomainError>;

    async fn record_interaction(
        &self,
        user_id: UserId,
        interaction: NewInteraction,
        now: Timestamp,
    ) -> Result<Interaction, DomainError>;

    /// Types of the listings the user interacted with, one per interaction.
    async fn interacted_types(&self, user_id: UserId) -> Result<Vec<PropertyType>, DomainError>;
}
