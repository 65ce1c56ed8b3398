use async_trait::async_trait;

use crate::domain::engagement::{
    Favorite, FavoriteProperty, Interaction, NewInteraction, NewSavedSearch, SavedSearch,
};
use crate::domain::foundation::{
    DomainError, FavoriteId, InteractionId, PropertyId, SavedSearchId, Timestamp, UserId,
};
use crate::domain::listing::PropertyType;
use crate::ports::EngagementRepository;

use super::InMemoryStore;

#[async_trait]
impl EngagementRepository for InMemoryStore {
    async fn favorites(&self, user_id: UserId) -> Result<Vec<FavoriteProperty>, DomainError> {
        let state = self.state.read().await;
        let mut favorites: Vec<&Favorite> =
            state.favorites.iter().filter(|f| f.user_id == user_id).collect();
        favorites.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        Ok(favorites
            .into_iter()
            .filter_map(|f| {
                state.properties.get(&f.property_id).map(|p| FavoriteProperty {
                    favorite_id: f.id,
                    property: p.clone(),
                })
            })
            .collect())
    }

    async fn add_favorite(
        &self,
        user_id: UserId,
        property_id: PropertyId,
        now: Timestamp,
    ) -> Result<Favorite, DomainError> {
        let mut state = self.state.write().await;
        if state
            .favorites
            .iter()
            .any(|f| f.user_id == user_id && f.property_id == property_id)
        {
            return Err(DomainError::conflict("Property already in favorites"));
        }
        let favorite = Favorite {
            id: FavoriteId::from_raw(state.next_id()),
            user_id,
            property_id,
            created_at: now,
        };
        state.favorites.push(favorite.clone());
        Ok(favorite)
    }

    async fn remove_favorite(&self, id: FavoriteId, user_id: UserId) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        let before = state.favorites.len();
        state.favorites.retain(|f| !(f.id == id && f.user_id == user_id));
        Ok(state.favorites.len() < before)
    }

    async fn saved_searches(&self, user_id: UserId) -> Result<Vec<SavedSearch>, DomainError> {
        let state = self.state.read().await;
        let mut searches: Vec<SavedSearch> = state
            .saved_searches
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        searches.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(searches)
    }

    async fn find_saved_search(&self, id: SavedSearchId) -> Result<Option<SavedSearch>, DomainError> {
        Ok(self.state.read().await.saved_searches.get(&id).cloned())
    }

    async fn create_saved_search(
        &self,
        user_id: UserId,
        search: NewSavedSearch,
        now: Timestamp,
    ) -> Result<SavedSearch, DomainError> {
        let mut state = self.state.write().await;
        let id = SavedSearchId::from_raw(state.next_id());
        let search = search.into_saved_search(id, user_id, now);
        state.saved_searches.insert(id, search.clone());
        Ok(search)
    }

    async fn delete_saved_search(&self, id: SavedSearchId) -> Result<bool, DomainError> {
        Ok(self.state.write().await.saved_searches.remove(&id).is_some())
    }

    async fn record_interaction(
        &self,
        user_id: UserId,
        interaction: NewInteraction,
        now: Timestamp,
    ) -> Result<Interaction, DomainError> {
        let mut state = self.state.write().await;
        let interaction = Interaction {
            id: InteractionId::from_raw(state.next_id()),
            user_id,
            property_id: interaction.property_id,
            interaction_type: interaction.interaction_type,
            created_at: now,
        };
        state.interactions.push(interaction.clone());
        Ok(interaction)
    }

    async fn interacted_types(&self, user_id: UserId) -> Result<Vec<PropertyType>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .interactions
            .iter()
            .filter(|i| i.user_id == user_id)
            .filter_map(|i| state.properties.get(&i.property_id).map(|p| p.property_type))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engagement::InteractionType;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::listing::property::sample_new_property;
    use crate::ports::PropertyRepository;

    #[tokio::test]
    async fn favorites_join_listings_and_reject_duplicates() {
        let store = InMemoryStore::new();
        let owner = UserId::from_raw(1);
        let fan = UserId::from_raw(2);
        let property = store.create(owner, sample_new_property(), Timestamp::now()).await.unwrap();

        let favorite = store.add_favorite(fan, property.id, Timestamp::now()).await.unwrap();
        let dup = store.add_favorite(fan, property.id, Timestamp::now()).await.unwrap_err();
        assert_eq!(dup.code, ErrorCode::Conflict);

        let listed = store.favorites(fan).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].property.id, property.id);

        assert!(!store.remove_favorite(favorite.id, owner).await.unwrap());
        assert!(store.remove_favorite(favorite.id, fan).await.unwrap());
    }

    #[tokio::test]
    async fn interacted_types_follow_the_listings() {
        let store = InMemoryStore::new();
        let user = UserId::from_raw(5);
        let property = store
            .create(UserId::from_raw(1), sample_new_property(), Timestamp::now())
            .await
            .unwrap();
        for kind in [InteractionType::View, InteractionType::Contact] {
            store
                .record_interaction(
                    user,
                    NewInteraction {
                        property_id: property.id,
                        interaction_type: kind,
                    },
                    Timestamp::now(),
                )
                .await
                .unwrap();
        }

        assert_eq!(
            store.interacted_types(user).await.unwrap(),
            vec![PropertyType::StanzaSingola, PropertyType::StanzaSingola]
        );
    }
}
