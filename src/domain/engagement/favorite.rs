//! Favorited listings and saved searches.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{FavoriteId, PropertyId, SavedSearchId, Timestamp, UserId, ValidationError};
use crate::domain::listing::Property;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub property_id: PropertyId,
    pub created_at: Timestamp,
}

/// A favorite joined with its listing, as the client renders it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteProperty {
    pub favorite_id: FavoriteId,
    #[serde(flatten)]
    pub property: Property,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearch {
    pub id: SavedSearchId,
    pub user_id: UserId,
    pub search_criteria: Value,
    pub notifications_enabled: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavedSearch {
    pub search_criteria: Value,
    #[serde(default = "default_notifications")]
    pub notifications_enabled: bool,
}

fn default_notifications() -> bool {
    true
}

impl NewSavedSearch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.search_criteria.is_object() {
            return Err(ValidationError::invalid_format(
                "searchCriteria",
                "must be a JSON object",
            ));
        }
        Ok(())
    }

    pub fn into_saved_search(self, id: SavedSearchId, owner: UserId, now: Timestamp) -> SavedSearch {
        SavedSearch {
            id,
            user_id: owner,
            search_criteria: self.search_criteria,
            notifications_enabled: self.notifications_enabled,
            created_at: now,
        }
    }
}
