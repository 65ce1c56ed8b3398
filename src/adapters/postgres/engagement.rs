//! PostgreSQL implementation of EngagementRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use crate::domain::engagement::{
    Favorite, FavoriteProperty, Interaction, NewInteraction, NewSavedSearch, SavedSearch,
};
use crate::domain::foundation::{
    DomainError, FavoriteId, InteractionId, PropertyId, SavedSearchId, Timestamp, UserId,
};
use crate::domain::listing::{Property, PropertyType};
use crate::ports::EngagementRepository;

use super::listings::{PropertyRow, PROPERTY_COLUMNS};
use super::{corrupt, db_error, ts, violates};

pub struct PostgresEngagementRepository {
    pool: PgPool,
}

impl PostgresEngagementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FavoriteRow {
    id: i32,
    user_id: i32,
    property_id: i32,
    created_at: DateTime<Utc>,
}

impl From<FavoriteRow> for Favorite {
    fn from(row: FavoriteRow) -> Self {
        Favorite {
            id: FavoriteId::from_raw(row.id),
            user_id: UserId::from_raw(row.user_id),
            property_id: PropertyId::from_raw(row.property_id),
            created_at: ts(row.created_at),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FavoritePropertyRow {
    favorite_id: i32,
    #[sqlx(flatten)]
    property: PropertyRow,
}

#[derive(Debug, sqlx::FromRow)]
struct SavedSearchRow {
    id: i32,
    user_id: i32,
    search_criteria: Value,
    notifications_enabled: bool,
    created_at: DateTime<Utc>,
}

impl From<SavedSearchRow> for SavedSearch {
    fn from(row: SavedSearchRow) -> Self {
        SavedSearch {
            id: SavedSearchId::from_raw(row.id),
            user_id: UserId::from_raw(row.user_id),
            search_criteria: row.search_criteria,
            notifications_enabled: row.notifications_enabled,
            created_at: ts(row.created_at),
        }
    }
}

#[async_trait]
impl EngagementRepository for PostgresEngagementRepository {
    async fn favorites(&self, user_id: UserId) -> Result<Vec<FavoriteProperty>, DomainError> {
        // Listing columns are unqualified; the subquery leaves a single `id`.
        let sql = format!(
            "SELECT favorite_id, {cols} FROM ( \
                 SELECT f.id AS favorite_id, f.created_at AS favorited_at, p.* \
                 FROM favorites f JOIN properties p ON p.id = f.property_id \
                 WHERE f.user_id = $1 \
             ) fav ORDER BY favorited_at DESC, favorite_id DESC",
            cols = PROPERTY_COLUMNS
        );
        let rows: Vec<FavoritePropertyRow> = sqlx::query_as(&sql)
            .bind(user_id.as_i32())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list favorites"))?;

        rows.into_iter()
            .map(|row| {
                Ok(FavoriteProperty {
                    favorite_id: FavoriteId::from_raw(row.favorite_id),
                    property: Property::try_from(row.property)?,
                })
            })
            .collect()
    }

    async fn add_favorite(
        &self,
        user_id: UserId,
        property_id: PropertyId,
        now: Timestamp,
    ) -> Result<Favorite, DomainError> {
        let row: FavoriteRow = sqlx::query_as(
            r#"
            INSERT INTO favorites (user_id, property_id, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, property_id, created_at
            "#,
        )
        .bind(user_id.as_i32())
        .bind(property_id.as_i32())
        .bind(now.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "favorites_user_property_key") {
                return DomainError::conflict("Property already in favorites");
            }
            db_error("add favorite")(e)
        })?;
        Ok(row.into())
    }

    async fn remove_favorite(&self, id: FavoriteId, user_id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM favorites WHERE id = $1 AND user_id = $2")
            .bind(id.as_i32())
            .bind(user_id.as_i32())
            .execute(&self.pool)
            .await
            .map_err(db_error("remove favorite"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn saved_searches(&self, user_id: UserId) -> Result<Vec<SavedSearch>, DomainError> {
        let rows: Vec<SavedSearchRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, search_criteria, notifications_enabled, created_at
            FROM saved_searches WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list saved searches"))?;
        Ok(rows.into_iter().map(SavedSearch::from).collect())
    }

    async fn find_saved_search(&self, id: SavedSearchId) -> Result<Option<SavedSearch>, DomainError> {
        let row: Option<SavedSearchRow> = sqlx::query_as(
            "SELECT id, user_id, search_criteria, notifications_enabled, created_at \
             FROM saved_searches WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find saved search"))?;
        Ok(row.map(SavedSearch::from))
    }

    async fn create_saved_search(
        &self,
        user_id: UserId,
        search: NewSavedSearch,
        now: Timestamp,
    ) -> Result<SavedSearch, DomainError> {
        let row: SavedSearchRow = sqlx::query_as(
            r#"
            INSERT INTO saved_searches (user_id, search_criteria, notifications_enabled, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, search_criteria, notifications_enabled, created_at
            "#,
        )
        .bind(user_id.as_i32())
        .bind(&search.search_criteria)
        .bind(search.notifications_enabled)
        .bind(now.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("save search"))?;
        Ok(row.into())
    }

    async fn delete_saved_search(&self, id: SavedSearchId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM saved_searches WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete saved search"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn record_interaction(
        &self,
        user_id: UserId,
        interaction: NewInteraction,
        now: Timestamp,
    ) -> Result<Interaction, DomainError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO user_interactions (user_id, property_id, interaction_type, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(user_id.as_i32())
        .bind(interaction.property_id.as_i32())
        .bind(interaction.interaction_type.as_str())
        .bind(now.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("record interaction"))?;

        Ok(Interaction {
            id: InteractionId::from_raw(id),
            user_id,
            property_id: interaction.property_id,
            interaction_type: interaction.interaction_type,
            created_at: now,
        })
    }

    async fn interacted_types(&self, user_id: UserId) -> Result<Vec<PropertyType>, DomainError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT p.type
            FROM user_interactions i JOIN properties p ON p.id = i.property_id
            WHERE i.user_id = $1
            ORDER BY i.created_at, i.id
            "#,
        )
        .bind(user_id.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("load interactions"))?;

        rows.into_iter()
            .map(|(t,)| PropertyType::parse(&t).ok_or_else(|| corrupt("type", &t)))
            .collect()
    }
}

