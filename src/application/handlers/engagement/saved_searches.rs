//! Saved search handlers: list, create, delete.

use std::sync::Arc;

use crate::domain::engagement::{NewSavedSearch, SavedSearch};
use crate::domain::foundation::{DomainError, SavedSearchId, Timestamp, UserId};
use crate::ports::EngagementRepository;

#[derive(Debug, Clone)]
pub struct ListSavedSearchesQuery {
    pub user_id: UserId,
}

pub struct ListSavedSearchesHandler {
    engagement: Arc<dyn EngagementRepository>,
}

impl ListSavedSearchesHandler {
    pub fn new(engagement: Arc<dyn EngagementRepository>) -> Self {
        Self { engagement }
    }

    pub async fn handle(&self, query: ListSavedSearchesQuery) -> Result<Vec<SavedSearch>, DomainError> {
        self.engagement.saved_searches(query.user_id).await
    }
}

#[derive(Debug, Clone)]
pub struct CreateSavedSearchCommand {
    pub user_id: UserId,
    pub search: NewSavedSearch,
}

pub struct CreateSavedSearchHandler {
    engagement: Arc<dyn EngagementRepository>,
}

impl CreateSavedSearchHandler {
    pub fn new(engagement: Arc<dyn EngagementRepository>) -> Self {
        Self { engagement }
    }

    pub async fn handle(&self, cmd: CreateSavedSearchCommand) -> Result<SavedSearch, DomainError> {
        cmd.search.validate()?;
        self.engagement
            .create_saved_search(cmd.user_id, cmd.search, Timestamp::now())
            .await
    }
}

#[derive(Debug, Clone)]
pub struct DeleteSavedSearchCommand {
    pub user_id: UserId,
    pub search_id: SavedSearchId,
}

pub struct DeleteSavedSearchHandler {
    engagement: Arc<dyn EngagementRepository>,
}

impl DeleteSavedSearchHandler {
    pub fn new(engagement: Arc<dyn EngagementRepository>) -> Self {
        Self { engagement }
    }

    pub async fn handle(&self, cmd: DeleteSavedSearchCommand) -> Result<(), DomainError> {
        let search = self
            .engagement
            .find_saved_search(cmd.search_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Ricerca salvata non trovata"))?;
        if search.user_id != cmd.user_id {
            return Err(DomainError::forbidden(
                "Accesso negato. Non sei il proprietario di questa risorsa.",
            ));
        }

        if !self.engagement.delete_saved_search(search.id).await? {
            return Err(DomainError::not_found("Ricerca salvata non trovata"));
        }
        Ok(())
    }
}
