//! DeletePropertyHandler - Command handler for removing a listing.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, PropertyId, UserId};
use crate::ports::PropertyRepository;

use super::{require_property, NOT_OWNER};

#[derive(Debug, Clone)]
pub struct DeletePropertyCommand {
    pub user_id: UserId,
    pub property_id: PropertyId,
}

/// Owner-only delete. Favorites and interactions on the listing go with it.
pub struct DeletePropertyHandler {
    properties: Arc<dyn PropertyRepository>,
}

impl DeletePropertyHandler {
    pub fn new(properties: Arc<dyn PropertyRepository>) -> Self {
        Self { properties }
    }

    pub async fn handle(&self, cmd: DeletePropertyCommand) -> Result<(), DomainError> {
        let property = require_property(self.properties.as_ref(), cmd.property_id).await?;
        if !property.is_owned_by(cmd.user_id) {
            return Err(DomainError::forbidden(NOT_OWNER));
        }

        if !self.properties.delete(property.id).await? {
            return Err(DomainError::not_found("Proprietà non trovata"));
        }
        tracing::info!(property_id = %property.id, user_id = %cmd.user_id, "Listing deleted");
        Ok(())
    }
}
