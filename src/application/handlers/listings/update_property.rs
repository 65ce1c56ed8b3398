//! UpdatePropertyHandler - Command handler for editing a listing.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, PropertyId, UserId};
use crate::domain::listing::{Property, PropertyUpdate};
use crate::ports::PropertyRepository;

use super::{require_property, NOT_OWNER};

#[derive(Debug, Clone)]
pub struct UpdatePropertyCommand {
    pub user_id: UserId,
    pub property_id: PropertyId,
    pub update: PropertyUpdate,
}

/// Owner-only partial update of a listing.
pub struct UpdatePropertyHandler {
    properties: Arc<dyn PropertyRepository>,
}

impl UpdatePropertyHandler {
    pub fn new(properties: Arc<dyn PropertyRepository>) -> Self {
        Self { properties }
    }

    pub async fn handle(&self, cmd: UpdatePropertyCommand) -> Result<Property, DomainError> {
        // 1. Load and check ownership
        let mut property = require_property(self.properties.as_ref(), cmd.property_id).await?;
        if !property.is_owned_by(cmd.user_id) {
            return Err(DomainError::forbidden(NOT_OWNER));
        }

        // 2. Validate and apply
        cmd.update.validate()?;
        cmd.update.apply(&mut property);

        // 3. Persist
        self.properties.update(&property).await?;
        Ok(property)
    }
}
