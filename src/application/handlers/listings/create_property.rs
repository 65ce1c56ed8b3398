//! CreatePropertyHandler - Command handler for publishing a listing.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::listing::{NewProperty, Property};
use crate::ports::{PropertyRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct CreatePropertyCommand {
    pub user_id: UserId,
    pub property: NewProperty,
}

/// Handler for publishing listings.
///
/// The caller needs publishing rights: an active plan, a prepaid credit or
/// the unused free listing. One credit is consumed after the insert, the
/// free listing first.
pub struct CreatePropertyHandler {
    users: Arc<dyn UserRepository>,
    properties: Arc<dyn PropertyRepository>,
}

impl CreatePropertyHandler {
    pub fn new(users: Arc<dyn UserRepository>, properties: Arc<dyn PropertyRepository>) -> Self {
        Self { users, properties }
    }

    pub async fn handle(&self, cmd: CreatePropertyCommand) -> Result<Property, DomainError> {
        let now = Timestamp::now();

        // 1. Check publishing rights
        let user = self
            .users
            .find_by_id(cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::unauthorized("Utente non trovato"))?;
        if !user.can_publish(now) {
            return Err(DomainError::forbidden(
                "Non hai diritti sufficienti per pubblicare un annuncio",
            ));
        }

        // 2. Validate and insert
        cmd.property.validate()?;
        let property = self.properties.create(user.id, cmd.property, now).await?;

        // 3. Consume one credit
        let credit = self.users.consume_listing_credit(user.id).await?;

        tracing::info!(
            user_id = %user.id,
            property_id = %property.id,
            credit = ?credit,
            "Listing published"
        );

        Ok(property)
    }
}
