//! RecordInteractionHandler - Command handler for tracking listing views,
//! saves and contacts.

use std::sync::Arc;

use crate::application::handlers::listings::require_property;
use crate::domain::engagement::{Interaction, NewInteraction};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::{EngagementRepository, PropertyRepository};

#[derive(Debug, Clone)]
pub struct RecordInteractionCommand {
    pub user_id: UserId,
    pub interaction: NewInteraction,
}

pub struct RecordInteractionHandler {
    engagement: Arc<dyn EngagementRepository>,
    properties: Arc<dyn PropertyRepository>,
}

impl RecordInteractionHandler {
    pub fn new(
        engagement: Arc<dyn EngagementRepository>,
        properties: Arc<dyn PropertyRepository>,
    ) -> Self {
        Self {
            engagement,
            properties,
        }
    }

    pub async fn handle(&self, cmd: RecordInteractionCommand) -> Result<Interaction, DomainError> {
        require_property(self.properties.as_ref(), cmd.interaction.property_id).await?;

        let interaction = self
            .engagement
            .record_interaction(cmd.user_id, cmd.interaction, Timestamp::now())
            .await?;
        tracing::debug!(
            user_id = %interaction.user_id,
            property_id = %interaction.property_id,
            kind = interaction.interaction_type.as_str(),
            "Interaction recorded"
        );
        Ok(interaction)
    }
}
