//! CalculatePriceStatsHandler - Command handler for rebuilding price statistics.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, Timestamp};
use crate::domain::pricing::compute_price_stats;
use crate::ports::{PriceStatsRepository, PropertyRepository};

#[derive(Debug, Clone)]
pub struct CalculatePriceStatsCommand {
    pub requested_by: AuthenticatedUser,
}

/// Replaces every price statistic with a fresh computation over the active,
/// priced listings. Returns the number of rows written.
pub struct CalculatePriceStatsHandler {
    properties: Arc<dyn PropertyRepository>,
    stats: Arc<dyn PriceStatsRepository>,
}

impl CalculatePriceStatsHandler {
    pub fn new(
        properties: Arc<dyn PropertyRepository>,
        stats: Arc<dyn PriceStatsRepository>,
    ) -> Self {
        Self { properties, stats }
    }

    pub async fn handle(&self, cmd: CalculatePriceStatsCommand) -> Result<usize, DomainError> {
        cmd.requested_by.require_admin()?;

        let listings = self.properties.priced_active().await?;
        let stats = compute_price_stats(&listings, Timestamp::now());
        let count = self.stats.replace_all(stats).await?;

        tracing::info!(
            listings = listings.len(),
            rows = count,
            admin_id = %cmd.requested_by.id,
            "Price statistics recomputed"
        );
        Ok(count)
    }
}
