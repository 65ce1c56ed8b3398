//! PruneWebhookEventsHandler - Command handler for trimming the webhook ledger.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::WebhookEventRepository;

/// Drop ledger entries older than the retention window, measured from `now`.
#[derive(Debug, Clone)]
pub struct PruneWebhookEventsCommand {
    pub now: Timestamp,
    pub retention_days: u32,
}

/// Stripe stops redelivering an event after three days, so entries older than
/// the retention window can no longer guard against a replay.
pub struct PruneWebhookEventsHandler {
    ledger: Arc<dyn WebhookEventRepository>,
}

impl PruneWebhookEventsHandler {
    pub fn new(ledger: Arc<dyn WebhookEventRepository>) -> Self {
        Self { ledger }
    }

    pub async fn handle(&self, cmd: PruneWebhookEventsCommand) -> Result<u64, DomainError> {
        let cutoff = cmd.now.minus_days(i64::from(cmd.retention_days));
        let removed = self.ledger.delete_before(cutoff).await?;
        if removed > 0 {
            tracing::info!(removed, retention_days = cmd.retention_days, "Pruned webhook ledger");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::ports::WebhookEventRecord;
    use serde_json::json;

    #[tokio::test]
    async fn only_entries_past_retention_are_removed() {
        let store = Arc::new(InMemoryStore::new());
        let now = Timestamp::now();

        let mut old = WebhookEventRecord::success("evt_old", "payment_intent.succeeded", json!({}));
        old.processed_at = now.minus_days(40);
        let recent = WebhookEventRecord::success("evt_new", "payment_intent.succeeded", json!({}));
        store.save(old).await.unwrap();
        store.save(recent).await.unwrap();

        let removed = PruneWebhookEventsHandler::new(store.clone())
            .handle(PruneWebhookEventsCommand {
                now,
                retention_days: 30,
            })
            .await
            .unwrap();

        assert_eq!(removed, 1);
        assert!(store.find_by_event_id("evt_old").await.unwrap().is_none());
        assert!(store.find_by_event_id("evt_new").await.unwrap().is_some());
    }
}
