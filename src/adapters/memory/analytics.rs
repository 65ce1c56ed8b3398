use async_trait::async_trait;

use crate::domain::admin::{AdminStats, Kpis};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::ml::UserActivity;
use crate::domain::review::Review;
use crate::ports::{
    AnalyticsReader, SaveResult, WebhookEventRecord, WebhookEventRepository, WebhookOutcome,
};

use super::InMemoryStore;

#[async_trait]
impl AnalyticsReader for InMemoryStore {
    async fn admin_stats(&self) -> Result<AdminStats, DomainError> {
        let state = self.state.read().await;
        let users: Vec<_> = state.users.values().cloned().collect();
        let properties: Vec<_> = state.properties.values().cloned().collect();
        let reviews: Vec<Review> = state.reviews.values().cloned().collect();
        Ok(AdminStats::compute(&users, &properties, &reviews))
    }

    async fn kpis(&self, now: Timestamp) -> Result<Kpis, DomainError> {
        let state = self.state.read().await;
        Ok(Kpis::compute(
            state.users.values().map(|u| u.created_at),
            state.properties.values().map(|p| p.created_at),
            now,
        ))
    }

    async fn user_activity(&self, user_id: UserId) -> Result<UserActivity, DomainError> {
        let state = self.state.read().await;
        let prices: Vec<i64> = state
            .properties
            .values()
            .filter(|p| p.user_id == user_id)
            .map(|p| p.price as i64)
            .collect();
        let avg_listing_price = if prices.is_empty() {
            0.0
        } else {
            prices.iter().sum::<i64>() as f64 / prices.len() as f64
        };

        Ok(UserActivity {
            listings: prices.len() as i64,
            avg_listing_price,
            messages_sent: state.messages.iter().filter(|m| m.sender_id == user_id).count() as i64,
            reviews_written: state.reviews.values().filter(|r| r.user_id == user_id).count() as i64,
        })
    }
}

#[async_trait]
impl WebhookEventRepository for InMemoryStore {
    async fn find_by_event_id(
        &self,
        event_id: &str,
    ) -> Result<Option<WebhookEventRecord>, DomainError> {
        Ok(self.state.read().await.webhook_events.get(event_id).cloned())
    }

    async fn save(&self, record: WebhookEventRecord) -> Result<SaveResult, DomainError> {
        let mut state = self.state.write().await;
        if state.webhook_events.contains_key(&record.event_id) {
            return Ok(SaveResult::AlreadyExists);
        }
        state.webhook_events.insert(record.event_id.clone(), record);
        Ok(SaveResult::Inserted)
    }

    async fn complete(
        &self,
        event_id: &str,
        outcome: WebhookOutcome,
        error_message: Option<String>,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if let Some(record) = state.webhook_events.get_mut(event_id) {
            record.outcome = outcome;
            record.error_message = error_message;
            record.processed_at = Timestamp::now();
        }
        Ok(())
    }

    async fn release(&self, event_id: &str) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let claimed = state
            .webhook_events
            .get(event_id)
            .is_some_and(|record| record.outcome == WebhookOutcome::Processing);
        if claimed {
            state.webhook_events.remove(event_id);
        }
        Ok(())
    }

    async fn delete_before(&self, cutoff: Timestamp) -> Result<u64, DomainError> {
        let mut state = self.state.write().await;
        let before = state.webhook_events.len();
        state
            .webhook_events
            .retain(|_, record| !record.processed_at.is_before(&cutoff));
        Ok((before - state.webhook_events.len()) as u64)
    }
}
