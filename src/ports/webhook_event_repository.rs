//! Idempotency ledger for payment provider webhooks.
//!
//! Stripe redelivers an event when our response times out or is a 5xx, so
//! every event id is claimed once before it is applied and later deliveries
//! are acknowledged without being applied again.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp};

/// How a webhook delivery ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Claimed by a delivery that has not finished applying it.
    Processing,
    Success,
    Ignored,
    Failed,
}

impl WebhookOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookOutcome::Processing => "processing",
            WebhookOutcome::Success => "success",
            WebhookOutcome::Ignored => "ignored",
            WebhookOutcome::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "processing" => WebhookOutcome::Processing,
            "success" => WebhookOutcome::Success,
            "ignored" => WebhookOutcome::Ignored,
            _ => WebhookOutcome::Failed,
        }
    }
}

/// One processed event.
#[derive(Debug, Clone)]
pub struct WebhookEventRecord {
    /// Provider event id (`evt_...`).
    pub event_id: String,
    pub event_type: String,
    pub processed_at: Timestamp,
    pub outcome: WebhookOutcome,
    /// Failure or ignore reason.
    pub error_message: Option<String>,
    pub payload: serde_json::Value,
}

impl WebhookEventRecord {
    fn new(
        event_id: impl Into<String>,
        event_type: impl Into<String>,
        outcome: WebhookOutcome,
        error_message: Option<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            event_type: event_type.into(),
            processed_at: Timestamp::now(),
            outcome,
            error_message,
            payload,
        }
    }

    /// Placeholder written before the event is applied.
    pub fn processing(
        event_id: impl Into<String>,
        event_type: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self::new(event_id, event_type, WebhookOutcome::Processing, None, payload)
    }

    pub fn success(
        event_id: impl Into<String>,
        event_type: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self::new(event_id, event_type, WebhookOutcome::Success, None, payload)
    }

    pub fn ignored(
        event_id: impl Into<String>,
        event_type: impl Into<String>,
        reason: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self::new(event_id, event_type, WebhookOutcome::Ignored, Some(reason.into()), payload)
    }

    pub fn failed(
        event_id: impl Into<String>,
        event_type: impl Into<String>,
        error: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self::new(event_id, event_type, WebhookOutcome::Failed, Some(error.into()), payload)
    }
}

/// Result of attempting to record an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    Inserted,
    /// Another delivery of the same event got there first.
    AlreadyExists,
}

/// Storage for processed webhook events.
///
/// `save` is the claim and must be race-safe: two concurrent deliveries of one
/// event yield one `Inserted` and one `AlreadyExists`. Only the delivery that
/// inserted may apply the event.
#[async_trait]
pub trait WebhookEventRepository: Send + Sync {
    async fn find_by_event_id(
        &self,
        event_id: &str,
    ) -> Result<Option<WebhookEventRecord>, DomainError>;

    async fn save(&self, record: WebhookEventRecord) -> Result<SaveResult, DomainError>;

    /// Records how a claimed event ended.
    async fn complete(
        &self,
        event_id: &str,
        outcome: WebhookOutcome,
        error_message: Option<String>,
    ) -> Result<(), DomainError>;

    /// Drops a claim so a redelivery can apply the event again.
    async fn release(&self, event_id: &str) -> Result<(), DomainError>;

    /// Drops records processed before `cutoff`. Returns how many were removed.
    async fn delete_before(&self, cutoff: Timestamp) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_outcome_and_reason() {
        let ok = WebhookEventRecord::success("evt_1", "invoice.paid", serde_json::json!({}));
        assert_eq!(ok.outcome, WebhookOutcome::Success);
        assert!(ok.error_message.is_none());

        let skipped = WebhookEventRecord::ignored("evt_2", "charge.refunded", "no handler", serde_json::json!({}));
        assert_eq!(skipped.outcome, WebhookOutcome::Ignored);
        assert_eq!(skipped.error_message.as_deref(), Some("no handler"));

        let failed = WebhookEventRecord::failed("evt_3", "customer.subscription.updated", "db down", serde_json::json!({}));
        assert_eq!(failed.outcome.as_str(), "failed");
    }

    #[test]
    fn outcome_parse_round_trips_known_values() {
        for outcome in [WebhookOutcome::Processing, WebhookOutcome::Success, WebhookOutcome::Ignored, WebhookOutcome::Failed] {
            assert_eq!(WebhookOutcome::parse(outcome.as_str()), outcome);
        }
    }
}
