//! Payment configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::billing::PlanPrices;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret key
    pub stripe_api_key: String,

    /// Stripe webhook signing secret
    pub stripe_webhook_secret: String,

    /// Recurring price for the standard plan
    #[serde(default = "default_standard_price")]
    pub stripe_price_standard: String,

    /// Recurring price for the premium plan
    #[serde(default = "default_premium_price")]
    pub stripe_price_premium: String,

    /// Reject webhook events sent in test mode
    #[serde(default)]
    pub require_livemode: bool,

    /// Days a processed webhook event stays in the idempotency ledger
    #[serde(default = "default_webhook_retention_days")]
    pub webhook_retention_days: u32,

    /// Seconds between ledger pruning runs
    #[serde(default = "default_prune_interval")]
    pub webhook_prune_interval_secs: u64,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_live_")
    }

    pub fn webhook_prune_interval(&self) -> Duration {
        Duration::from_secs(self.webhook_prune_interval_secs)
    }

    pub fn plan_prices(&self) -> PlanPrices {
        PlanPrices::new(&self.stripe_price_standard, &self.stripe_price_premium)
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STRIPE_API_KEY"));
        }
        if self.stripe_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired(
                "PAYMENT__STRIPE_WEBHOOK_SECRET",
            ));
        }

        // Verify key prefixes for safety
        if !self.stripe_api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        if self.stripe_price_standard.trim().is_empty() {
            return Err(ValidationError::EmptyPriceId("standard"));
        }
        if self.stripe_price_premium.trim().is_empty() {
            return Err(ValidationError::EmptyPriceId("premium"));
        }
        if self.require_livemode && self.is_test_mode() {
            return Err(ValidationError::LivemodeWithTestKey);
        }
        // Stripe retries a failed delivery for up to three days
        if self.webhook_retention_days < 3 {
            return Err(ValidationError::WebhookRetentionTooShort);
        }
        if self.webhook_prune_interval_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_api_key: String::new(),
            stripe_webhook_secret: String::new(),
            stripe_price_standard: default_standard_price(),
            stripe_price_premium: default_premium_price(),
            require_livemode: false,
            webhook_retention_days: default_webhook_retention_days(),
            webhook_prune_interval_secs: default_prune_interval(),
        }
    }
}

fn default_webhook_retention_days() -> u32 {
    30
}

fn default_prune_interval() -> u64 {
    6 * 60 * 60
}

fn default_standard_price() -> String {
    "price_standard".to_string()
}

fn default_premium_price() -> String {
    "price_premium".to_string()
}
