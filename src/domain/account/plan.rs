//! Subscription plan definitions.

use serde::{Deserialize, Serialize};

/// Subscription plan stored on the user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    /// One-off purchase of a single listing.
    Single,

    /// Recurring plan, 30 listings per period.
    Standard,

    /// Recurring plan, effectively unlimited listings.
    Premium,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Single => "single",
            SubscriptionPlan::Standard => "standard",
            SubscriptionPlan::Premium => "premium",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "single" => Some(SubscriptionPlan::Single),
            "standard" => Some(SubscriptionPlan::Standard),
            "premium" => Some(SubscriptionPlan::Premium),
            _ => None,
        }
    }

    /// Listing credits granted each billing period.
    pub fn listing_limit(&self) -> i32 {
        match self {
            SubscriptionPlan::Single => 1,
            SubscriptionPlan::Standard => 30,
            SubscriptionPlan::Premium => 1000,
        }
    }

    /// Whether this plan is billed as a Stripe subscription.
    pub fn is_recurring(&self) -> bool {
        !matches!(self, SubscriptionPlan::Single)
    }
}

impl std::fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
