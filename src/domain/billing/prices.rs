//! Mapping between subscription plans and Stripe price ids.

use crate::domain::account::SubscriptionPlan;

/// Configured Stripe price ids for the recurring plans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanPrices {
    pub standard: String,
    pub premium: String,
}

impl PlanPrices {
    pub fn new(standard: impl Into<String>, premium: impl Into<String>) -> Self {
        Self {
            standard: standard.into(),
            premium: premium.into(),
        }
    }

    /// Price id for a recurring plan name, `None` for anything else.
    pub fn price_for(&self, plan: &str) -> Option<(SubscriptionPlan, &str)> {
        match SubscriptionPlan::parse(plan)? {
            SubscriptionPlan::Standard => Some((SubscriptionPlan::Standard, &self.standard)),
            SubscriptionPlan::Premium => Some((SubscriptionPlan::Premium, &self.premium)),
            SubscriptionPlan::Single => None,
        }
    }

    /// Plan granted by a subscription on `price_id`.
    ///
    /// Only the premium price maps to premium; any other price is treated
    /// as standard.
    pub fn plan_for_price(&self, price_id: Option<&str>) -> SubscriptionPlan {
        match price_id {
            Some(id) if id == self.premium => SubscriptionPlan::Premium,
            _ => SubscriptionPlan::Standard,
        }
    }
}

impl Default for PlanPrices {
    fn default() -> Self {
        Self::new("price_standard", "price_premium")
    }
}
