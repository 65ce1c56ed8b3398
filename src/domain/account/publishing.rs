//! Publishing rights view.

use serde::Serialize;

use crate::domain::foundation::Timestamp;

use super::{SubscriptionPlan, User};

/// Snapshot of whether a user may create a listing, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishingRights {
    pub can_publish: bool,
    pub has_free_listing: bool,
    pub has_active_subscription: bool,
    pub subscription_plan: Option<SubscriptionPlan>,
    pub expires_at: Option<Timestamp>,
    pub remaining_listings: i32,
}

impl PublishingRights {
    pub fn for_user(user: &User, now: Timestamp) -> Self {
        Self {
            can_publish: user.can_publish(now),
            has_free_listing: user.has_free_listing(),
            has_active_subscription: user.has_active_subscription(now),
            subscription_plan: user.subscription_plan,
            expires_at: user.subscription_expires_at,
            remaining_listings: user.remaining_listings,
        }
    }
}
