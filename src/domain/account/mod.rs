//! Account domain module.
//!
//! Users, their subscription plan and the publishing rights derived from it.

mod plan;
mod publishing;
pub(crate) mod user;

pub use plan::SubscriptionPlan;
pub use publishing::PublishingRights;
pub use user::{
    validate_email, validate_registration, BillingUpdate, ListingCredit, NewUser, ProfileUpdate,
    User, MIN_PASSWORD_LEN,
};
