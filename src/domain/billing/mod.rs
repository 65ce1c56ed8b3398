//! Billing domain module.
//!
//! Prices one-off charges, maps plans to Stripe prices and turns payment
//! webhook events into account changes.

mod charge;
mod prices;
mod webhook;

pub use charge::{
    resolve_charge, Charge, ChargePlan, CURRENCY, FIVE_LISTINGS_CREDITS, FIVE_LISTINGS_PLAN,
};
pub use prices::PlanPrices;
pub use webhook::{classify, BillingAction, WebhookError};
