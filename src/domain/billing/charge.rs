//! One-off charge pricing.
//!
//! Resolves what a payment intent should cost from the plan name the client
//! sends, falling back to the raw amount in euros.

use std::collections::BTreeMap;

use crate::domain::foundation::{PropertyId, UserId, ValidationError};

/// Currency every charge is made in.
pub const CURRENCY: &str = "eur";

/// Plan name the client sends for the 5-listing package.
pub const FIVE_LISTINGS_PLAN: &str = "5listings";

/// Listing credits granted by the 5-listing package.
pub const FIVE_LISTINGS_CREDITS: i32 = 5;

/// Known one-off price points, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargePlan {
    FiveListings,
    Standard,
    Premium,
}

impl ChargePlan {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            FIVE_LISTINGS_PLAN => Some(ChargePlan::FiveListings),
            "standard" => Some(ChargePlan::Standard),
            "premium" => Some(ChargePlan::Premium),
            _ => None,
        }
    }

    pub fn amount_cents(&self) -> i64 {
        match self {
            ChargePlan::FiveListings => 99,
            ChargePlan::Standard => 599,
            ChargePlan::Premium => 999,
        }
    }
}

/// A fully priced charge ready to send to the payment provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Charge {
    pub amount_cents: i64,
    pub currency: &'static str,
    pub metadata: BTreeMap<String, String>,
}

/// Prices a one-off payment.
///
/// A recognised `plan` wins over `amount`. Otherwise `amount` (in euros) must
/// be positive and is converted to cents.
pub fn resolve_charge(
    user_id: UserId,
    amount: Option<f64>,
    plan: Option<&str>,
    property_id: Option<PropertyId>,
) -> Result<Charge, ValidationError> {
    let mut metadata = BTreeMap::new();
    metadata.insert("userId".to_string(), user_id.to_string());
    if let Some(property_id) = property_id {
        metadata.insert("propertyId".to_string(), property_id.to_string());
    }
    if let Some(plan) = plan {
        metadata.insert("plan".to_string(), plan.to_string());
    }

    let amount_cents = match plan.and_then(ChargePlan::parse) {
        Some(known) => {
            if known == ChargePlan::FiveListings {
                metadata.insert("listingPackage".to_string(), FIVE_LISTINGS_CREDITS.to_string());
            }
            known.amount_cents()
        }
        None => {
            let amount = amount
                .filter(|a| a.is_finite())
                .ok_or_else(|| ValidationError::empty_field("amount"))?;
            let cents = (amount * 100.0).round() as i64;
            if cents <= 0 {
                return Err(ValidationError::invalid_format("amount", "must be positive"));
            }
            cents
        }
    };

    Ok(Charge {
        amount_cents,
        currency: CURRENCY,
        metadata,
    })
}
