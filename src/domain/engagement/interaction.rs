//! User interactions with listings and the recommendations built on them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{InteractionId, PropertyId, Timestamp, UserId};
use crate::domain::listing::{Property, PropertyType};

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 10;
pub const SIMILAR_LIMIT: usize = 6;
/// Allowed price distance for similar listings, in percent.
pub const SIMILAR_PRICE_BAND_PERCENT: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    View,
    Save,
    Contact,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionType::View => "view",
            InteractionType::Save => "save",
            InteractionType::Contact => "contact",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "view" => Some(InteractionType::View),
            "save" => Some(InteractionType::Save),
            "contact" => Some(InteractionType::Contact),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: InteractionId,
    pub user_id: UserId,
    pub property_id: PropertyId,
    pub interaction_type: InteractionType,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInteraction {
    pub property_id: PropertyId,
    pub interaction_type: InteractionType,
}

/// Most frequent listing type among the ones a user interacted with.
///
/// Ties resolve to the type that sorts first.
pub fn preferred_type<I>(types: I) -> Option<PropertyType>
where
    I: IntoIterator<Item = PropertyType>,
{
    let mut counts: BTreeMap<PropertyType, usize> = BTreeMap::new();
    for property_type in types {
        *counts.entry(property_type).or_default() += 1;
    }
    counts
        .into_iter()
        .fold(None, |best: Option<(PropertyType, usize)>, (t, n)| match best {
            Some((_, best_n)) if best_n >= n => best,
            _ => Some((t, n)),
        })
        .map(|(t, _)| t)
}

/// Whether `candidate` is comparable to `base`: same city and type, price
/// within the band, active, and not the listing itself.
pub fn is_similar(base: &Property, candidate: &Property) -> bool {
    let low = base.price as i64 * (100 - SIMILAR_PRICE_BAND_PERCENT);
    let high = base.price as i64 * (100 + SIMILAR_PRICE_BAND_PERCENT);
    let price = candidate.price as i64 * 100;
    candidate.id != base.id
        && candidate.is_active
        && candidate.city == base.city
        && candidate.property_type == base.property_type
        && (low..=high).contains(&price)
}

/// Up to [`SIMILAR_LIMIT`] similar listings, newest first.
pub fn similar_listings(base: &Property, candidates: Vec<Property>) -> Vec<Property> {
    let mut similar: Vec<Property> = candidates.into_iter().filter(|p| is_similar(base, p)).collect();
    similar.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    similar.truncate(SIMILAR_LIMIT);
    similar
}
