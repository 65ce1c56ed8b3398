//! Feature vectors sent to the ML microservice.
//!
//! Real activity counts come from the database; behavioural signals that
//! are not tracked yet are derived from `seed = user_id * 13` so a user
//! always maps to the same vector.

use chrono::Datelike;
use serde::Serialize;

use crate::domain::account::{SubscriptionPlan, User};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::listing::Property;

const SEED_FACTOR: i64 = 13;

/// Activity counts read from storage for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UserActivity {
    pub listings: i64,
    pub avg_listing_price: f64,
    pub messages_sent: i64,
    pub reviews_written: i64,
}

fn seed(user_id: UserId) -> i64 {
    user_id.as_i32() as i64 * SEED_FACTOR
}

fn days_between(earlier: Timestamp, later: Timestamp) -> i64 {
    later.duration_since(&earlier).num_days().max(0)
}

fn subscription_tier(plan: Option<SubscriptionPlan>) -> i32 {
    match plan {
        Some(SubscriptionPlan::Standard) => 1,
        Some(SubscriptionPlan::Premium) => 2,
        Some(SubscriptionPlan::Single) | None => 0,
    }
}

/// Share of optional profile fields the user filled in, 0..=1.
fn profile_completeness(user: &User) -> f64 {
    let filled = [
        user.name.is_some(),
        !user.email.is_empty(),
        user.profile_image.is_some(),
        user.bio.is_some(),
        user.phone.is_some(),
        user.surname.is_some(),
    ];
    filled.iter().filter(|f| **f).count() as f64 / filled.len() as f64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterFeatures {
    pub properties_viewed_monthly: i64,
    pub avg_view_duration_sec: i64,
    pub search_count_monthly: i64,
    pub msg_sent_monthly: i64,
    pub msg_response_rate: f64,
    pub avg_response_time_hrs: i64,
    pub properties_listed: i64,
    pub avg_listing_price: f64,
    pub reviews_written: i64,
    pub listing_completeness: f64,
    pub listing_updates_monthly: i64,
    pub login_frequency_weekly: i64,
    pub session_duration_min: i64,
    pub completed_profile: f64,
    pub subscription_tier: i32,
    pub days_since_registration: i64,
}

impl ClusterFeatures {
    pub fn derive(user: &User, activity: &UserActivity, now: Timestamp) -> Self {
        let seed = seed(user.id);
        Self {
            properties_viewed_monthly: seed % 30 + 5,
            avg_view_duration_sec: seed % 60 + 60,
            search_count_monthly: seed % 25 + 5,
            msg_sent_monthly: activity.messages_sent,
            msg_response_rate: (seed % 100) as f64 / 100.0,
            avg_response_time_hrs: seed % 12 + 1,
            properties_listed: activity.listings,
            avg_listing_price: activity.avg_listing_price,
            reviews_written: activity.reviews_written,
            listing_completeness: ((seed % 5) + 5) as f64 / 10.0,
            listing_updates_monthly: seed % 5,
            login_frequency_weekly: seed % 6 + 1,
            session_duration_min: seed % 20 + 5,
            completed_profile: profile_completeness(user),
            subscription_tier: subscription_tier(user.subscription_plan),
            days_since_registration: days_between(user.created_at, now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChurnFeatures {
    pub days_since_registration: i64,
    pub days_active_last_month: i64,
    pub total_properties_viewed: i64,
    pub messages_sent: i64,
    pub properties_listed: i64,
    pub reviews_written: i64,
    pub subscription_months: i64,
}

impl ChurnFeatures {
    pub fn derive(user: &User, activity: &UserActivity, now: Timestamp) -> Self {
        let seed = seed(user.id);
        // Plans run a month at a time; an active one counts as one month.
        let subscription_months = if user.has_active_subscription(now) { 1 } else { 0 };
        Self {
            days_since_registration: days_between(user.created_at, now),
            days_active_last_month: seed % 20 + 1,
            total_properties_viewed: seed % 50 + 5,
            messages_sent: activity.messages_sent,
            properties_listed: activity.listings,
            reviews_written: activity.reviews_written,
            subscription_months,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingFeatures {
    pub city: String,
    pub property_type: String,
    pub square_meters: i32,
    pub room_count: i32,
    pub bathrooms: i32,
    pub is_furnished: i32,
    /// 1 summer, 2 autumn, 3 winter, 4 spring.
    pub season: i32,
    pub current_price: i32,
}

impl PricingFeatures {
    pub fn derive(property: &Property, now: Timestamp) -> Self {
        Self {
            city: property.city.clone(),
            property_type: property.property_type.as_str().to_string(),
            square_meters: property.square_meters.unwrap_or(0),
            room_count: property.bedrooms.max(1),
            bathrooms: property.bathrooms,
            is_furnished: i32::from(property.is_furnished),
            season: season(now.date().month()),
            current_price: property.price,
        }
    }
}

fn season(month: u32) -> i32 {
    match month {
        6..=8 => 1,
        9..=11 => 2,
        12 | 1 | 2 => 3,
        _ => 4,
    }
}
