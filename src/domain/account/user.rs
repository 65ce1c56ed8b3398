//! User account entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Role, Timestamp, UserId, ValidationError};

use super::SubscriptionPlan;

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Registered user, including billing state.
///
/// The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
    pub email_verified: bool,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub has_vat: bool,
    pub vat_number: Option<String>,
    pub role: Role,
    pub profile_image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub subscription_plan: Option<SubscriptionPlan>,
    pub subscription_expires_at: Option<Timestamp>,
    pub used_free_listing: bool,
    pub remaining_listings: i32,
}

/// Which credit a new listing was charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingCredit {
    /// The one free listing every account starts with.
    FreeListing,
    /// A prepaid or plan-granted listing credit.
    Remaining,
    /// Nothing to consume (e.g. active subscription with no credits left).
    None,
}

impl User {
    /// True when a plan is set and has not expired at `now`.
    pub fn has_active_subscription(&self, now: Timestamp) -> bool {
        match (self.subscription_plan, self.subscription_expires_at) {
            (Some(_), Some(expires)) => expires.is_after(&now),
            _ => false,
        }
    }

    pub fn has_free_listing(&self) -> bool {
        !self.used_free_listing
    }

    pub fn can_publish(&self, now: Timestamp) -> bool {
        self.has_active_subscription(now) || self.remaining_listings > 0 || self.has_free_listing()
    }

    /// Charges one listing: the free listing first, then paid credits.
    pub fn consume_listing_credit(&mut self) -> ListingCredit {
        if !self.used_free_listing {
            self.used_free_listing = true;
            ListingCredit::FreeListing
        } else if self.remaining_listings > 0 {
            self.remaining_listings -= 1;
            ListingCredit::Remaining
        } else {
            ListingCredit::None
        }
    }

    pub fn to_authenticated(&self) -> crate::domain::foundation::AuthenticatedUser {
        crate::domain::foundation::AuthenticatedUser::new(
            self.id,
            self.username.clone(),
            self.email.clone(),
            self.role,
        )
    }
}

/// Registration input, already carrying the hashed password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
}

impl NewUser {
    /// A fresh account: free listing unused, no plan, no credits.
    pub fn into_user(self, id: UserId, now: Timestamp) -> User {
        User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            email: self.email,
            email_verified: false,
            name: self.name,
            surname: None,
            phone: None,
            bio: None,
            has_vat: false,
            vat_number: None,
            role: self.role,
            profile_image: None,
            created_at: now,
            updated_at: None,
            stripe_customer_id: None,
            stripe_subscription_id: None,
            subscription_plan: None,
            subscription_expires_at: None,
            used_free_listing: false,
            remaining_listings: 0,
        }
    }
}

/// Validates raw registration fields before hashing.
pub fn validate_registration(
    username: &str,
    password: &str,
    email: &str,
) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::empty_field("username"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::invalid_format(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    validate_email(email)
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::invalid_format("email", "missing @ symbol")),
    }
}

/// Partial profile update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub has_vat: Option<bool>,
    pub vat_number: Option<String>,
    pub email: Option<String>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }

    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = Some(name.clone());
        }
        if let Some(surname) = &self.surname {
            user.surname = Some(surname.clone());
        }
        if let Some(phone) = &self.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(bio) = &self.bio {
            user.bio = Some(bio.clone());
        }
        if let Some(has_vat) = self.has_vat {
            user.has_vat = has_vat;
        }
        if let Some(vat) = &self.vat_number {
            user.vat_number = Some(vat.clone());
        }
        if let Some(email) = &self.email {
            user.email = email.trim().to_string();
        }
        user.updated_at = Some(Timestamp::now());
    }
}

/// Billing fields written back after Stripe calls or webhook events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillingUpdate {
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub subscription_plan: Option<SubscriptionPlan>,
    pub subscription_expires_at: Option<Timestamp>,
    pub remaining_listings: Option<i32>,
}

impl BillingUpdate {
    pub fn apply(&self, user: &mut User) {
        if let Some(customer) = &self.stripe_customer_id {
            user.stripe_customer_id = Some(customer.clone());
        }
        if let Some(subscription) = &self.stripe_subscription_id {
            user.stripe_subscription_id = Some(subscription.clone());
        }
        if let Some(plan) = self.subscription_plan {
            user.subscription_plan = Some(plan);
        }
        if let Some(expires) = self.subscription_expires_at {
            user.subscription_expires_at = Some(expires);
        }
        if let Some(remaining) = self.remaining_listings {
            user.remaining_listings = remaining;
        }
    }
}

#[cfg(test)]
pub(crate) fn test_user(id: i32) -> User {
    User {
        id: UserId::from_raw(id),
        username: format!("user{}", id),
        password_hash: String::new(),
        email: format!("user{}@example.com", id),
        email_verified: false,
        name: None,
        surname: None,
        phone: None,
        bio: None,
        has_vat: false,
        vat_number: None,
        role: Role::User,
        profile_image: None,
        created_at: Timestamp::now(),
        updated_at: None,
        stripe_customer_id: None,
        stripe_subscription_id: None,
        subscription_plan: None,
        subscription_expires_at: None,
        used_free_listing: false,
        remaining_listings: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accounts_can_publish_with_free_listing() {
        let user = test_user(1);
        assert!(user.has_free_listing());
        assert!(user.can_publish(Timestamp::now()));
    }

    #[test]
    fn free_listing_is_consumed_before_credits() {
        let mut user = test_user(1);
        user.remaining_listings = 3;

        assert_eq!(user.consume_listing_credit(), ListingCredit::FreeListing);
        assert!(user.used_free_listing);
        assert_eq!(user.remaining_listings, 3);

        assert_eq!(user.consume_listing_credit(), ListingCredit::Remaining);
        assert_eq!(user.remaining_listings, 2);
    }

    #[test]
    fn exhausted_account_cannot_publish() {
        let mut user = test_user(1);
        user.used_free_listing = true;
        assert!(!user.can_publish(Timestamp::now()));
        assert_eq!(user.consume_listing_credit(), ListingCredit::None);
    }

    #[test]
    fn active_subscription_grants_publishing_rights() {
        let now = Timestamp::now();
        let mut user = test_user(1);
        user.used_free_listing = true;
        user.subscription_plan = Some(SubscriptionPlan::Standard);
        user.subscription_expires_at = Some(now.add_days(10));
        assert!(user.has_active_subscription(now));
        assert!(user.can_publish(now));
    }

    #[test]
    fn expired_subscription_is_not_active() {
        let now = Timestamp::now();
        let mut user = test_user(1);
        user.subscription_plan = Some(SubscriptionPlan::Premium);
        user.subscription_expires_at = Some(now.minus_days(1));
        assert!(!user.has_active_subscription(now));
    }

    #[test]
    fn registration_rejects_short_passwords() {
        let err = validate_registration("mario", "12345", "m@example.com").unwrap_err();
        assert_eq!(err.field(), "password");
    }

    #[test]
    fn registration_rejects_email_without_at() {
        assert!(validate_registration("mario", "secret1", "mario.example.com").is_err());
        assert!(validate_registration("mario", "secret1", "mario@example.com").is_ok());
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let mut user = test_user(4);
        user.password_hash = "$argon2id$secret".to_string();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["username"], "user4");
        assert_eq!(json["usedFreeListing"], false);
    }

    #[test]
    fn profile_update_only_touches_provided_fields() {
        let mut user = test_user(2);
        user.phone = Some("333".to_string());
        let update = ProfileUpdate {
            bio: Some("Ciao".to_string()),
            ..Default::default()
        };
        update.apply(&mut user);
        assert_eq!(user.bio.as_deref(), Some("Ciao"));
        assert_eq!(user.phone.as_deref(), Some("333"));
        assert!(user.updated_at.is_some());
    }

    #[test]
    fn billing_update_sets_plan_and_credits() {
        let mut user = test_user(3);
        BillingUpdate {
            subscription_plan: Some(SubscriptionPlan::Standard),
            remaining_listings: Some(30),
            ..Default::default()
        }
        .apply(&mut user);
        assert_eq!(user.subscription_plan, Some(SubscriptionPlan::Standard));
        assert_eq!(user.remaining_listings, 30);
        assert!(user.stripe_customer_id.is_none());
    }
}
