//! User repository port.
//!
//! Persists accounts together with their billing state. Credit changes are
//! separate operations so implementations can apply them atomically instead
//! of read-modify-write.

use async_trait::async_trait;

use crate::domain::account::{BillingUpdate, ListingCredit, NewUser, User};
use crate::domain::foundation::{DomainError, Timestamp, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Looks up the account linked to a Stripe customer.
    async fn find_by_stripe_customer_id(&self, customer_id: &str)
        -> Result<Option<User>, DomainError>;

    /// Inserts a new account.
    ///
    /// # Errors
    ///
    /// - `Conflict` when the username or email is taken
    async fn create(&self, user: NewUser, now: Timestamp) -> Result<User, DomainError>;

    /// Saves profile fields (name, surname, phone, bio, VAT, email).
    async fn save_profile(&self, user: &User) -> Result<(), DomainError>;

    /// Applies the set fields of `update`. Returns false when the user is gone.
    async fn update_billing(&self, id: UserId, update: &BillingUpdate) -> Result<bool, DomainError>;

    /// Adds prepaid listing credits. Returns false when the user is gone.
    async fn add_listing_credits(&self, id: UserId, credits: i32) -> Result<bool, DomainError>;

    /// Charges one listing against the account.
    async fn consume_listing_credit(&self, id: UserId) -> Result<ListingCredit, DomainError>;
}
