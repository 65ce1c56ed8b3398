use async_trait::async_trait;

use crate::domain::account::{BillingUpdate, ListingCredit, NewUser, User};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::UserRepository;

use super::InMemoryStore;

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.email.to_lowercase() == email.trim().to_lowercase())
            .cloned())
    }

    async fn find_by_stripe_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.stripe_customer_id.as_deref() == Some(customer_id))
            .cloned())
    }

    async fn create(&self, user: NewUser, now: Timestamp) -> Result<User, DomainError> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.username == user.username) {
            return Err(DomainError::conflict("Username already taken"));
        }
        if state
            .users
            .values()
            .any(|u| u.email.to_lowercase() == user.email.trim().to_lowercase())
        {
            return Err(DomainError::conflict("Email already registered"));
        }

        let id = UserId::from_raw(state.next_id());
        let user = user.into_user(id, now);
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn save_profile(&self, user: &User) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let stored = state
            .users
            .get_mut(&user.id)
            .ok_or_else(|| DomainError::not_found("User not found"))?;

        stored.name = user.name.clone();
        stored.surname = user.surname.clone();
        stored.phone = user.phone.clone();
        stored.bio = user.bio.clone();
        stored.has_vat = user.has_vat;
        stored.vat_number = user.vat_number.clone();
        stored.email = user.email.clone();
        stored.updated_at = user.updated_at;
        Ok(())
    }

    async fn update_billing(&self, id: UserId, update: &BillingUpdate) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        Ok(match state.users.get_mut(&id) {
            Some(user) => {
                update.apply(user);
                true
            }
            None => false,
        })
    }

    async fn add_listing_credits(&self, id: UserId, credits: i32) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        Ok(match state.users.get_mut(&id) {
            Some(user) => {
                user.remaining_listings += credits;
                true
            }
            None => false,
        })
    }

    async fn consume_listing_credit(&self, id: UserId) -> Result<ListingCredit, DomainError> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("User not found"))?;
        Ok(user.consume_listing_credit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, Role};

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.into(),
            password_hash: "hash".into(),
            email: email.into(),
            name: None,
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn rejects_duplicate_username_and_email() {
        let store = InMemoryStore::new();
        store.create(new_user("mario", "m@example.com"), Timestamp::now()).await.unwrap();

        let dup_name = store.create(new_user("mario", "x@example.com"), Timestamp::now()).await;
        assert_eq!(dup_name.unwrap_err().code, ErrorCode::Conflict);

        let dup_email = store.create(new_user("luigi", "M@example.com"), Timestamp::now()).await;
        assert_eq!(dup_email.unwrap_err().code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn credits_are_consumed_free_listing_first() {
        let store = InMemoryStore::new();
        let user = store.create(new_user("mario", "m@example.com"), Timestamp::now()).await.unwrap();
        store.add_listing_credits(user.id, 2).await.unwrap();

        assert_eq!(store.consume_listing_credit(user.id).await.unwrap(), ListingCredit::FreeListing);
        assert_eq!(store.consume_listing_credit(user.id).await.unwrap(), ListingCredit::Remaining);

        let stored = store.find_by_id(user.id).await.unwrap().unwrap();
        assert!(stored.used_free_listing);
        assert_eq!(stored.remaining_listings, 1);
    }

    #[tokio::test]
    async fn billing_update_on_missing_user_reports_false() {
        let store = InMemoryStore::new();
        let update = BillingUpdate {
            remaining_listings: Some(30),
            ..BillingUpdate::default()
        };
        assert!(!store.update_billing(UserId::from_raw(9), &update).await.unwrap());
    }
}
