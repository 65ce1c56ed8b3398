//! UpdateProfileHandler - Command handler for partial profile edits.

use std::sync::Arc;

use crate::domain::account::{ProfileUpdate, User};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub update: ProfileUpdate,
}

/// Applies a [`ProfileUpdate`]; fields left as `None` are untouched.
pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<User, DomainError> {
        // 1. Validate the patch
        cmd.update.validate()?;

        // 2. Load the user
        let mut user = self
            .users
            .find_by_id(cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Utente non trovato"))?;

        // 3. A new email must not belong to someone else
        if let Some(email) = cmd.update.email.as_deref().map(str::trim) {
            if email.to_lowercase() != user.email.to_lowercase() {
                if let Some(owner) = self.users.find_by_email(email).await? {
                    if owner.id != user.id {
                        return Err(DomainError::validation("email", "Email già in uso"));
                    }
                }
            }
        }

        // 4. Apply and persist
        cmd.update.apply(&mut user);
        self.users.save_profile(&user).await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::account::user::test_user;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn updates_only_given_fields() {
        let store = Arc::new(InMemoryStore::new());
        let mut user = test_user(1);
        user.phone = Some("333".to_string());
        store.insert_user(user).await;

        let updated = UpdateProfileHandler::new(store.clone())
            .handle(UpdateProfileCommand {
                user_id: UserId::from_raw(1),
                update: ProfileUpdate {
                    bio: Some("Studente a Bologna".to_string()),
                    has_vat: Some(true),
                    ..ProfileUpdate::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(updated.bio.as_deref(), Some("Studente a Bologna"));
        assert!(updated.has_vat);
        assert_eq!(updated.phone.as_deref(), Some("333"));
        assert!(updated.updated_at.is_some());

        let stored = store.find_by_id(UserId::from_raw(1)).await.unwrap().unwrap();
        assert_eq!(stored.bio.as_deref(), Some("Studente a Bologna"));
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let err = UpdateProfileHandler::new(Arc::new(InMemoryStore::new()))
            .handle(UpdateProfileCommand {
                user_id: UserId::from_raw(5),
                update: ProfileUpdate::default(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn email_taken_by_another_user_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_user(test_user(1)).await;
        store.insert_user(test_user(2)).await;

        let err = UpdateProfileHandler::new(store)
            .handle(UpdateProfileCommand {
                user_id: UserId::from_raw(1),
                update: ProfileUpdate {
                    email: Some("user2@example.com".to_string()),
                    ..ProfileUpdate::default()
                },
            })
            .await
            .unwrap_err();
        assert_eq!(err.message, "Email già in uso");
    }
}
