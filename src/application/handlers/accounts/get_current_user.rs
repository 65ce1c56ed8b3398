//! GetCurrentUserHandler - Query handler for the authenticated user's record.

use std::sync::Arc;

use crate::domain::account::User;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct GetCurrentUserQuery {
    pub user_id: UserId,
}

pub struct GetCurrentUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetCurrentUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetCurrentUserQuery) -> Result<User, DomainError> {
        // A valid token for a deleted account is treated as no session.
        self.users
            .find_by_id(query.user_id)
            .await?
            .ok_or_else(|| DomainError::unauthorized("Utente non trovato"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::account::user::test_user;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn returns_stored_user() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_user(test_user(3)).await;

        let user = GetCurrentUserHandler::new(store)
            .handle(GetCurrentUserQuery {
                user_id: UserId::from_raw(3),
            })
            .await
            .unwrap();
        assert_eq!(user.username, "user3");
    }

    #[tokio::test]
    async fn vanished_user_is_unauthorized() {
        let err = GetCurrentUserHandler::new(Arc::new(InMemoryStore::new()))
            .handle(GetCurrentUserQuery {
                user_id: UserId::from_raw(9),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }
}
