//! In-memory storage adapter.
//!
//! One [`InMemoryStore`] implements every repository port plus the
//! analytics reader and the webhook ledger. Used by the HTTP tests and for
//! running the server without PostgreSQL.
//!
//! Does not persist data across restarts.

mod accounts;
mod analytics;
mod documents;
mod engagement;
mod listings;
mod messaging;
mod reviews;

use std::collections::{BTreeMap, HashMap};

use tokio::sync::RwLock;

use crate::domain::account::User;
use crate::domain::document::{Document, Signature};
use crate::domain::engagement::{Favorite, Interaction, SavedSearch};
use crate::domain::foundation::{DocumentId, PropertyId, ReportId, ReviewId, SavedSearchId, UserId};
use crate::domain::listing::{sort_cities, City, Property};
use crate::domain::messaging::Message;
use crate::domain::pricing::PriceStat;
use crate::domain::review::{Review, ReviewReport, ReviewVote};
use crate::ports::WebhookEventRecord;

/// Thread-safe in-memory store.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    last_id: i32,
    users: BTreeMap<UserId, User>,
    properties: BTreeMap<PropertyId, Property>,
    cities: Vec<City>,
    price_stats: Vec<PriceStat>,
    messages: Vec<Message>,
    reviews: BTreeMap<ReviewId, Review>,
    reports: BTreeMap<ReportId, ReviewReport>,
    votes: Vec<ReviewVote>,
    documents: BTreeMap<DocumentId, Document>,
    signatures: Vec<Signature>,
    favorites: Vec<Favorite>,
    saved_searches: BTreeMap<SavedSearchId, SavedSearch>,
    interactions: Vec<Interaction>,
    webhook_events: HashMap<String, WebhookEventRecord>,
}

impl State {
    /// Ids come from one sequence shared by every table.
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with reference cities.
    pub fn with_cities(cities: Vec<City>) -> Self {
        Self {
            state: RwLock::new(State {
                cities,
                ..State::default()
            }),
        }
    }

    /// Inserts a user record as-is, keeping its id.
    pub async fn insert_user(&self, user: User) {
        let mut state = self.state.write().await;
        state.last_id = state.last_id.max(user.id.as_i32());
        state.users.insert(user.id, user);
    }

    /// Inserts a listing as-is, keeping its id.
    pub async fn insert_property(&self, property: Property) {
        let mut state = self.state.write().await;
        state.last_id = state.last_id.max(property.id.as_i32());
        state.properties.insert(property.id, property);
    }

    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }
}

fn sorted_cities(mut cities: Vec<City>) -> Vec<City> {
    sort_cities(&mut cities);
    cities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::user::test_user;

    #[tokio::test]
    async fn inserted_records_advance_the_sequence() {
        let store = InMemoryStore::new();
        store.insert_user(test_user(41)).await;
        let next = store.state.write().await.next_id();
        assert_eq!(next, 42);
        assert_eq!(store.user_count().await, 1);
    }
}
