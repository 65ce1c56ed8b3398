use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PropertyId, Timestamp, UserId};
use crate::domain::listing::{
    city_matches, City, Country, ListingFilter, MapBounds, NewProperty, Property, PropertyType,
    SearchCriteria,
};
use crate::domain::pricing::PriceStat;
use crate::ports::{CityRepository, PriceStatsRepository, PropertyRepository};

use super::{sorted_cities, InMemoryStore};

fn newest_first(mut listings: Vec<Property>) -> Vec<Property> {
    listings.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    listings
}

impl InMemoryStore {
    async fn active_where<F>(&self, predicate: F) -> Vec<Property>
    where
        F: Fn(&Property) -> bool,
    {
        let state = self.state.read().await;
        newest_first(
            state
                .properties
                .values()
                .filter(|p| p.is_active && predicate(p))
                .cloned()
                .collect(),
        )
    }
}

#[async_trait]
impl PropertyRepository for InMemoryStore {
    async fn find_by_id(&self, id: PropertyId) -> Result<Option<Property>, DomainError> {
        Ok(self.state.read().await.properties.get(&id).cloned())
    }

    async fn list(&self, filter: &ListingFilter) -> Result<Vec<Property>, DomainError> {
        Ok(self.active_where(|p| filter.matches(p)).await)
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Property>, DomainError> {
        Ok(self.active_where(|p| criteria.matches(p)).await)
    }

    async fn in_bounds(&self, bounds: Option<MapBounds>) -> Result<Vec<Property>, DomainError> {
        let mut listings = self
            .active_where(|p| bounds.as_ref().map_or(true, |b| b.contains(p)))
            .await;
        listings.reverse();
        Ok(listings)
    }

    async fn latest(
        &self,
        property_type: Option<PropertyType>,
        limit: usize,
    ) -> Result<Vec<Property>, DomainError> {
        let mut listings = self
            .active_where(|p| property_type.map_or(true, |t| p.property_type == t))
            .await;
        listings.truncate(limit);
        Ok(listings)
    }

    async fn in_city_of_type(
        &self,
        city: &str,
        property_type: PropertyType,
    ) -> Result<Vec<Property>, DomainError> {
        Ok(self
            .active_where(|p| p.property_type == property_type && city_matches(&p.city, city))
            .await)
    }

    async fn priced_active(&self) -> Result<Vec<Property>, DomainError> {
        Ok(self.active_where(|p| p.price > 0).await)
    }

    async fn create(
        &self,
        owner: UserId,
        property: NewProperty,
        now: Timestamp,
    ) -> Result<Property, DomainError> {
        let mut state = self.state.write().await;
        let id = PropertyId::from_raw(state.next_id());
        let property = property.into_property(id, owner, now);
        state.properties.insert(id, property.clone());
        Ok(property)
    }

    async fn update(&self, property: &Property) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.properties.get_mut(&property.id) {
            Some(stored) => {
                *stored = property.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("Property not found")),
        }
    }

    async fn delete(&self, id: PropertyId) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        if state.properties.remove(&id).is_none() {
            return Ok(false);
        }
        state.favorites.retain(|f| f.property_id != id);
        state.interactions.retain(|i| i.property_id != id);
        Ok(true)
    }
}

#[async_trait]
impl CityRepository for InMemoryStore {
    async fn list_by_country(&self, country: Country) -> Result<Vec<City>, DomainError> {
        let state = self.state.read().await;
        Ok(sorted_cities(
            state
                .cities
                .iter()
                .filter(|c| c.country == country)
                .cloned()
                .collect(),
        ))
    }
}

#[async_trait]
impl PriceStatsRepository for InMemoryStore {
    async fn replace_all(&self, stats: Vec<PriceStat>) -> Result<usize, DomainError> {
        let mut state = self.state.write().await;
        state.price_stats = stats;
        Ok(state.price_stats.len())
    }

    async fn find(
        &self,
        city: &str,
        zone: Option<&str>,
        property_type: Option<PropertyType>,
    ) -> Result<Option<PriceStat>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .price_stats
            .iter()
            .filter(|s| city_matches(&s.city, city))
            .filter(|s| zone.map_or(true, |z| s.zone.as_deref() == Some(z)))
            .filter(|s| property_type.map_or(true, |t| s.property_type == Some(t)))
            .max_by_key(|s| s.last_updated)
            .cloned())
    }

    async fn find_city_wide(&self, city: &str) -> Result<Option<PriceStat>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .price_stats
            .iter()
            .filter(|s| city_matches(&s.city, city) && s.is_city_wide())
            .max_by_key(|s| s.last_updated)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::property::sample_new_property;

    async fn seeded() -> (InMemoryStore, Property, Property) {
        let store = InMemoryStore::new();
        let now = Timestamp::now();
        let older = store
            .create(UserId::from_raw(1), sample_new_property(), now.minus_days(2))
            .await
            .unwrap();
        let mut draft = sample_new_property();
        draft.property_type = PropertyType::Bilocale;
        draft.price = 900;
        let newer = store.create(UserId::from_raw(1), draft, now).await.unwrap();
        (store, older, newer)
    }

    #[tokio::test]
    async fn lists_newest_first_and_map_oldest_first() {
        let (store, older, newer) = seeded().await;

        let listed = store.list(&ListingFilter::default()).await.unwrap();
        assert_eq!(listed.iter().map(|p| p.id).collect::<Vec<_>>(), vec![newer.id, older.id]);

        let mapped = store.in_bounds(None).await.unwrap();
        assert_eq!(mapped.iter().map(|p| p.id).collect::<Vec<_>>(), vec![older.id, newer.id]);
    }

    #[tokio::test]
    async fn inactive_listings_are_hidden_but_findable() {
        let (store, older, _) = seeded().await;
        let mut hidden = older.clone();
        hidden.is_active = false;
        store.update(&hidden).await.unwrap();

        assert_eq!(store.latest(None, 10).await.unwrap().len(), 1);
        assert!(PropertyRepository::find_by_id(&store, older.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn latest_respects_type_and_limit() {
        let (store, _, newer) = seeded().await;
        let bilocali = store.latest(Some(PropertyType::Bilocale), 10).await.unwrap();
        assert_eq!(bilocali.len(), 1);
        assert_eq!(bilocali[0].id, newer.id);
        assert_eq!(store.latest(None, 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn price_lookup_prefers_latest_and_separates_city_wide_rows() {
        let store = InMemoryStore::new();
        let now = Timestamp::now();
        let stat = |zone: Option<&str>, t: Option<PropertyType>, avg: i32, at: Timestamp| PriceStat {
            city: "Milano".into(),
            zone: zone.map(String::from),
            property_type: t,
            average_price: avg,
            min_price: avg,
            max_price: avg,
            median_price: avg,
            std_dev: 0,
            sample_size: 1,
            last_updated: at,
        };
        store
            .replace_all(vec![
                stat(None, None, 500, now),
                stat(Some("Centro"), Some(PropertyType::Monolocale), 800, now.minus_days(1)),
                stat(Some("Centro"), Some(PropertyType::Monolocale), 850, now),
            ])
            .await
            .unwrap();

        let exact = store
            .find("milano", Some("Centro"), Some(PropertyType::Monolocale))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(exact.average_price, 850);

        let city = store.find_city_wide("Milano").await.unwrap().unwrap();
        assert_eq!(city.average_price, 500);

        assert!(store.find("Roma", None, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn accented_city_names_match_regardless_of_case() {
        let store = InMemoryStore::new();
        let mut new = sample_new_property();
        new.city = "Forlì".to_string();
        let property_type = new.property_type;
        store.create(UserId::from_raw(1), new, Timestamp::now()).await.unwrap();

        let found = store.in_city_of_type("FORLÌ", property_type).await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(store.in_city_of_type("Forli", property_type).await.unwrap().is_empty());
    }
}
