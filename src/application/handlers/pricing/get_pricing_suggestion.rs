//! GetPricingSuggestionHandler - Query handler for rent suggestions.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::listing::PropertyType;
use crate::domain::pricing::PriceSuggestion;
use crate::ports::PriceStatsRepository;

#[derive(Debug, Clone, Default)]
pub struct GetPricingSuggestionQuery {
    pub city: String,
    pub zone: Option<String>,
    pub property_type: Option<PropertyType>,
}

/// Suggests a rent range from stored statistics.
///
/// Tries the exact (city, zone, type) row, then the city-wide row. `None`
/// means no data for the city at all.
pub struct GetPricingSuggestionHandler {
    stats: Arc<dyn PriceStatsRepository>,
}

impl GetPricingSuggestionHandler {
    pub fn new(stats: Arc<dyn PriceStatsRepository>) -> Self {
        Self { stats }
    }

    pub async fn handle(
        &self,
        query: GetPricingSuggestionQuery,
    ) -> Result<Option<PriceSuggestion>, DomainError> {
        let city = query.city.trim();
        if city.is_empty() {
            return Err(DomainError::validation("city", "Il parametro 'city' è obbligatorio"));
        }
        let zone = query.zone.as_deref().map(str::trim).filter(|z| !z.is_empty());

        if let Some(stat) = self.stats.find(city, zone, query.property_type).await? {
            return Ok(Some(PriceSuggestion::from_stat(&stat, true)));
        }

        Ok(self
            .stats
            .find_city_wide(city)
            .await?
            .map(|stat| PriceSuggestion::from_stat(&stat, false)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::{ErrorCode, Timestamp};
    use crate::domain::pricing::{Confidence, PriceStat};

    fn stat(zone: Option<&str>, property_type: Option<PropertyType>, avg: i32, n: i32) -> PriceStat {
        PriceStat {
            city: "Bologna".to_string(),
            zone: zone.map(str::to_string),
            property_type,
            average_price: avg,
            min_price: avg - 100,
            max_price: avg + 100,
            median_price: avg,
            std_dev: 40,
            sample_size: n,
            last_updated: Timestamp::now(),
        }
    }

    async fn store() -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        store
            .replace_all(vec![
                stat(Some("Centro"), Some(PropertyType::Monolocale), 650, 8),
                stat(None, None, 500, 30),
            ])
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn exact_row_is_preferred() {
        let suggestion = GetPricingSuggestionHandler::new(store().await)
            .handle(GetPricingSuggestionQuery {
                city: "bologna".to_string(),
                zone: Some("Centro".to_string()),
                property_type: Some(PropertyType::Monolocale),
            })
            .await
            .unwrap()
            .unwrap();

        assert!(suggestion.is_exact);
        assert_eq!(suggestion.average_price, 650);
        assert_eq!(suggestion.suggested_min, 610);
        assert_eq!(suggestion.suggested_max, 690);
        assert_eq!(suggestion.confidence, Confidence::Media);
    }

    #[tokio::test]
    async fn falls_back_to_city_wide_row() {
        let suggestion = GetPricingSuggestionHandler::new(store().await)
            .handle(GetPricingSuggestionQuery {
                city: "Bologna".to_string(),
                zone: Some("Navile".to_string()),
                property_type: None,
            })
            .await
            .unwrap()
            .unwrap();

        assert!(!suggestion.is_exact);
        assert_eq!(suggestion.average_price, 500);
        assert_eq!(suggestion.confidence, Confidence::Alta);
    }

    #[tokio::test]
    async fn unknown_city_has_no_suggestion() {
        let suggestion = GetPricingSuggestionHandler::new(store().await)
            .handle(GetPricingSuggestionQuery {
                city: "Bari".to_string(),
                ..GetPricingSuggestionQuery::default()
            })
            .await
            .unwrap();
        assert!(suggestion.is_none());
    }

    #[tokio::test]
    async fn city_is_required() {
        let err = GetPricingSuggestionHandler::new(store().await)
            .handle(GetPricingSuggestionQuery::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
