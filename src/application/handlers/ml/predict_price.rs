//! PredictPriceHandler - Query handler for the dynamic-pricing model.

use std::sync::Arc;

use serde_json::Value;

use crate::application::handlers::listings::require_property;
use crate::domain::foundation::{DomainError, PropertyId, Timestamp};
use crate::domain::ml::PricingFeatures;
use crate::ports::{MlModel, MlService, PropertyRepository};

use super::ml_error;

#[derive(Debug, Clone)]
pub struct PredictPriceQuery {
    pub property_id: Option<PropertyId>,
    /// Forwarded as-is when present; takes precedence over `property_id`.
    pub custom_data: Option<Value>,
}

pub struct PredictPriceHandler {
    properties: Arc<dyn PropertyRepository>,
    ml: Arc<dyn MlService>,
}

impl PredictPriceHandler {
    pub fn new(properties: Arc<dyn PropertyRepository>, ml: Arc<dyn MlService>) -> Self {
        Self { properties, ml }
    }

    pub async fn handle(&self, query: PredictPriceQuery) -> Result<Value, DomainError> {
        let features = match (query.custom_data.filter(|d| !d.is_null()), query.property_id) {
            (Some(data), _) => data,
            (None, Some(property_id)) => {
                let property = require_property(self.properties.as_ref(), property_id).await?;
                serde_json::to_value(PricingFeatures::derive(&property, Timestamp::now()))
                    .map_err(|e| DomainError::internal(format!("Failed to encode features: {}", e)))?
            }
            (None, None) => {
                return Err(DomainError::validation(
                    "propertyId",
                    "Devi fornire propertyId o customData",
                ))
            }
        };

        self.ml
            .predict(MlModel::DynamicPricing, features)
            .await
            .map_err(ml_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::ml::MockMlService;
    use crate::domain::foundation::{ErrorCode, UserId};
    use crate::domain::listing::property::sample_new_property;
    use serde_json::json;

    #[tokio::test]
    async fn listing_fields_are_forwarded() {
        let store = Arc::new(InMemoryStore::new());
        let property = store
            .create(UserId::from_raw(1), sample_new_property(), Timestamp::now())
            .await
            .unwrap();
        let ml = Arc::new(
            MockMlService::new().with_reply(MlModel::DynamicPricing, json!({"suggested_price": 480})),
        );

        let result = PredictPriceHandler::new(store, ml.clone())
            .handle(PredictPriceQuery {
                property_id: Some(property.id),
                custom_data: None,
            })
            .await
            .unwrap();

        assert_eq!(result["suggested_price"], 480);
        let (model, features) = &ml.calls()[0];
        assert_eq!(*model, MlModel::DynamicPricing);
        assert_eq!(features["city"], "Milano");
        assert_eq!(features["current_price"], 450);
        assert_eq!(features["is_furnished"], 1);
    }

    #[tokio::test]
    async fn unknown_listing_is_not_found() {
        let ml = Arc::new(MockMlService::new());
        let err = PredictPriceHandler::new(Arc::new(InMemoryStore::new()), ml.clone())
            .handle(PredictPriceQuery {
                property_id: Some(PropertyId::from_raw(8)),
                custom_data: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(ml.calls().is_empty());
    }

    #[tokio::test]
    async fn neither_listing_nor_data_is_rejected() {
        let err = PredictPriceHandler::new(Arc::new(InMemoryStore::new()), Arc::new(MockMlService::new()))
            .handle(PredictPriceQuery {
                property_id: None,
                custom_data: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
