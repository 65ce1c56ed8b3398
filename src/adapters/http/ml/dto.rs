//! Request bodies for ML endpoints. `customData` takes precedence over ids.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::foundation::{PropertyId, UserId};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPredictionRequest {
    pub user_id: Option<UserId>,
    pub custom_data: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePredictionRequest {
    pub property_id: Option<PropertyId>,
    pub custom_data: Option<Value>,
}
