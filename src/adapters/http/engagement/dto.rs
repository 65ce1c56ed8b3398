//! Request bodies and query strings for engagement endpoints.

use serde::Deserialize;

use crate::domain::foundation::PropertyId;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub property_id: PropertyId,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationParams {
    pub limit: Option<usize>,
}
