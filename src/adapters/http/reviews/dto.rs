//! Request bodies for review endpoints.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RespondRequest {
    pub response: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub is_helpful: bool,
}
