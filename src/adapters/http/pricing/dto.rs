//! Query strings and responses for pricing endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionParams {
    #[serde(default)]
    pub city: String,
    pub zone: Option<String>,
    pub property_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecalculatedResponse {
    pub success: bool,
    pub count: usize,
}

/// Body when no statistics exist for the requested city.
#[derive(Debug, Clone, Serialize)]
pub struct UnavailableResponse {
    pub available: bool,
    pub message: &'static str,
}

impl UnavailableResponse {
    pub fn new() -> Self {
        Self {
            available: false,
            message: "Dati insufficienti per suggerire un prezzo in questa zona",
        }
    }
}

impl Default for UnavailableResponse {
    fn default() -> Self {
        Self::new()
    }
}
