//! Response bodies for copywriting endpoints. Requests are
//! `PropertyAttributes` as sent by the listing form.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DescriptionResponse {
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleSuggestionsResponse {
    pub suggestions: Vec<String>,
}
