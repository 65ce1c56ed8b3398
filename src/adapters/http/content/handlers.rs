//! HTTP handlers for copywriting endpoints.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use crate::adapters::http::error::ApiError;
use crate::application::handlers::content::{
    GenerateDescriptionCommand, GenerateDescriptionHandler, GenerateTitlesCommand,
    GenerateTitlesHandler,
};
use crate::domain::content::PropertyAttributes;
use crate::ports::TextGenerator;

use super::dto::{DescriptionResponse, TitleSuggestionsResponse};

#[derive(Clone)]
pub struct ContentAppState {
    pub generator: Arc<dyn TextGenerator>,
}

impl ContentAppState {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn description_handler(&self) -> GenerateDescriptionHandler {
        GenerateDescriptionHandler::new(self.generator.clone())
    }

    pub fn titles_handler(&self) -> GenerateTitlesHandler {
        GenerateTitlesHandler::new(self.generator.clone())
    }
}

/// POST /api/generate-description
pub async fn generate_description(
    State(state): State<ContentAppState>,
    Json(attributes): Json<PropertyAttributes>,
) -> Result<impl IntoResponse, ApiError> {
    let description = state
        .description_handler()
        .handle(GenerateDescriptionCommand { attributes })
        .await?;
    Ok(Json(DescriptionResponse { description }))
}

/// POST /api/generate-title-suggestions
pub async fn generate_title_suggestions(
    State(state): State<ContentAppState>,
    Json(attributes): Json<PropertyAttributes>,
) -> Result<impl IntoResponse, ApiError> {
    let suggestions = state
        .titles_handler()
        .handle(GenerateTitlesCommand { attributes })
        .await?;
    Ok(Json(TitleSuggestionsResponse { suggestions }))
}
