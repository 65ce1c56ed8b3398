//! HTTP handlers for pricing endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::pricing::{
    CalculatePriceStatsCommand, CalculatePriceStatsHandler, GetPricingSuggestionHandler,
    GetPricingSuggestionQuery,
};
use crate::domain::listing::PropertyType;
use crate::ports::{PriceStatsRepository, PropertyRepository};

use super::dto::{RecalculatedResponse, SuggestionParams, UnavailableResponse};

#[derive(Clone)]
pub struct PricingAppState {
    pub properties: Arc<dyn PropertyRepository>,
    pub stats: Arc<dyn PriceStatsRepository>,
}

impl PricingAppState {
    pub fn new(
        properties: Arc<dyn PropertyRepository>,
        stats: Arc<dyn PriceStatsRepository>,
    ) -> Self {
        Self { properties, stats }
    }

    pub fn calculate_handler(&self) -> CalculatePriceStatsHandler {
        CalculatePriceStatsHandler::new(self.properties.clone(), self.stats.clone())
    }

    pub fn suggestion_handler(&self) -> GetPricingSuggestionHandler {
        GetPricingSuggestionHandler::new(self.stats.clone())
    }
}

/// POST /api/admin/calculate-price-stats
pub async fn calculate_price_stats(
    State(state): State<PricingAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let count = state
        .calculate_handler()
        .handle(CalculatePriceStatsCommand { requested_by: user })
        .await?;
    Ok(Json(RecalculatedResponse {
        success: true,
        count,
    }))
}

/// GET /api/pricing-suggestion
pub async fn pricing_suggestion(
    State(state): State<PricingAppState>,
    Query(params): Query<SuggestionParams>,
) -> Result<Response, ApiError> {
    // An unknown type falls back to the city-wide row rather than failing.
    let property_type = params.property_type.as_deref().and_then(PropertyType::parse);

    let suggestion = state
        .suggestion_handler()
        .handle(GetPricingSuggestionQuery {
            city: params.city,
            zone: params.zone,
            property_type,
        })
        .await?;

    Ok(match suggestion {
        Some(suggestion) => Json(suggestion).into_response(),
        None => Json(UnavailableResponse::new()).into_response(),
    })
}
