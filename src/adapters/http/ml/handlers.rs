//! HTTP handlers for ML endpoints.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::ml::{
    PredictPriceHandler, PredictPriceQuery, PredictUserHandler, PredictUserQuery, UserModel,
};
use crate::ports::{AnalyticsReader, MlService, PropertyRepository, UserRepository};

use super::dto::{PricePredictionRequest, UserPredictionRequest};

#[derive(Clone)]
pub struct MlAppState {
    pub users: Arc<dyn UserRepository>,
    pub properties: Arc<dyn PropertyRepository>,
    pub analytics: Arc<dyn AnalyticsReader>,
    pub ml: Arc<dyn MlService>,
}

impl MlAppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        properties: Arc<dyn PropertyRepository>,
        analytics: Arc<dyn AnalyticsReader>,
        ml: Arc<dyn MlService>,
    ) -> Self {
        Self {
            users,
            properties,
            analytics,
            ml,
        }
    }

    pub fn user_handler(&self) -> PredictUserHandler {
        PredictUserHandler::new(self.users.clone(), self.analytics.clone(), self.ml.clone())
    }

    pub fn price_handler(&self) -> PredictPriceHandler {
        PredictPriceHandler::new(self.properties.clone(), self.ml.clone())
    }
}

async fn predict_user(
    state: &MlAppState,
    model: UserModel,
    req: UserPredictionRequest,
) -> Result<impl IntoResponse, ApiError> {
    let prediction = state
        .user_handler()
        .handle(PredictUserQuery {
            model,
            user_id: req.user_id,
            custom_data: req.custom_data,
        })
        .await?;
    Ok(Json(prediction))
}

/// POST /api/ml/cluster
pub async fn cluster(
    State(state): State<MlAppState>,
    RequireAuth(_user): RequireAuth,
    Json(req): Json<UserPredictionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    predict_user(&state, UserModel::Cluster, req).await
}

/// POST /api/ml/churn
pub async fn churn(
    State(state): State<MlAppState>,
    RequireAuth(_user): RequireAuth,
    Json(req): Json<UserPredictionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    predict_user(&state, UserModel::Churn, req).await
}

/// POST /api/ml/dynamic-pricing
pub async fn dynamic_pricing(
    State(state): State<MlAppState>,
    RequireAuth(_user): RequireAuth,
    Json(req): Json<PricePredictionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let prediction = state
        .price_handler()
        .handle(PredictPriceQuery {
            property_id: req.property_id,
            custom_data: req.custom_data,
        })
        .await?;
    Ok(Json(prediction))
}
