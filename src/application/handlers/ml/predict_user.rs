//! PredictUserHandler - Query handler for the user clustering and churn models.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::ml::{ChurnFeatures, ClusterFeatures};
use crate::ports::{AnalyticsReader, MlModel, MlService, UserRepository};

use super::ml_error;

/// The user-level models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserModel {
    Cluster,
    Churn,
}

impl UserModel {
    fn model(self) -> MlModel {
        match self {
            UserModel::Cluster => MlModel::Cluster,
            UserModel::Churn => MlModel::Churn,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PredictUserQuery {
    pub model: UserModel,
    pub user_id: Option<UserId>,
    /// Forwarded as-is when present; takes precedence over `user_id`.
    pub custom_data: Option<Value>,
}

pub struct PredictUserHandler {
    users: Arc<dyn UserRepository>,
    analytics: Arc<dyn AnalyticsReader>,
    ml: Arc<dyn MlService>,
}

impl PredictUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        analytics: Arc<dyn AnalyticsReader>,
        ml: Arc<dyn MlService>,
    ) -> Self {
        Self {
            users,
            analytics,
            ml,
        }
    }

    pub async fn handle(&self, query: PredictUserQuery) -> Result<Value, DomainError> {
        let features = match (query.custom_data.filter(|d| !d.is_null()), query.user_id) {
            (Some(data), _) => data,
            (None, Some(user_id)) => self.derive(query.model, user_id).await?,
            (None, None) => {
                return Err(DomainError::validation(
                    "userId",
                    "Devi fornire userId o customData",
                ))
            }
        };

        self.ml
            .predict(query.model.model(), features)
            .await
            .map_err(ml_error)
    }

    async fn derive(&self, model: UserModel, user_id: UserId) -> Result<Value, DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Utente non trovato"))?;
        let activity = self.analytics.user_activity(user_id).await?;
        let now = Timestamp::now();

        let features = match model {
            UserModel::Cluster => serde_json::to_value(ClusterFeatures::derive(&user, &activity, now)),
            UserModel::Churn => serde_json::to_value(ChurnFeatures::derive(&user, &activity, now)),
        };
        features.map_err(|e| DomainError::internal(format!("Failed to encode features: {}", e)))
    }
}
