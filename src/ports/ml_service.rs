//! ML microservice port.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Models exposed by the ML service, one endpoint each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MlModel {
    Cluster,
    Churn,
    DynamicPricing,
}

impl MlModel {
    pub fn path(&self) -> &'static str {
        match self {
            MlModel::Cluster => "/cluster",
            MlModel::Churn => "/churn",
            MlModel::DynamicPricing => "/dynamic-pricing",
        }
    }
}

#[async_trait]
pub trait MlService: Send + Sync {
    /// Posts `features` to the model and returns its JSON answer untouched.
    async fn predict(&self, model: MlModel, features: Value) -> Result<Value, MlError>;
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MlError {
    /// The service answered with a non-success status.
    #[error("ML service returned {status}")]
    Upstream { status: u16, body: String },

    #[error("ML service unreachable: {0}")]
    Unavailable(String),

    #[error("invalid ML response: {0}")]
    Parse(String),
}

impl From<MlError> for DomainError {
    fn from(err: MlError) -> Self {
        DomainError::new(ErrorCode::ExternalService, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_paths() {
        assert_eq!(MlModel::Cluster.path(), "/cluster");
        assert_eq!(MlModel::Churn.path(), "/churn");
        assert_eq!(MlModel::DynamicPricing.path(), "/dynamic-pricing");
    }
}
