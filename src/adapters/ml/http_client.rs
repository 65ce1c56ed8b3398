//! JSON-over-HTTP client for the Python ML microservice.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::ports::{MlError, MlModel, MlService};

pub const DEFAULT_ML_BASE_URL: &str = "http://localhost:5001";

pub struct HttpMlService {
    base_url: String,
    client: Client,
}

impl HttpMlService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder().timeout(timeout).build().unwrap_or_default();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn url(&self, model: MlModel) -> String {
        format!("{}{}", self.base_url, model.path())
    }
}

#[async_trait]
impl MlService for HttpMlService {
    async fn predict(&self, model: MlModel, features: Value) -> Result<Value, MlError> {
        let url = self.url(model);
        tracing::debug!(%url, "Forwarding features to ML service");

        let response = self
            .client
            .post(&url)
            .json(&features)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, %url, "ML service unreachable");
                MlError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %url, "ML service returned an error");
            return Err(MlError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| MlError::Parse(e.to_string()))
    }
}
