//! Axum router configuration for ML endpoints.

use axum::{routing::post, Router};

use super::handlers::{churn, cluster, dynamic_pricing, MlAppState};

/// Create the ML API router. Every route requires authentication.
pub fn ml_router() -> Router<MlAppState> {
    Router::new()
        .route("/api/ml/cluster", post(cluster))
        .route("/api/ml/churn", post(churn))
        .route("/api/ml/dynamic-pricing", post(dynamic_pricing))
}

#[cfg(test)]
mod tests {
    use crate::adapters::http::test_support::TestApp;
    use crate::domain::foundation::{PropertyId, Timestamp, UserId};
    use crate::domain::listing::property::sample_new_property;
    use crate::ports::{MlError, MlModel};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn cluster_forwards_derived_features() {
        let app = TestApp::new();
        let token = app.user(3).await;
        let _ = app
            .ml
            .clone()
            .with_reply(MlModel::Cluster, json!({ "cluster": 2, "label": "studenti" }));

        let (status, body) = app
            .post("/api/ml/cluster", Some(&token), json!({ "userId": 3 }))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cluster"], 2);

        let (model, features) = &app.ml.calls()[0];
        assert_eq!(*model, MlModel::Cluster);
        assert_eq!(features["seed"], 39);
    }

    #[tokio::test]
    async fn custom_data_is_forwarded_as_is() {
        let app = TestApp::new();
        let token = app.user(3).await;

        let (status, _) = app
            .post(
                "/api/ml/churn",
                Some(&token),
                json!({ "userId": 999, "customData": { "logins": 4 } }),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(app.ml.calls()[0].1, json!({ "logins": 4 }));
    }

    #[tokio::test]
    async fn missing_input_and_unknown_user() {
        let app = TestApp::new();
        let token = app.user(3).await;

        let (status, _) = app.post("/api/ml/cluster", Some(&token), json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .post("/api/ml/cluster", Some(&token), json!({ "userId": 404 }))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(app.ml.calls().is_empty());
    }

    #[tokio::test]
    async fn dynamic_pricing_uses_the_listing() {
        let app = TestApp::new();
        let token = app.user(3).await;
        let property = sample_new_property().into_property(
            PropertyId::from_raw(10),
            UserId::from_raw(3),
            Timestamp::now(),
        );
        app.store.insert_property(property).await;

        let (status, _) = app
            .post("/api/ml/dynamic-pricing", Some(&token), json!({ "propertyId": 10 }))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (model, features) = &app.ml.calls()[0];
        assert_eq!(*model, MlModel::DynamicPricing);
        assert_eq!(features["city"], "Milano");
    }

    #[tokio::test]
    async fn upstream_errors_pass_through() {
        let app = TestApp::new();
        let token = app.user(3).await;
        let _ = app.ml.clone().with_error(
            MlModel::Churn,
            MlError::Upstream {
                status: 422,
                body: "features mancanti".to_string(),
            },
        );

        let (status, body) = app
            .post("/api/ml/churn", Some(&token), json!({ "customData": {} }))
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"], "features mancanti");
    }

    #[tokio::test]
    async fn unreachable_service_is_503() {
        let app = TestApp::new();
        let token = app.user(3).await;
        let _ = app.ml.clone().with_error(
            MlModel::Cluster,
            MlError::Unavailable("connection refused".to_string()),
        );

        let (status, body) = app
            .post("/api/ml/cluster", Some(&token), json!({ "userId": 3 }))
            .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "Servizio ML non disponibile");
    }

    #[tokio::test]
    async fn anonymous_callers_are_rejected() {
        let app = TestApp::new();
        let (status, _) = app
            .post("/api/ml/dynamic-pricing", None, json!({ "customData": {} }))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
