//! Axum router configuration for copywriting endpoints.

use axum::{routing::post, Router};

use super::handlers::{generate_description, generate_title_suggestions, ContentAppState};

pub fn content_router() -> Router<ContentAppState> {
    Router::new()
        .route("/api/generate-description", post(generate_description))
        .route("/api/generate-title-suggestions", post(generate_title_suggestions))
}

#[cfg(test)]
mod tests {
    use crate::adapters::http::test_support::TestApp;
    use crate::ports::AIError;
    use axum::http::StatusCode;
    use serde_json::json;

    fn attributes() -> serde_json::Value {
        json!({ "propertyType": "monolocale", "city": "Bologna", "squareMeters": 30 })
    }

    #[tokio::test]
    async fn description_comes_from_the_generator() {
        let app = TestApp::new();
        let _ = app.text.clone().with_response("Monolocale accogliente nel cuore di Bologna.");

        let (status, body) = app
            .post("/api/generate-description", None, attributes())
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["description"], "Monolocale accogliente nel cuore di Bologna.");
        assert!(app.text.calls()[0].prompt.contains("monolocale"));
    }

    #[tokio::test]
    async fn titles_are_split_into_suggestions() {
        let app = TestApp::new();
        let _ = app
            .text
            .clone()
            .with_response("1. Monolocale in centro\n2. Vicino alle Due Torri\n\n3. Luminoso e arredato");

        let (status, body) = app
            .post("/api/generate-title-suggestions", None, attributes())
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["suggestions"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn city_and_type_are_required() {
        let app = TestApp::new();
        let (status, _) = app
            .post("/api/generate-description", None, json!({ "city": "Bologna" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn generator_failure_is_500() {
        let app = TestApp::new();
        let _ = app.text.clone().with_error(AIError::NotConfigured);

        let (status, body) = app
            .post("/api/generate-description", None, attributes())
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "API Key OpenAI non configurata");
    }
}
