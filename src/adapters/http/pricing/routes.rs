//! Axum router configuration for pricing endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{calculate_price_stats, pricing_suggestion, PricingAppState};

/// Create the pricing API router.
///
/// # Routes
/// - `POST /api/admin/calculate-price-stats` (admin)
/// - `GET /api/pricing-suggestion` (public)
pub fn pricing_router() -> Router<PricingAppState> {
    Router::new()
        .route("/api/admin/calculate-price-stats", post(calculate_price_stats))
        .route("/api/pricing-suggestion", get(pricing_suggestion))
}

#[cfg(test)]
mod tests {
    use crate::adapters::http::test_support::TestApp;
    use crate::domain::foundation::{PropertyId, Timestamp, UserId};
    use crate::domain::listing::property::sample_new_property;
    use axum::http::StatusCode;
    use serde_json::json;

    async fn seed_prices(app: &TestApp, prices: &[i32]) {
        for (i, price) in prices.iter().enumerate() {
            let mut new = sample_new_property();
            new.price = *price;
            let property = new.into_property(
                PropertyId::from_raw(100 + i as i32),
                UserId::from_raw(1),
                Timestamp::now(),
            );
            app.store.insert_property(property).await;
        }
    }

    #[tokio::test]
    async fn recalculation_is_admin_only() {
        let app = TestApp::new();
        let token = app.user(1).await;

        let (status, _) = app
            .post("/api/admin/calculate-price-stats", Some(&token), json!({}))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app
            .post("/api/admin/calculate-price-stats", None, json!({}))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn suggestion_after_recalculation() {
        let app = TestApp::new();
        seed_prices(&app, &[400, 450, 500]).await;
        let admin = app.admin(90).await;

        let (status, body) = app
            .post("/api/admin/calculate-price-stats", Some(&admin), json!({}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        // one (city, zone, type) group plus the city-wide row
        assert_eq!(body["count"], 2);

        let (status, body) = app
            .get(
                "/api/pricing-suggestion?city=Milano&zone=Citt%C3%A0%20Studi&propertyType=stanza_singola",
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["available"], true);
        assert_eq!(body["isExact"], true);
        assert_eq!(body["averagePrice"], 450);
        assert_eq!(body["medianPrice"], 450);
        assert_eq!(body["suggestedMin"], 400);
        assert_eq!(body["suggestedMax"], 500);
        assert_eq!(body["confidence"], "bassa");

        let (_, body) = app
            .get("/api/pricing-suggestion?city=Milano&propertyType=bilocale", None)
            .await;
        assert_eq!(body["isExact"], false);
    }

    #[tokio::test]
    async fn missing_data_is_reported_as_unavailable() {
        let app = TestApp::new();
        let (status, body) = app.get("/api/pricing-suggestion?city=Bari", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["available"], false);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn city_is_required() {
        let app = TestApp::new();
        let (status, _) = app.get("/api/pricing-suggestion", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
