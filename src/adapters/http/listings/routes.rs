//! Axum router configuration for listing endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_property, delete_property, get_property, list_cities, list_countries,
    list_properties, map_properties, search_properties, update_property, ListingsAppState,
};

/// Create the listings API router.
///
/// # Routes
///
/// ## Public
/// - `GET /api/properties`, `GET /api/properties/:id`
/// - `POST /api/properties/search`, `POST /api/properties/map`
/// - `GET /api/countries`, `GET /api/cities`
///
/// ## Authenticated
/// - `POST /api/properties`
/// - `PUT /api/properties/:id`, `DELETE /api/properties/:id` (owner only)
pub fn listings_router() -> Router<ListingsAppState> {
    Router::new()
        .route("/api/properties", get(list_properties).post(create_property))
        .route("/api/properties/search", post(search_properties))
        .route("/api/properties/map", post(map_properties))
        .route(
            "/api/properties/:id",
            get(get_property).put(update_property).delete(delete_property),
        )
        .route("/api/countries", get(list_countries))
        .route("/api/cities", get(list_cities))
}

#[cfg(test)]
mod tests {
    use crate::adapters::http::test_support::TestApp;
    use crate::domain::foundation::{CityId, PropertyId, Timestamp, UserId};
    use crate::domain::listing::property::sample_new_property;
    use crate::domain::listing::{City, Country};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    fn listing_body() -> Value {
        json!({
            "title": "Bilocale arredato",
            "description": "Luminoso, vicino alla metro",
            "propertyType": "bilocale",
            "price": 900,
            "country": "IT",
            "city": "Torino",
            "address": "Corso Francia 10",
            "latitude": 45.07,
            "longitude": 7.66,
            "isFurnished": true
        })
    }

    async fn seed_listing(app: &TestApp, id: i32, owner: i32) {
        let property = sample_new_property().into_property(
            PropertyId::from_raw(id),
            UserId::from_raw(owner),
            Timestamp::now(),
        );
        app.store.insert_property(property).await;
    }

    #[tokio::test]
    async fn create_consumes_the_free_listing() {
        let app = TestApp::new();
        let token = app.user(1).await;

        let (status, body) = app.post("/api/properties", Some(&token), listing_body()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["title"], "Bilocale arredato");
        assert_eq!(body["isActive"], true);
        assert_eq!(body["bathrooms"], 1);

        let (_, rights) = app.get("/api/user/publishing-rights", Some(&token)).await;
        assert_eq!(rights["hasFreeListing"], false);
        assert_eq!(rights["canPublish"], false);

        let (status, _) = app.post("/api/properties", Some(&token), listing_body()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn create_requires_authentication() {
        let app = TestApp::new();
        let (status, _) = app.post("/api/properties", None, listing_body()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_rejects_non_positive_price() {
        let app = TestApp::new();
        let token = app.user(1).await;
        let mut body = listing_body();
        body["price"] = json!(0);

        let (status, _) = app.post("/api/properties", Some(&token), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_distinguishes_bad_and_missing_ids() {
        let app = TestApp::new();
        seed_listing(&app, 3, 1).await;

        let (status, body) = app.get("/api/properties/3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 3);

        let (status, _) = app.get("/api/properties/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app.get("/api/properties/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Proprietà non trovata");
    }

    #[tokio::test]
    async fn only_the_owner_can_update_or_delete() {
        let app = TestApp::new();
        seed_listing(&app, 10, 1).await;
        let owner = app.user(1).await;
        let stranger = app.user(2).await;

        let (status, _) = app
            .put("/api/properties/10", Some(&stranger), json!({ "price": 1 }))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = app
            .put("/api/properties/10", Some(&owner), json!({ "price": 500 }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["price"], 500);

        let (status, _) = app.delete("/api/properties/10", Some(&stranger)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app.delete("/api/properties/10", Some(&owner)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app.get("/api/properties/10", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_filters_by_city_and_price() {
        let app = TestApp::new();
        seed_listing(&app, 1, 1).await;

        let (status, body) = app.get("/api/properties?city=milano&maxPrice=500", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (_, body) = app.get("/api/properties?minPrice=600", None).await;
        assert!(body.as_array().unwrap().is_empty());

        let (status, _) = app.get("/api/properties?country=XX", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_matches_text_and_bounds() {
        let app = TestApp::new();
        seed_listing(&app, 1, 1).await;

        let (status, body) = app
            .post("/api/properties/search", None, json!({ "q": "università" }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (_, body) = app
            .post(
                "/api/properties/search",
                None,
                json!({ "north": 41.0, "south": 40.0, "east": 13.0, "west": 12.0 }),
            )
            .await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn map_without_full_bounds_returns_everything_active() {
        let app = TestApp::new();
        seed_listing(&app, 1, 1).await;
        seed_listing(&app, 2, 1).await;

        let (status, body) = app
            .post("/api/properties/map", None, json!({ "bounds": { "north": 46.0 } }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn countries_include_italy() {
        let app = TestApp::new();
        let (status, body) = app.get("/api/countries", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body
            .as_array()
            .unwrap()
            .iter()
            .any(|c| c["code"] == "IT" && c["name"] == "Italia"));
    }

    #[tokio::test]
    async fn cities_are_listed_per_country() {
        let city = |id: i32, name: &str, country: Country, popular: bool| City {
            id: CityId::from_raw(id),
            name: name.to_string(),
            country,
            province: None,
            population: None,
            latitude: None,
            longitude: None,
            is_popular: popular,
        };
        let app = TestApp::with_cities(vec![
            city(1, "Bergamo", Country::It, false),
            city(2, "Roma", Country::It, true),
            city(3, "Madrid", Country::Es, true),
        ]);

        let (status, body) = app.get("/api/cities?country=it", None).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Roma", "Bergamo"]);

        let (status, _) = app.get("/api/cities?country=ZZ", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
