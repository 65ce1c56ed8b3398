//! HTTP handlers for listing endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::listings::{
    CreatePropertyCommand, CreatePropertyHandler, DeletePropertyCommand, DeletePropertyHandler,
    GetPropertyHandler, GetPropertyQuery, ListCitiesHandler, ListCitiesQuery,
    ListPropertiesHandler, ListPropertiesQuery, MapPropertiesHandler, MapPropertiesQuery,
    SearchPropertiesHandler, SearchPropertiesQuery, UpdatePropertyCommand, UpdatePropertyHandler,
};
use crate::domain::foundation::PropertyId;
use crate::domain::listing::{Country, CountryInfo, NewProperty, PropertyUpdate};
use crate::ports::{CityRepository, PropertyRepository, UserRepository};

use super::dto::{CitiesParams, ListPropertiesParams, MapRequest, SearchRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ListingsAppState {
    pub users: Arc<dyn UserRepository>,
    pub properties: Arc<dyn PropertyRepository>,
    pub cities: Arc<dyn CityRepository>,
}

impl ListingsAppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        properties: Arc<dyn PropertyRepository>,
        cities: Arc<dyn CityRepository>,
    ) -> Self {
        Self {
            users,
            properties,
            cities,
        }
    }

    pub fn create_property_handler(&self) -> CreatePropertyHandler {
        CreatePropertyHandler::new(self.users.clone(), self.properties.clone())
    }

    pub fn update_property_handler(&self) -> UpdatePropertyHandler {
        UpdatePropertyHandler::new(self.properties.clone())
    }

    pub fn delete_property_handler(&self) -> DeletePropertyHandler {
        DeletePropertyHandler::new(self.properties.clone())
    }

    pub fn get_property_handler(&self) -> GetPropertyHandler {
        GetPropertyHandler::new(self.properties.clone())
    }

    pub fn list_properties_handler(&self) -> ListPropertiesHandler {
        ListPropertiesHandler::new(self.properties.clone())
    }

    pub fn search_properties_handler(&self) -> SearchPropertiesHandler {
        SearchPropertiesHandler::new(self.properties.clone())
    }

    pub fn map_properties_handler(&self) -> MapPropertiesHandler {
        MapPropertiesHandler::new(self.properties.clone())
    }

    pub fn list_cities_handler(&self) -> ListCitiesHandler {
        ListCitiesHandler::new(self.cities.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Listings
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/properties
pub async fn list_properties(
    State(state): State<ListingsAppState>,
    Query(params): Query<ListPropertiesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = params.into_filter()?;
    let properties = state
        .list_properties_handler()
        .handle(ListPropertiesQuery { filter })
        .await?;
    Ok(Json(properties))
}

/// GET /api/properties/:id
pub async fn get_property(
    State(state): State<ListingsAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let property_id: PropertyId = id.parse()?;
    let property = state
        .get_property_handler()
        .handle(GetPropertyQuery { property_id })
        .await?;
    Ok(Json(property))
}

/// POST /api/properties
pub async fn create_property(
    State(state): State<ListingsAppState>,
    RequireAuth(user): RequireAuth,
    Json(property): Json<NewProperty>,
) -> Result<impl IntoResponse, ApiError> {
    let property = state
        .create_property_handler()
        .handle(CreatePropertyCommand {
            user_id: user.id,
            property,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(property)))
}

/// PUT /api/properties/:id
pub async fn update_property(
    State(state): State<ListingsAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(update): Json<PropertyUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let property_id: PropertyId = id.parse()?;
    let property = state
        .update_property_handler()
        .handle(UpdatePropertyCommand {
            user_id: user.id,
            property_id,
            update,
        })
        .await?;
    Ok(Json(property))
}

/// DELETE /api/properties/:id
pub async fn delete_property(
    State(state): State<ListingsAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let property_id: PropertyId = id.parse()?;
    state
        .delete_property_handler()
        .handle(DeletePropertyCommand {
            user_id: user.id,
            property_id,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Search
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/properties/search
pub async fn search_properties(
    State(state): State<ListingsAppState>,
    Json(req): Json<SearchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let criteria = req.into_criteria()?;
    let properties = state
        .search_properties_handler()
        .handle(SearchPropertiesQuery { criteria })
        .await?;
    Ok(Json(properties))
}

/// POST /api/properties/map
pub async fn map_properties(
    State(state): State<ListingsAppState>,
    Json(req): Json<MapRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let properties = state
        .map_properties_handler()
        .handle(MapPropertiesQuery {
            bounds: req.bounds(),
        })
        .await?;
    Ok(Json(properties))
}

// ════════════════════════════════════════════════════════════════════════════════
// Reference data
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/countries
pub async fn list_countries() -> impl IntoResponse {
    let countries: Vec<CountryInfo> = Country::ALL.iter().copied().map(CountryInfo::from).collect();
    Json(countries)
}

/// GET /api/cities
pub async fn list_cities(
    State(state): State<ListingsAppState>,
    Query(params): Query<CitiesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let country = params
        .country
        .unwrap_or_else(|| Country::default().code().to_string());
    let cities = state
        .list_cities_handler()
        .handle(ListCitiesQuery { country })
        .await?;
    Ok(Json(cities))
}
