//! Listing entity and its write models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{PropertyId, Timestamp, UserId, ValidationError};

use super::{Country, PropertyType};

/// Days a listing stays published when no expiry is given.
pub const DEFAULT_LISTING_DAYS: i64 = 30;

/// A rentable unit published by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    /// Monthly rent in euros.
    pub price: i32,
    pub country: Country,
    pub city: String,
    pub address: String,
    pub zone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub square_meters: Option<i32>,
    pub bathrooms: i32,
    pub bedrooms: i32,
    pub photos: Vec<String>,
    pub features: Option<Value>,
    pub available_from: Option<Timestamp>,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub is_active: bool,
    pub is_furnished: bool,
    pub allows_pets: bool,
    pub internet_included: bool,
}

impl Property {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Listing creation input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub price: i32,
    #[serde(default)]
    pub country: Country,
    pub city: String,
    pub address: String,
    pub zone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub square_meters: Option<i32>,
    pub bathrooms: Option<i32>,
    pub bedrooms: Option<i32>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub features: Option<Value>,
    pub available_from: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    #[serde(default)]
    pub is_furnished: bool,
    #[serde(default)]
    pub allows_pets: bool,
    #[serde(default)]
    pub internet_included: bool,
}

impl NewProperty {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("city", &self.city)?;
        require_text("address", &self.address)?;
        if self.price <= 0 {
            return Err(ValidationError::out_of_range(
                "price",
                1,
                i32::MAX as i64,
                self.price as i64,
            ));
        }
        validate_counts(self.bathrooms, self.bedrooms, self.square_meters)?;
        validate_coordinates(self.latitude, self.longitude)
    }

    /// Builds the stored listing with defaults applied.
    pub fn into_property(self, id: PropertyId, owner: UserId, now: Timestamp) -> Property {
        Property {
            id,
            user_id: owner,
            title: self.title.trim().to_string(),
            description: self.description,
            property_type: self.property_type,
            price: self.price,
            country: self.country,
            city: self.city.trim().to_string(),
            address: self.address,
            zone: self.zone,
            latitude: self.latitude,
            longitude: self.longitude,
            square_meters: self.square_meters,
            bathrooms: self.bathrooms.unwrap_or(1),
            bedrooms: self.bedrooms.unwrap_or(1),
            photos: self.photos,
            features: self.features,
            available_from: self.available_from,
            created_at: now,
            expires_at: self
                .expires_at
                .unwrap_or_else(|| now.add_days(DEFAULT_LISTING_DAYS)),
            is_active: true,
            is_furnished: self.is_furnished,
            allows_pets: self.allows_pets,
            internet_included: self.internet_included,
        }
    }
}

/// Partial listing update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub property_type: Option<PropertyType>,
    pub price: Option<i32>,
    pub country: Option<Country>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub zone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub square_meters: Option<i32>,
    pub bathrooms: Option<i32>,
    pub bedrooms: Option<i32>,
    pub photos: Option<Vec<String>>,
    pub features: Option<Value>,
    pub available_from: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub is_active: Option<bool>,
    pub is_furnished: Option<bool>,
    pub allows_pets: Option<bool>,
    pub internet_included: Option<bool>,
}

impl PropertyUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("city", &self.city),
            ("address", &self.address),
        ] {
            if let Some(v) = value {
                require_text(field, v)?;
            }
        }
        if let Some(price) = self.price {
            if price <= 0 {
                return Err(ValidationError::out_of_range(
                    "price",
                    1,
                    i32::MAX as i64,
                    price as i64,
                ));
            }
        }
        validate_counts(self.bathrooms, self.bedrooms, self.square_meters)?;
        validate_coordinates(self.latitude, self.longitude)
    }

    pub fn apply(self, property: &mut Property) {
        if let Some(v) = self.title {
            property.title = v.trim().to_string();
        }
        if let Some(v) = self.description {
            property.description = v;
        }
        if let Some(v) = self.property_type {
            property.property_type = v;
        }
        if let Some(v) = self.price {
            property.price = v;
        }
        if let Some(v) = self.country {
            property.country = v;
        }
        if let Some(v) = self.city {
            property.city = v.trim().to_string();
        }
        if let Some(v) = self.address {
            property.address = v;
        }
        if self.zone.is_some() {
            property.zone = self.zone;
        }
        if self.latitude.is_some() {
            property.latitude = self.latitude;
        }
        if self.longitude.is_some() {
            property.longitude = self.longitude;
        }
        if self.square_meters.is_some() {
            property.square_meters = self.square_meters;
        }
        if let Some(v) = self.bathrooms {
            property.bathrooms = v;
        }
        if let Some(v) = self.bedrooms {
            property.bedrooms = v;
        }
        if let Some(v) = self.photos {
            property.photos = v;
        }
        if self.features.is_some() {
            property.features = self.features;
        }
        if self.available_from.is_some() {
            property.available_from = self.available_from;
        }
        if let Some(v) = self.expires_at {
            property.expires_at = v;
        }
        if let Some(v) = self.is_active {
            property.is_active = v;
        }
        if let Some(v) = self.is_furnished {
            property.is_furnished = v;
        }
        if let Some(v) = self.allows_pets {
            property.allows_pets = v;
        }
        if let Some(v) = self.internet_included {
            property.internet_included = v;
        }
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::empty_field(field))
    } else {
        Ok(())
    }
}

fn validate_counts(
    bathrooms: Option<i32>,
    bedrooms: Option<i32>,
    square_meters: Option<i32>,
) -> Result<(), ValidationError> {
    for (field, value) in [
        ("bathrooms", bathrooms),
        ("bedrooms", bedrooms),
        ("squareMeters", square_meters),
    ] {
        if let Some(v) = value {
            if v < 0 {
                return Err(ValidationError::out_of_range(field, 0, i32::MAX as i64, v as i64));
            }
        }
    }
    Ok(())
}

fn validate_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), ValidationError> {
    if let Some(lat) = latitude {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ValidationError::invalid_format("latitude", "must be within ±90"));
        }
    }
    if let Some(lng) = longitude {
        if !(-180.0..=180.0).contains(&lng) {
            return Err(ValidationError::invalid_format("longitude", "must be within ±180"));
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn sample_new_property() -> NewProperty {
    NewProperty {
        title: "Stanza luminosa".to_string(),
        description: "Vicino all'università".to_string(),
        property_type: PropertyType::StanzaSingola,
        price: 450,
        country: Country::It,
        city: "Milano".to_string(),
        address: "Via Roma 1".to_string(),
        zone: Some("Città Studi".to_string()),
        latitude: Some(45.47),
        longitude: Some(9.22),
        square_meters: Some(14),
        bathrooms: None,
        bedrooms: None,
        photos: vec![],
        features: None,
        available_from: None,
        expires_at: None,
        is_furnished: true,
        allows_pets: false,
        internet_included: true,
    }
}
