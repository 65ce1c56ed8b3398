//! Listing handlers.
//!
//! ## Commands
//! - Creating a listing (gated by publishing rights)
//! - Updating and deleting a listing (owner only)
//!
//! ## Queries
//! - Single listing, filtered list, free-text search, map viewport
//! - Reference cities per country

mod create_property;
mod delete_property;
mod get_property;
mod list_cities;
mod list_properties;
mod search_properties;
mod update_property;

use crate::domain::foundation::{DomainError, PropertyId};
use crate::domain::listing::Property;
use crate::ports::PropertyRepository;

// Commands
pub use create_property::{CreatePropertyCommand, CreatePropertyHandler};
pub use delete_property::{DeletePropertyCommand, DeletePropertyHandler};
pub use update_property::{UpdatePropertyCommand, UpdatePropertyHandler};

// Queries
pub use get_property::{GetPropertyHandler, GetPropertyQuery};
pub use list_cities::{ListCitiesHandler, ListCitiesQuery};
pub use list_properties::{ListPropertiesHandler, ListPropertiesQuery};
pub use search_properties::{
    MapPropertiesHandler, MapPropertiesQuery, SearchPropertiesHandler, SearchPropertiesQuery,
};

pub(crate) const NOT_OWNER: &str = "Accesso negato. Non sei il proprietario di questa risorsa.";

/// Loads a listing or fails with 404.
pub(crate) async fn require_property(
    properties: &dyn PropertyRepository,
    id: PropertyId,
) -> Result<Property, DomainError> {
    properties
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Proprietà non trovata"))
}
