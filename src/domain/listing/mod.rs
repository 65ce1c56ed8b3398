//! Listing domain module.
//!
//! Properties, their classification and the filters used by search and map
//! views.

mod city;
mod country;
pub(crate) mod property;
mod property_type;
mod search;

pub use city::{city_matches, sort_cities, City};
pub use country::{Country, CountryInfo};
pub use property::{NewProperty, Property, PropertyUpdate, DEFAULT_LISTING_DAYS};
pub use property_type::PropertyType;
pub use search::{ListingFilter, MapBounds, SearchCriteria};
