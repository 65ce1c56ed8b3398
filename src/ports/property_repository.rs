//! Property repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PropertyId, Timestamp, UserId};
use crate::domain::listing::{ListingFilter, MapBounds, NewProperty, Property, PropertyType, SearchCriteria};

/// Listing persistence and queries.
///
/// Every list operation returns active listings only, newest first, unless
/// its documentation says otherwise.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Finds a listing regardless of its active flag.
    async fn find_by_id(&self, id: PropertyId) -> Result<Option<Property>, DomainError>;

    async fn list(&self, filter: &ListingFilter) -> Result<Vec<Property>, DomainError>;

    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Property>, DomainError>;

    /// Listings inside `bounds`, or every active listing when `None`.
    /// Ordered by creation time, oldest first.
    async fn in_bounds(&self, bounds: Option<MapBounds>) -> Result<Vec<Property>, DomainError>;

    /// Most recent listings, optionally of one type.
    async fn latest(
        &self,
        property_type: Option<PropertyType>,
        limit: usize,
    ) -> Result<Vec<Property>, DomainError>;

    /// Active listings in `city` of `property_type`, used for similarity.
    async fn in_city_of_type(
        &self,
        city: &str,
        property_type: PropertyType,
    ) -> Result<Vec<Property>, DomainError>;

    /// Active listings with a positive price, for statistics.
    async fn priced_active(&self) -> Result<Vec<Property>, DomainError>;

    /// Inserts a listing; the id is assigned by storage.
    async fn create(
        &self,
        owner: UserId,
        property: NewProperty,
        now: Timestamp,
    ) -> Result<Property, DomainError>;

    async fn update(&self, property: &Property) -> Result<(), DomainError>;

    /// Returns false when nothing was deleted.
    async fn delete(&self, id: PropertyId) -> Result<bool, DomainError>;
}
