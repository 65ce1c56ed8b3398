//! Price statistics port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::listing::PropertyType;
use crate::domain::pricing::PriceStat;

#[async_trait]
pub trait PriceStatsRepository: Send + Sync {
    /// Replaces every stored row with `stats`. Returns the number stored.
    async fn replace_all(&self, stats: Vec<PriceStat>) -> Result<usize, DomainError>;

    /// Most recent row for `city` matching the given zone and type.
    ///
    /// A `None` zone or type matches any value in that column.
    async fn find(
        &self,
        city: &str,
        zone: Option<&str>,
        property_type: Option<PropertyType>,
    ) -> Result<Option<PriceStat>, DomainError>;

    /// The row covering the whole city (no zone, no type).
    async fn find_city_wide(&self, city: &str) -> Result<Option<PriceStat>, DomainError>;
}
