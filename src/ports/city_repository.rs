//! City reference data port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::listing::{City, Country};

#[async_trait]
pub trait CityRepository: Send + Sync {
    /// Cities of a country, popular first then by name.
    async fn list_by_country(&self, country: Country) -> Result<Vec<City>, DomainError>;
}
