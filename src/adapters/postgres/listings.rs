//! PostgreSQL implementations of PropertyRepository, CityRepository and
//! PriceStatsRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use crate::domain::foundation::{CityId, DomainError, PropertyId, Timestamp, UserId};
use crate::domain::listing::{
    City, Country, ListingFilter, MapBounds, NewProperty, Property, PropertyType, SearchCriteria,
};
use crate::domain::pricing::PriceStat;
use crate::ports::{CityRepository, PriceStatsRepository, PropertyRepository};

use super::{corrupt, db_error, opt_dt, opt_ts, ts};

pub(super) const PROPERTY_COLUMNS: &str = "id, user_id, title, description, type, price, country, city, \
     address, zone, latitude, longitude, square_meters, bathrooms, bedrooms, photos, features, \
     available_from, created_at, expires_at, is_active, is_furnished, allows_pets, internet_included";

// ════════════════════════════════════════════════════════════════════════════════
// Properties
// ════════════════════════════════════════════════════════════════════════════════

pub struct PostgresPropertyRepository {
    pool: PgPool,
}

impl PostgresPropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct PropertyRow {
    id: i32,
    user_id: i32,
    title: String,
    description: String,
    #[sqlx(rename = "type")]
    property_type: String,
    price: i32,
    country: String,
    city: String,
    address: String,
    zone: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    square_meters: Option<i32>,
    bathrooms: i32,
    bedrooms: i32,
    photos: Vec<String>,
    features: Option<Value>,
    available_from: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    is_active: bool,
    is_furnished: bool,
    allows_pets: bool,
    internet_included: bool,
}

impl TryFrom<PropertyRow> for Property {
    type Error = DomainError;

    fn try_from(row: PropertyRow) -> Result<Self, Self::Error> {
        let property_type = PropertyType::parse(&row.property_type)
            .ok_or_else(|| corrupt("type", &row.property_type))?;
        let country = Country::parse(&row.country).ok_or_else(|| corrupt("country", &row.country))?;

        Ok(Property {
            id: PropertyId::from_raw(row.id),
            user_id: UserId::from_raw(row.user_id),
            title: row.title,
            description: row.description,
            property_type,
            price: row.price,
            country,
            city: row.city,
            address: row.address,
            zone: row.zone,
            latitude: row.latitude,
            longitude: row.longitude,
            square_meters: row.square_meters,
            bathrooms: row.bathrooms,
            bedrooms: row.bedrooms,
            photos: row.photos,
            features: row.features,
            available_from: opt_ts(row.available_from),
            created_at: ts(row.created_at),
            expires_at: ts(row.expires_at),
            is_active: row.is_active,
            is_furnished: row.is_furnished,
            allows_pets: row.allows_pets,
            internet_included: row.internet_included,
        })
    }
}

fn into_properties(rows: Vec<PropertyRow>) -> Result<Vec<Property>, DomainError> {
    rows.into_iter().map(Property::try_from).collect()
}

/// `%needle%` for ILIKE with the pattern metacharacters escaped.
fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl PropertyRepository for PostgresPropertyRepository {
    async fn find_by_id(&self, id: PropertyId) -> Result<Option<Property>, DomainError> {
        let sql = format!("SELECT {} FROM properties WHERE id = $1", PROPERTY_COLUMNS);
        let row: Option<PropertyRow> = sqlx::query_as(&sql)
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find property"))?;
        row.map(Property::try_from).transpose()
    }

    async fn list(&self, filter: &ListingFilter) -> Result<Vec<Property>, DomainError> {
        let sql = format!(
            r#"
            SELECT {} FROM properties
            WHERE is_active
              AND ($1::text IS NULL OR LOWER(city) = LOWER(TRIM($1)))
              AND ($2::text IS NULL OR type = $2)
              AND ($3::int IS NULL OR price >= $3)
              AND ($4::int IS NULL OR price <= $4)
              AND ($5::text IS NULL OR country = $5)
            ORDER BY created_at DESC, id DESC
            "#,
            PROPERTY_COLUMNS
        );
        let rows: Vec<PropertyRow> = sqlx::query_as(&sql)
            .bind(&filter.city)
            .bind(filter.property_type.map(|t| t.as_str()))
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(filter.country.map(|c| c.code()))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list properties"))?;
        into_properties(rows)
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Property>, DomainError> {
        let query = criteria
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(contains_pattern);
        let bounds = criteria.bounds;

        let sql = format!(
            r#"
            SELECT {} FROM properties
            WHERE is_active
              AND ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1 OR address ILIKE $1)
              AND ($2::text IS NULL OR type = $2)
              AND ($3::int IS NULL OR price >= $3)
              AND ($4::int IS NULL OR price <= $4)
              AND ($5::float8 IS NULL OR (
                    latitude BETWEEN $6 AND $5 AND longitude BETWEEN $8 AND $7))
              AND ($9::bool IS NULL OR is_furnished = $9)
              AND ($10::bool IS NULL OR allows_pets = $10)
              AND ($11::bool IS NULL OR internet_included = $11)
            ORDER BY created_at DESC, id DESC
            "#,
            PROPERTY_COLUMNS
        );
        let rows: Vec<PropertyRow> = sqlx::query_as(&sql)
            .bind(query)
            .bind(criteria.property_type.map(|t| t.as_str()))
            .bind(criteria.min_price)
            .bind(criteria.max_price)
            .bind(bounds.map(|b| b.north))
            .bind(bounds.map(|b| b.south))
            .bind(bounds.map(|b| b.east))
            .bind(bounds.map(|b| b.west))
            .bind(criteria.is_furnished)
            .bind(criteria.allows_pets)
            .bind(criteria.internet_included)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("search properties"))?;
        into_properties(rows)
    }

    async fn in_bounds(&self, bounds: Option<MapBounds>) -> Result<Vec<Property>, DomainError> {
        let sql = format!(
            r#"
            SELECT {} FROM properties
            WHERE is_active
              AND ($1::float8 IS NULL OR (
                    latitude BETWEEN $2 AND $1 AND longitude BETWEEN $4 AND $3))
            ORDER BY created_at ASC, id ASC
            "#,
            PROPERTY_COLUMNS
        );
        let rows: Vec<PropertyRow> = sqlx::query_as(&sql)
            .bind(bounds.map(|b| b.north))
            .bind(bounds.map(|b| b.south))
            .bind(bounds.map(|b| b.east))
            .bind(bounds.map(|b| b.west))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("load map listings"))?;
        into_properties(rows)
    }

    async fn latest(
        &self,
        property_type: Option<PropertyType>,
        limit: usize,
    ) -> Result<Vec<Property>, DomainError> {
        let sql = format!(
            r#"
            SELECT {} FROM properties
            WHERE is_active AND ($1::text IS NULL OR type = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
            PROPERTY_COLUMNS
        );
        let rows: Vec<PropertyRow> = sqlx::query_as(&sql)
            .bind(property_type.map(|t| t.as_str()))
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("load latest properties"))?;
        into_properties(rows)
    }

    async fn in_city_of_type(
        &self,
        city: &str,
        property_type: PropertyType,
    ) -> Result<Vec<Property>, DomainError> {
        let sql = format!(
            r#"
            SELECT {} FROM properties
            WHERE is_active AND LOWER(city) = LOWER($1) AND type = $2
            ORDER BY created_at DESC, id DESC
            "#,
            PROPERTY_COLUMNS
        );
        let rows: Vec<PropertyRow> = sqlx::query_as(&sql)
            .bind(city)
            .bind(property_type.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("load comparable properties"))?;
        into_properties(rows)
    }

    async fn priced_active(&self) -> Result<Vec<Property>, DomainError> {
        let sql = format!(
            "SELECT {} FROM properties WHERE is_active AND price > 0",
            PROPERTY_COLUMNS
        );
        let rows: Vec<PropertyRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("load priced listings"))?;
        into_properties(rows)
    }

    async fn create(
        &self,
        owner: UserId,
        property: NewProperty,
        now: Timestamp,
    ) -> Result<Property, DomainError> {
        // Placeholder id; the database assigns the real one.
        let p = property.into_property(PropertyId::from_raw(0), owner, now);
        let sql = format!(
            r#"
            INSERT INTO properties (
                user_id, title, description, type, price, country, city, address, zone,
                latitude, longitude, square_meters, bathrooms, bedrooms, photos, features,
                available_from, created_at, expires_at, is_active, is_furnished, allows_pets,
                internet_included
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                      $17, $18, $19, $20, $21, $22, $23)
            RETURNING {}
            "#,
            PROPERTY_COLUMNS
        );
        let row: PropertyRow = sqlx::query_as(&sql)
            .bind(p.user_id.as_i32())
            .bind(&p.title)
            .bind(&p.description)
            .bind(p.property_type.as_str())
            .bind(p.price)
            .bind(p.country.code())
            .bind(&p.city)
            .bind(&p.address)
            .bind(&p.zone)
            .bind(p.latitude)
            .bind(p.longitude)
            .bind(p.square_meters)
            .bind(p.bathrooms)
            .bind(p.bedrooms)
            .bind(&p.photos)
            .bind(&p.features)
            .bind(opt_dt(p.available_from))
            .bind(p.created_at.as_datetime())
            .bind(p.expires_at.as_datetime())
            .bind(p.is_active)
            .bind(p.is_furnished)
            .bind(p.allows_pets)
            .bind(p.internet_included)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("create property"))?;
        Property::try_from(row)
    }

    async fn update(&self, p: &Property) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE properties SET
                title = $2, description = $3, type = $4, price = $5, country = $6, city = $7,
                address = $8, zone = $9, latitude = $10, longitude = $11, square_meters = $12,
                bathrooms = $13, bedrooms = $14, photos = $15, features = $16,
                available_from = $17, expires_at = $18, is_active = $19, is_furnished = $20,
                allows_pets = $21, internet_included = $22
            WHERE id = $1
            "#,
        )
        .bind(p.id.as_i32())
        .bind(&p.title)
        .bind(&p.description)
        .bind(p.property_type.as_str())
        .bind(p.price)
        .bind(p.country.code())
        .bind(&p.city)
        .bind(&p.address)
        .bind(&p.zone)
        .bind(p.latitude)
        .bind(p.longitude)
        .bind(p.square_meters)
        .bind(p.bathrooms)
        .bind(p.bedrooms)
        .bind(&p.photos)
        .bind(&p.features)
        .bind(opt_dt(p.available_from))
        .bind(p.expires_at.as_datetime())
        .bind(p.is_active)
        .bind(p.is_furnished)
        .bind(p.allows_pets)
        .bind(p.internet_included)
        .execute(&self.pool)
        .await
        .map_err(db_error("update property"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Property not found"));
        }
        Ok(())
    }

    async fn delete(&self, id: PropertyId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete property"))?;
        Ok(result.rows_affected() > 0)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Cities
// ════════════════════════════════════════════════════════════════════════════════

pub struct PostgresCityRepository {
    pool: PgPool,
}

impl PostgresCityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CityRow {
    id: i32,
    name: String,
    country: String,
    province: Option<String>,
    population: Option<i32>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    is_popular: bool,
}

impl TryFrom<CityRow> for City {
    type Error = DomainError;

    fn try_from(row: CityRow) -> Result<Self, Self::Error> {
        Ok(City {
            id: CityId::from_raw(row.id),
            country: Country::parse(&row.country).ok_or_else(|| corrupt("country", &row.country))?,
            name: row.name,
            province: row.province,
            population: row.population,
            latitude: row.latitude,
            longitude: row.longitude,
            is_popular: row.is_popular,
        })
    }
}

#[async_trait]
impl CityRepository for PostgresCityRepository {
    async fn list_by_country(&self, country: Country) -> Result<Vec<City>, DomainError> {
        let rows: Vec<CityRow> = sqlx::query_as(
            r#"
            SELECT id, name, country, province, population, latitude, longitude, is_popular
            FROM cities
            WHERE country = $1
            ORDER BY is_popular DESC, name ASC
            "#,
        )
        .bind(country.code())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list cities"))?;

        rows.into_iter().map(City::try_from).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Price statistics
// ════════════════════════════════════════════════════════════════════════════════

pub struct PostgresPriceStatsRepository {
    pool: PgPool,
}

impl PostgresPriceStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PRICE_STAT_COLUMNS: &str = "city, zone, property_type, avg_price, min_price, max_price, \
     median_price, std_dev, sample_size, last_updated";

#[derive(Debug, sqlx::FromRow)]
struct PriceStatRow {
    city: String,
    zone: Option<String>,
    property_type: Option<String>,
    avg_price: i32,
    min_price: i32,
    max_price: i32,
    median_price: i32,
    std_dev: i32,
    sample_size: i32,
    last_updated: DateTime<Utc>,
}

impl TryFrom<PriceStatRow> for PriceStat {
    type Error = DomainError;

    fn try_from(row: PriceStatRow) -> Result<Self, Self::Error> {
        let property_type = match row.property_type.as_deref() {
            None => None,
            Some(t) => Some(PropertyType::parse(t).ok_or_else(|| corrupt("property_type", t))?),
        };
        Ok(PriceStat {
            city: row.city,
            zone: row.zone,
            property_type,
            average_price: row.avg_price,
            min_price: row.min_price,
            max_price: row.max_price,
            median_price: row.median_price,
            std_dev: row.std_dev,
            sample_size: row.sample_size,
            last_updated: ts(row.last_updated),
        })
    }
}

#[async_trait]
impl PriceStatsRepository for PostgresPriceStatsRepository {
    async fn replace_all(&self, stats: Vec<PriceStat>) -> Result<usize, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        sqlx::query("DELETE FROM price_stats")
            .execute(&mut *tx)
            .await
            .map_err(db_error("clear price stats"))?;

        for stat in &stats {
            sqlx::query(
                r#"
                INSERT INTO price_stats (
                    city, zone, property_type, avg_price, min_price, max_price,
                    median_price, std_dev, sample_size, last_updated
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(&stat.city)
            .bind(&stat.zone)
            .bind(stat.property_type.map(|t| t.as_str()))
            .bind(stat.average_price)
            .bind(stat.min_price)
            .bind(stat.max_price)
            .bind(stat.median_price)
            .bind(stat.std_dev)
            .bind(stat.sample_size)
            .bind(stat.last_updated.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(db_error("insert price stat"))?;
        }

        tx.commit().await.map_err(db_error("commit price stats"))?;
        Ok(stats.len())
    }

    async fn find(
        &self,
        city: &str,
        zone: Option<&str>,
        property_type: Option<PropertyType>,
    ) -> Result<Option<PriceStat>, DomainError> {
        let sql = format!(
            r#"
            SELECT {} FROM price_stats
            WHERE LOWER(city) = LOWER($1)
              AND ($2::text IS NULL OR zone = $2)
              AND ($3::text IS NULL OR property_type = $3)
            ORDER BY last_updated DESC
            LIMIT 1
            "#,
            PRICE_STAT_COLUMNS
        );
        let row: Option<PriceStatRow> = sqlx::query_as(&sql)
            .bind(city.trim())
            .bind(zone)
            .bind(property_type.map(|t| t.as_str()))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find price stats"))?;
        row.map(PriceStat::try_from).transpose()
    }

    async fn find_city_wide(&self, city: &str) -> Result<Option<PriceStat>, DomainError> {
        let sql = format!(
            r#"
            SELECT {} FROM price_stats
            WHERE LOWER(city) = LOWER($1) AND zone IS NULL AND property_type IS NULL
            ORDER BY last_updated DESC
            LIMIT 1
            "#,
            PRICE_STAT_COLUMNS
        );
        let row: Option<PriceStatRow> = sqlx::query_as(&sql)
            .bind(city.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find city price stats"))?;
        row.map(PriceStat::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_patterns_escape_wildcards() {
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("via_roma"), "%via\\_roma%");
        assert_eq!(contains_pattern("centro"), "%centro%");
    }
}
