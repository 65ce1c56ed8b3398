//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::account::{BillingUpdate, ListingCredit, NewUser, SubscriptionPlan, User};
use crate::domain::foundation::{DomainError, Role, Timestamp, UserId};
use crate::ports::UserRepository;

use super::{corrupt, db_error, opt_dt, opt_ts, ts, violates};

const USER_COLUMNS: &str = "id, username, password, email, email_verified, name, surname, phone, \
     bio, has_vat, vat_number, role, profile_image, created_at, updated_at, stripe_customer_id, \
     stripe_subscription_id, subscription_plan, subscription_expires_at, used_free_listing, \
     remaining_listings";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_where(&self, predicate: &str, value: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE {}", USER_COLUMNS, predicate);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find user"))?;
        row.map(User::try_from).transpose()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    username: String,
    password: String,
    email: String,
    email_verified: bool,
    name: Option<String>,
    surname: Option<String>,
    phone: Option<String>,
    bio: Option<String>,
    has_vat: bool,
    vat_number: Option<String>,
    role: String,
    profile_image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    stripe_customer_id: Option<String>,
    stripe_subscription_id: Option<String>,
    subscription_plan: Option<String>,
    subscription_expires_at: Option<DateTime<Utc>>,
    used_free_listing: bool,
    remaining_listings: i32,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let subscription_plan = match row.subscription_plan.as_deref() {
            None => None,
            Some(plan) => Some(SubscriptionPlan::parse(plan).ok_or_else(|| corrupt("plan", plan))?),
        };

        Ok(User {
            id: UserId::from_raw(row.id),
            username: row.username,
            password_hash: row.password,
            email: row.email,
            email_verified: row.email_verified,
            name: row.name,
            surname: row.surname,
            phone: row.phone,
            bio: row.bio,
            has_vat: row.has_vat,
            vat_number: row.vat_number,
            role: Role::parse(&row.role),
            profile_image: row.profile_image,
            created_at: ts(row.created_at),
            updated_at: opt_ts(row.updated_at),
            stripe_customer_id: row.stripe_customer_id,
            stripe_subscription_id: row.stripe_subscription_id,
            subscription_plan,
            subscription_expires_at: opt_ts(row.subscription_expires_at),
            used_free_listing: row.used_free_listing,
            remaining_listings: row.remaining_listings,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find user"))?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.find_where("username = $1", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_where("LOWER(email) = LOWER($1)", email.trim()).await
    }

    async fn find_by_stripe_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<User>, DomainError> {
        self.find_where("stripe_customer_id = $1", customer_id).await
    }

    async fn create(&self, user: NewUser, now: Timestamp) -> Result<User, DomainError> {
        let sql = format!(
            "INSERT INTO users (username, password, email, name, role, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            USER_COLUMNS
        );
        let row: UserRow = sqlx::query_as(&sql)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(user.email.trim())
            .bind(&user.name)
            .bind(user.role.as_str())
            .bind(now.as_datetime())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if violates(&e, "users_username_key") {
                    return DomainError::conflict("Username already taken");
                }
                if violates(&e, "users_email_key") {
                    return DomainError::conflict("Email already registered");
                }
                db_error("create user")(e)
            })?;
        User::try_from(row)
    }

    async fn save_profile(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = $2, surname = $3, phone = $4, bio = $5,
                has_vat = $6, vat_number = $7, email = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_i32())
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.phone)
        .bind(&user.bio)
        .bind(user.has_vat)
        .bind(&user.vat_number)
        .bind(&user.email)
        .bind(opt_dt(user.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "users_email_key") {
                return DomainError::conflict("Email already registered");
            }
            db_error("save profile")(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User not found"));
        }
        Ok(())
    }

    async fn update_billing(&self, id: UserId, update: &BillingUpdate) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                stripe_customer_id = COALESCE($2, stripe_customer_id),
                stripe_subscription_id = COALESCE($3, stripe_subscription_id),
                subscription_plan = COALESCE($4, subscription_plan),
                subscription_expires_at = COALESCE($5, subscription_expires_at),
                remaining_listings = COALESCE($6, remaining_listings)
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .bind(&update.stripe_customer_id)
        .bind(&update.stripe_subscription_id)
        .bind(update.subscription_plan.map(|p| p.as_str()))
        .bind(opt_dt(update.subscription_expires_at))
        .bind(update.remaining_listings)
        .execute(&self.pool)
        .await
        .map_err(db_error("update billing"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_listing_credits(&self, id: UserId, credits: i32) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE users SET remaining_listings = remaining_listings + $2 WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(credits)
        .execute(&self.pool)
        .await
        .map_err(db_error("add listing credits"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn consume_listing_credit(&self, id: UserId) -> Result<ListingCredit, DomainError> {
        // Returns the values from before the update so the spent credit can be named.
        let before: Option<(bool, i32)> = sqlx::query_as(
            r#"
            WITH before AS (
                SELECT id, used_free_listing, remaining_listings
                FROM users WHERE id = $1 FOR UPDATE
            )
            UPDATE users u SET
                used_free_listing = TRUE,
                remaining_listings = CASE
                    WHEN b.used_free_listing AND b.remaining_listings > 0
                    THEN b.remaining_listings - 1
                    ELSE b.remaining_listings
                END
            FROM before b
            WHERE u.id = b.id
            RETURNING b.used_free_listing, b.remaining_listings
            "#,
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("consume listing credit"))?;

        match before {
            None => Err(DomainError::not_found("User not found")),
            Some((false, _)) => Ok(ListingCredit::FreeListing),
            Some((true, remaining)) if remaining > 0 => Ok(ListingCredit::Remaining),
            Some(_) => Ok(ListingCredit::None),
        }
    }
}
