//! `PostgreSQL`-backed store.
//!
//! # Schema
//!
//! The adapter expects these tables (DDL is managed outside this crate):
//!
//! - `account` - `id serial`, `email text unique`, `password_hash text`,
//!   `created_at timestamptz default now()`
//! - `sender_profile` - `account_id int references account`, plus
//!   `business_name`, `street_address`, `city`, `state`, `zip_code`,
//!   `country` as `text`
//! - `booking` - `id serial`, `account_id int references account`, the
//!   sender/recipient/package columns mirrored from
//!   [`crate::models::Booking`], `customer_price integer`, the nullable
//!   label columns (`easypost_shipment_id`, `label_url`, `tracking_url`,
//!   `tracking_code`, `shipping_carrier`, `shipping_service`,
//!   `shipping_rate numeric`), and `created_at timestamptz default now()`
//!
//! Queries are runtime-checked (`query_as` over `FromRow` rows), so the
//! crate builds without a live database.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use boardshipper_core::{AccountId, BoardSize, BookingId, Email, Price};

use super::{AccountStore, BookingStore, StoreError};
use crate::models::{Account, Booking, LabelArtifacts, NewBooking, Recipient, SenderProfile, ServiceType};

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// `PostgreSQL` implementation of the store collaborators.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a store over an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountStore for PgStore {
    async fn create(
        &self,
        email: &Email,
        password_hash: &str,
        profile: SenderProfile,
    ) -> Result<Account, StoreError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, AccountRow>(
            "INSERT INTO account (email, password_hash)
             VALUES ($1, $2)
             RETURNING id, email, created_at",
        )
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, "email already registered"))?;

        sqlx::query(
            "INSERT INTO sender_profile
                 (account_id, business_name, street_address, city, state, zip_code, country)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(row.id)
        .bind(profile.business_name.as_str())
        .bind(profile.street_address.as_str())
        .bind(profile.city.as_str())
        .bind(profile.state.as_str())
        .bind(profile.zip_code.as_str())
        .bind(profile.country.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        row.into_account()
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(Account, String)>, StoreError> {
        let row = sqlx::query_as::<_, AccountAuthRow>(
            "SELECT id, email, password_hash, created_at FROM account WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountAuthRow::into_account_and_hash).transpose()
    }

    async fn find(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT id, email, created_at FROM account WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn sender_profile(&self, id: AccountId) -> Result<Option<SenderProfile>, StoreError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT business_name, street_address, city, state, zip_code, country
             FROM sender_profile WHERE account_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProfileRow::into_profile))
    }
}

impl BookingStore for PgStore {
    async fn save(
        &self,
        account_id: AccountId,
        booking: NewBooking,
        price: Price,
    ) -> Result<Booking, StoreError> {
        let price = i32::try_from(price.dollars())
            .map_err(|_| StoreError::DataCorruption("customer price out of range".to_owned()))?;

        let row = sqlx::query_as::<_, BookingRow>(
            "INSERT INTO booking
                 (account_id, sender_name,
                  recipient_first_name, recipient_last_name, recipient_email, recipient_phone,
                  recipient_street, recipient_city, recipient_state, recipient_zip,
                  recipient_country,
                  board_size, weight, order_reference, service, additional_info,
                  customer_price)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
             RETURNING id, account_id, sender_name,
                       recipient_first_name, recipient_last_name, recipient_email,
                       recipient_phone, recipient_street, recipient_city, recipient_state,
                       recipient_zip, recipient_country,
                       board_size, weight, order_reference, service, additional_info,
                       customer_price,
                       easypost_shipment_id, label_url, tracking_url, tracking_code,
                       shipping_carrier, shipping_service, shipping_rate,
                       created_at",
        )
        .bind(account_id)
        .bind(booking.sender_name.as_str())
        .bind(booking.recipient.first_name.as_str())
        .bind(booking.recipient.last_name.as_str())
        .bind(booking.recipient.email.as_str())
        .bind(booking.recipient.phone.as_str())
        .bind(booking.recipient.street.as_str())
        .bind(booking.recipient.city.as_str())
        .bind(booking.recipient.state.as_str())
        .bind(booking.recipient.zip.as_str())
        .bind(booking.recipient.country.as_str())
        .bind(booking.board_size.as_str())
        .bind(booking.weight_lb)
        .bind(booking.order_reference.as_deref())
        .bind(booking.service.as_str())
        .bind(booking.additional_info.as_deref())
        .bind(price)
        .fetch_one(&self.pool)
        .await?;

        row.into_booking()
    }

    async fn update_label(
        &self,
        id: BookingId,
        artifacts: &LabelArtifacts,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE booking
             SET easypost_shipment_id = $2, label_url = $3, tracking_url = $4,
                 tracking_code = $5, shipping_carrier = $6, shipping_service = $7,
                 shipping_rate = $8
             WHERE id = $1",
        )
        .bind(id)
        .bind(artifacts.shipment_id.as_str())
        .bind(artifacts.label_url.as_str())
        .bind(artifacts.tracking_url.as_str())
        .bind(artifacts.tracking_code.as_str())
        .bind(artifacts.carrier.as_str())
        .bind(artifacts.service.as_str())
        .bind(artifacts.carrier_rate)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("booking"));
        }

        Ok(())
    }

    async fn find(&self, id: BookingId, owner: AccountId) -> Result<Option<Booking>, StoreError> {
        let row = sqlx::query_as::<_, BookingRow>(
            "SELECT id, account_id, sender_name,
                    recipient_first_name, recipient_last_name, recipient_email,
                    recipient_phone, recipient_street, recipient_city, recipient_state,
                    recipient_zip, recipient_country,
                    board_size, weight, order_reference, service, additional_info,
                    customer_price,
                    easypost_shipment_id, label_url, tracking_url, tracking_code,
                    shipping_carrier, shipping_service, shipping_rate,
                    created_at
             FROM booking WHERE id = $1 AND account_id = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        row.map(BookingRow::into_booking).transpose()
    }

    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Booking>, StoreError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            "SELECT id, account_id, sender_name,
                    recipient_first_name, recipient_last_name, recipient_email,
                    recipient_phone, recipient_street, recipient_city, recipient_state,
                    recipient_zip, recipient_country,
                    board_size, weight, order_reference, service, additional_info,
                    customer_price,
                    easypost_shipment_id, label_url, tracking_url, tracking_code,
                    shipping_carrier, shipping_service, shipping_rate,
                    created_at
             FROM booking WHERE account_id = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BookingRow::into_booking).collect()
    }
}

// =============================================================================
// Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i32,
    email: String,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> Result<Account, StoreError> {
        let email = Email::parse(&self.email).map_err(|e| {
            StoreError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Account {
            id: AccountId::new(self.id),
            email,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AccountAuthRow {
    id: i32,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl AccountAuthRow {
    fn into_account_and_hash(self) -> Result<(Account, String), StoreError> {
        let account = AccountRow {
            id: self.id,
            email: self.email,
            created_at: self.created_at,
        }
        .into_account()?;

        Ok((account, self.password_hash))
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    business_name: String,
    street_address: String,
    city: String,
    state: String,
    zip_code: String,
    country: String,
}

impl ProfileRow {
    fn into_profile(self) -> SenderProfile {
        SenderProfile {
            business_name: self.business_name,
            street_address: self.street_address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            country: self.country,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i32,
    account_id: i32,
    sender_name: String,
    recipient_first_name: String,
    recipient_last_name: String,
    recipient_email: String,
    recipient_phone: String,
    recipient_street: String,
    recipient_city: String,
    recipient_state: String,
    recipient_zip: String,
    recipient_country: String,
    board_size: String,
    weight: Decimal,
    order_reference: Option<String>,
    service: String,
    additional_info: Option<String>,
    customer_price: i32,
    easypost_shipment_id: Option<String>,
    label_url: Option<String>,
    tracking_url: Option<String>,
    tracking_code: Option<String>,
    shipping_carrier: Option<String>,
    shipping_service: Option<String>,
    shipping_rate: Option<Decimal>,
    created_at: DateTime<Utc>,
}

impl BookingRow {
    fn into_booking(self) -> Result<Booking, StoreError> {
        let email = Email::parse(&self.recipient_email).map_err(|e| {
            StoreError::DataCorruption(format!("invalid recipient email in database: {e}"))
        })?;

        let customer_price = u32::try_from(self.customer_price)
            .map(Price::new)
            .map_err(|_| {
                StoreError::DataCorruption("negative customer price in database".to_owned())
            })?;

        let service = parse_service(&self.service)?;

        // A recorded shipment id marks the label as purchased; the other
        // label columns degrade to empty strings if absent.
        let label = match self.easypost_shipment_id {
            Some(shipment_id) => Some(LabelArtifacts {
                shipment_id,
                label_url: self.label_url.unwrap_or_default(),
                tracking_url: self.tracking_url.unwrap_or_default(),
                tracking_code: self.tracking_code.unwrap_or_default(),
                carrier: self.shipping_carrier.unwrap_or_default(),
                service: self.shipping_service.unwrap_or_default(),
                carrier_rate: self.shipping_rate.unwrap_or_default(),
            }),
            None => None,
        };

        Ok(Booking {
            id: BookingId::new(self.id),
            account_id: AccountId::new(self.account_id),
            sender_name: self.sender_name,
            recipient: Recipient {
                first_name: self.recipient_first_name,
                last_name: self.recipient_last_name,
                email,
                phone: self.recipient_phone,
                street: self.recipient_street,
                city: self.recipient_city,
                state: self.recipient_state,
                zip: self.recipient_zip,
                country: self.recipient_country,
            },
            board_size: BoardSize::from_input(&self.board_size),
            weight_lb: self.weight,
            order_reference: self.order_reference,
            service,
            additional_info: self.additional_info,
            customer_price,
            label,
            created_at: self.created_at,
        })
    }
}

fn parse_service(value: &str) -> Result<ServiceType, StoreError> {
    match value {
        "door-to-door" => Ok(ServiceType::DoorToDoor),
        other => Err(StoreError::DataCorruption(format!(
            "unknown service type in database: {other}"
        ))),
    }
}

/// Map a unique-constraint violation to a conflict error.
fn map_unique_violation(e: sqlx::Error, message: &str) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return StoreError::Conflict(message.to_owned());
    }
    StoreError::Database(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_service() {
        assert!(matches!(
            parse_service("door-to-door"),
            Ok(ServiceType::DoorToDoor)
        ));
        assert!(matches!(
            parse_service("carrier-pigeon"),
            Err(StoreError::DataCorruption(_))
        ));
    }
}
