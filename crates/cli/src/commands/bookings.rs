//! Booking listing command.

use thiserror::Error;

use boardshipper::config::ShipperConfig;
use boardshipper::store::postgres::{self, PgStore};
use boardshipper::store::{BookingStore, StoreError};
use boardshipper_core::AccountId;

/// Errors that can occur while listing bookings.
#[derive(Debug, Error)]
pub enum BookingsError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Connect(#[from] sqlx::Error),

    /// Store failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] boardshipper::config::ConfigError),
}

/// List an account's bookings, newest first.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset or the database is
/// unreachable.
#[allow(clippy::print_stdout)]
pub async fn run(account: i32) -> Result<(), BookingsError> {
    let config = ShipperConfig::from_env()?;
    let database_url = config
        .database_url
        .as_ref()
        .ok_or(BookingsError::MissingEnvVar("DATABASE_URL"))?;

    let pool = postgres::create_pool(database_url).await?;
    let store = PgStore::new(pool);

    let bookings = store.list_by_owner(AccountId::new(account)).await?;

    if bookings.is_empty() {
        println!("no bookings for account {account}");
        return Ok(());
    }

    for booking in bookings {
        let label_state = booking
            .label
            .as_ref()
            .map_or("label pending", |_| "labeled");

        println!(
            "#{} {} {} -> {}, {} | {} {} | {} | {}",
            booking.id,
            booking.created_at.format("%Y-%m-%d"),
            booking.sender_name,
            booking.recipient.full_name(),
            booking.recipient.state,
            booking.board_size,
            booking.customer_price,
            booking.service.as_str(),
            label_state,
        );
    }

    Ok(())
}
