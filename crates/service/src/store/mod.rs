//! Persistence collaborators.
//!
//! The services never issue queries directly; they speak to the
//! [`AccountStore`] and [`BookingStore`] traits. [`PgStore`] backs both
//! with `PostgreSQL`; [`MemoryStore`] keeps everything in memory for tests
//! and local tooling. Per-row atomic read/update is assumed of any
//! implementation (ordinary transactional database semantics).

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use thiserror::Error;

use boardshipper_core::{AccountId, BookingId, Email, Price};

use crate::models::{Account, Booking, LabelArtifacts, NewBooking, SenderProfile};

/// Errors from a persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Unique constraint conflict (e.g. duplicate account email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The referenced row does not exist.
    #[error("not found: {0}")]
    NotFound(&'static str),

    /// A stored value could not be interpreted.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Account store collaborator.
pub trait AccountStore {
    /// Create an account with its password hash and sender profile.
    async fn create(
        &self,
        email: &Email,
        password_hash: &str,
        profile: SenderProfile,
    ) -> Result<Account, StoreError>;

    /// Look up an account and its stored password hash by email.
    async fn find_by_email(&self, email: &Email)
    -> Result<Option<(Account, String)>, StoreError>;

    /// Look up an account by id.
    async fn find(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Fetch the sender profile for an account.
    async fn sender_profile(&self, id: AccountId) -> Result<Option<SenderProfile>, StoreError>;
}

/// Booking store collaborator.
pub trait BookingStore {
    /// Persist a new booking with its customer price. Label fields start
    /// empty.
    async fn save(
        &self,
        account_id: AccountId,
        booking: NewBooking,
        price: Price,
    ) -> Result<Booking, StoreError>;

    /// Record label artifacts on an existing booking.
    async fn update_label(
        &self,
        id: BookingId,
        artifacts: &LabelArtifacts,
    ) -> Result<(), StoreError>;

    /// Fetch a booking by id, scoped to its owner.
    async fn find(&self, id: BookingId, owner: AccountId) -> Result<Option<Booking>, StoreError>;

    /// All bookings for an owner, newest first.
    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Booking>, StoreError>;
}
