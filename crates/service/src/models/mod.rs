//! Domain models.
//!
//! These types represent validated domain objects separate from database row
//! types and wire payloads.

pub mod account;
pub mod booking;

pub use account::{Account, SenderProfile};
pub use booking::{Booking, LabelArtifacts, NewBooking, Recipient, ServiceType};
