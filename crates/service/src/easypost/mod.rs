//! EasyPost rate-marketplace client.
//!
//! Two endpoints are consumed:
//!
//! - `POST /shipments` - create a shipment and collect rate quotes
//! - `POST /shipments/{id}/buy` - purchase one quoted rate
//!
//! Authentication is HTTP Basic with the API key as username and an empty
//! password. Any non-2xx response is a hard failure carrying the raw body
//! for diagnostics; no retries are attempted.

mod client;
mod types;

pub use client::EasyPostClient;
pub use types::{
    Address, CreatedShipment, Parcel, PostageLabel, PurchasedShipment, Rate, SelectedRate,
    ShipmentRequest, Tracker,
};

use thiserror::Error;

/// Errors that can occur when talking to the EasyPost API.
#[derive(Debug, Error)]
pub enum EasyPostError {
    /// Transport-level failure (connect, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-2xx response; body kept for diagnostics.
    #[error("EasyPost error: {status} - {body}")]
    Api { status: u16, body: String },

    /// API key could not be encoded into an Authorization header.
    #[error("invalid API key: {0}")]
    InvalidApiKey(String),
}
