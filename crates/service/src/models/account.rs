//! Account and sender profile domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use boardshipper_core::{AccountId, Email};

/// A registered shipping business (domain type).
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique account ID.
    pub id: AccountId,
    /// Login email address.
    pub email: Email,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// A business's shipping-origin address, one-to-one with an account.
///
/// Read-only input to the label workflow; the sender address on every
/// shipment comes from here, never from the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderProfile {
    pub business_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}
