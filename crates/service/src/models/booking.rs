//! Booking domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use boardshipper_core::{AccountId, BoardSize, BookingId, Email, Price};

/// Shipment service level.
///
/// The booking form offers door-to-door only; the variant list exists so a
/// second service level can be added without a schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    #[default]
    DoorToDoor,
}

impl ServiceType {
    /// The wire/form value for this service level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DoorToDoor => "door-to-door",
        }
    }
}

/// Recipient contact details and destination address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl Recipient {
    /// Full name as printed on the shipping label.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A booking as submitted, before pricing and persistence.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// Business name, pre-filled from the sender profile.
    pub sender_name: String,
    pub recipient: Recipient,
    pub board_size: BoardSize,
    /// Package weight in pounds. Must be positive.
    pub weight_lb: Decimal,
    pub order_reference: Option<String>,
    pub service: ServiceType,
    pub additional_info: Option<String>,
}

/// Label and tracking artifacts from a successful rate purchase.
///
/// Optional fields the carrier omits arrive as empty strings rather than
/// failing the extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelArtifacts {
    /// Carrier-side shipment id.
    pub shipment_id: String,
    pub label_url: String,
    pub tracking_url: String,
    pub tracking_code: String,
    /// Carrier that quoted the purchased rate.
    pub carrier: String,
    /// Carrier service name (e.g. overnight tier).
    pub service: String,
    /// Rate actually charged by the carrier, in USD.
    pub carrier_rate: Decimal,
}

/// A persisted shipment booking.
///
/// The customer price is fixed at submission time from the pricing policy
/// and never recomputed, even if the policy table changes later. Label
/// fields stay empty until the acquisition workflow completes; a failed
/// workflow leaves the booking saved and unlabeled.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: BookingId,
    /// Owning business account.
    pub account_id: AccountId,
    pub sender_name: String,
    pub recipient: Recipient,
    pub board_size: BoardSize,
    pub weight_lb: Decimal,
    pub order_reference: Option<String>,
    pub service: ServiceType,
    pub additional_info: Option<String>,
    /// Customer-facing price fixed at submission time.
    pub customer_price: Price,
    /// Populated by a second store update once a label is purchased.
    pub label: Option<LabelArtifacts>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Whether a carrier label has been purchased for this booking.
    #[must_use]
    pub const fn has_label(&self) -> bool {
        self.label.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_wire_value() {
        assert_eq!(ServiceType::DoorToDoor.as_str(), "door-to-door");
        let json = serde_json::to_string(&ServiceType::DoorToDoor).unwrap();
        assert_eq!(json, "\"door-to-door\"");
    }

    #[test]
    fn test_recipient_full_name() {
        let recipient = Recipient {
            first_name: "Kai".to_owned(),
            last_name: "Moana".to_owned(),
            email: Email::parse("kai@example.com").unwrap(),
            phone: "(555) 123-4567".to_owned(),
            street: "1 Ocean Ave".to_owned(),
            city: "Encinitas".to_owned(),
            state: "CA".to_owned(),
            zip: "92024".to_owned(),
            country: "United States".to_owned(),
        };
        assert_eq!(recipient.full_name(), "Kai Moana");
    }
}
