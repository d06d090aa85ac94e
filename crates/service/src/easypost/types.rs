//! Request and response payloads for the EasyPost v2 API.
//!
//! Response types default every optional field so a sparse carrier response
//! degrades to empty values instead of failing deserialization.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Postal address as EasyPost expects it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Address {
    pub name: String,
    pub street1: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// ISO 3166-1 alpha-2 code.
    pub country: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
}

/// Parcel dimensions in inches and weight in ounces.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Parcel {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    /// Weight in ounces.
    pub weight: f64,
}

/// Body of `POST /shipments` (wrapped in a `shipment` object on the wire).
#[derive(Debug, Clone, Serialize)]
pub struct ShipmentRequest {
    pub to_address: Address,
    pub from_address: Address,
    pub parcel: Parcel,
}

/// One carrier/service/price quote on a created shipment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rate {
    pub id: String,
    pub carrier: String,
    pub service: String,
    /// Quoted price in USD; the API serializes it as a string.
    pub rate: Decimal,
    #[serde(default)]
    pub delivery_days: Option<i32>,
}

/// Response of `POST /shipments`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedShipment {
    pub id: String,
    #[serde(default)]
    pub rates: Vec<Rate>,
}

/// `postage_label` object on a purchased shipment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostageLabel {
    #[serde(default)]
    pub label_url: String,
}

/// `tracker` object on a purchased shipment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tracker {
    #[serde(default)]
    pub public_url: String,
}

/// `selected_rate` summary on a purchased shipment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectedRate {
    #[serde(default)]
    pub carrier: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub rate: Decimal,
}

/// Response of `POST /shipments/{id}/buy`.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchasedShipment {
    pub id: String,
    #[serde(default)]
    pub postage_label: PostageLabel,
    #[serde(default)]
    pub tracker: Tracker,
    #[serde(default)]
    pub tracking_code: String,
    #[serde(default)]
    pub selected_rate: SelectedRate,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_created_shipment() {
        let body = r#"{
            "id": "shp_123",
            "rates": [
                {"id": "rate_1", "carrier": "USPS", "service": "Priority", "rate": "12.40", "delivery_days": 2},
                {"id": "rate_2", "carrier": "GSO", "service": "CPS", "rate": "25.00", "delivery_days": null}
            ]
        }"#;

        let shipment: CreatedShipment = serde_json::from_str(body).unwrap();
        assert_eq!(shipment.id, "shp_123");
        assert_eq!(shipment.rates.len(), 2);
        assert_eq!(shipment.rates[1].carrier, "GSO");
        assert_eq!(shipment.rates[1].rate, Decimal::new(2500, 2));
        assert_eq!(shipment.rates[0].delivery_days, Some(2));
    }

    #[test]
    fn test_deserialize_created_shipment_without_rates() {
        let shipment: CreatedShipment = serde_json::from_str(r#"{"id": "shp_9"}"#).unwrap();
        assert!(shipment.rates.is_empty());
    }

    #[test]
    fn test_deserialize_purchased_shipment() {
        let body = r#"{
            "id": "shp_123",
            "postage_label": {"label_url": "https://labels.test/1.png"},
            "tracker": {"public_url": "https://track.test/1"},
            "tracking_code": "GSO123",
            "selected_rate": {"carrier": "GSO", "service": "CPS", "rate": "25.00"}
        }"#;

        let purchased: PurchasedShipment = serde_json::from_str(body).unwrap();
        assert_eq!(purchased.postage_label.label_url, "https://labels.test/1.png");
        assert_eq!(purchased.tracker.public_url, "https://track.test/1");
        assert_eq!(purchased.tracking_code, "GSO123");
        assert_eq!(purchased.selected_rate.rate, Decimal::new(2500, 2));
    }

    #[test]
    fn test_purchased_shipment_missing_fields_degrade_to_empty() {
        // A sparse buy response must never fail extraction.
        let purchased: PurchasedShipment = serde_json::from_str(r#"{"id": "shp_9"}"#).unwrap();
        assert_eq!(purchased.postage_label.label_url, "");
        assert_eq!(purchased.tracker.public_url, "");
        assert_eq!(purchased.tracking_code, "");
        assert_eq!(purchased.selected_rate.carrier, "");
    }

    #[test]
    fn test_address_skips_empty_contact_fields() {
        let address = Address {
            name: "Board Barn".to_owned(),
            street1: "1 Shaper Way".to_owned(),
            city: "Oceanside".to_owned(),
            state: "CA".to_owned(),
            zip: "92054".to_owned(),
            country: "US".to_owned(),
            phone: String::new(),
            email: String::new(),
        };

        let json = serde_json::to_value(&address).unwrap();
        assert!(json.get("phone").is_none());
        assert!(json.get("email").is_none());
    }
}
