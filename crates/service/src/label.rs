//! Label acquisition workflow.
//!
//! Builds an EasyPost shipment from a persisted booking and the sender
//! profile, filters the returned quotes to the preferred carrier, buys the
//! cheapest of those, and extracts the label artifacts.
//!
//! The workflow is not idempotent: every invocation creates a fresh carrier
//! shipment and, if it gets that far, purchases a fresh label. Callers
//! guard by only invoking it for bookings with no label yet (see
//! [`crate::booking::BookingService`]). Once a purchase succeeds there is
//! no compensating action.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;
use tracing::instrument;

use boardshipper_core::BoardSize;

use crate::easypost::{
    Address, EasyPostClient, EasyPostError, Parcel, PurchasedShipment, Rate, ShipmentRequest,
};
use crate::models::{Booking, LabelArtifacts, SenderProfile};

/// The only carrier bookings are labeled with.
///
/// Quotes from other carriers are discarded even when cheaper; matching is
/// exact and case-sensitive against the carrier name EasyPost reports.
pub const PREFERRED_CARRIER: &str = "GSO";

/// Declared insurance value for every label, in USD.
pub const DECLARED_INSURANCE: &str = "500.00";

/// Home country code used when a country name is not in the lookup table.
const HOME_COUNTRY_CODE: &str = "US";

/// Errors from the label acquisition workflow.
///
/// Every variant is caught at the submission call site: a label failure
/// leaves the already-persisted booking saved and unlabeled.
#[derive(Debug, Error)]
pub enum LabelError {
    /// Transport failure or non-2xx response from the rate API.
    #[error(transparent)]
    Carrier(#[from] EasyPostError),

    /// The preferred carrier returned no quote for this shipment.
    ///
    /// A business-rule failure, not a transport one: other carriers may
    /// well have quoted.
    #[error("no {carrier} rate available for this shipment")]
    NoRateAvailable { carrier: &'static str },
}

/// Purchases shipping labels for persisted bookings.
#[derive(Clone)]
pub struct LabelService {
    client: EasyPostClient,
}

impl LabelService {
    /// Create a label service over an EasyPost client.
    #[must_use]
    pub const fn new(client: EasyPostClient) -> Self {
        Self { client }
    }

    /// Create a shipment, pick the cheapest preferred-carrier rate, and buy
    /// it.
    ///
    /// # Errors
    ///
    /// Returns `LabelError::Carrier` if either API call fails (transport or
    /// non-2xx) and `LabelError::NoRateAvailable` if no quote from
    /// [`PREFERRED_CARRIER`] comes back.
    #[instrument(skip_all, fields(booking_id = %booking.id, board_size = %booking.board_size))]
    pub async fn purchase_label(
        &self,
        sender: &SenderProfile,
        booking: &Booking,
    ) -> Result<LabelArtifacts, LabelError> {
        let request = build_shipment_request(sender, booking);

        let shipment = self.client.create_shipment(&request).await?;
        let rate = select_rate(&shipment.rates, PREFERRED_CARRIER)?;
        tracing::debug!(rate_id = %rate.id, rate = %rate.rate, service = %rate.service, "selected rate");

        let purchased = self
            .client
            .buy_shipment(&shipment.id, &rate.id, DECLARED_INSURANCE)
            .await?;

        Ok(extract_artifacts(purchased))
    }
}

/// Parcel dimensions in inches for each board size.
#[must_use]
pub const fn parcel_dimensions(board_size: BoardSize) -> (f64, f64, f64) {
    match board_size {
        BoardSize::Shortboard => (76.0, 22.0, 5.0),
        BoardSize::Midlength => (90.0, 23.0, 7.0),
        BoardSize::Longboard => (120.0, 24.0, 7.0),
    }
}

/// Convert a weight in pounds to ounces for the wire.
#[must_use]
pub fn weight_to_ounces(weight_lb: Decimal) -> f64 {
    (weight_lb * Decimal::from(16)).to_f64().unwrap_or(0.0)
}

/// Country names offered by the booking form, mapped to ISO 3166-1 alpha-2.
///
/// Unmapped names fall back to the home country code rather than erroring;
/// the pricing policy has already restricted bookable destinations.
const COUNTRY_CODES: &[(&str, &str)] = &[
    ("United States", "US"),
    ("Canada", "CA"),
    ("Mexico", "MX"),
    ("Australia", "AU"),
    ("New Zealand", "NZ"),
    ("United Kingdom", "GB"),
    ("France", "FR"),
    ("Spain", "ES"),
    ("Portugal", "PT"),
    ("Brazil", "BR"),
    ("Argentina", "AR"),
    ("Chile", "CL"),
    ("Peru", "PE"),
    ("Ecuador", "EC"),
    ("Costa Rica", "CR"),
    ("Panama", "PA"),
    ("Nicaragua", "NI"),
    ("El Salvador", "SV"),
    ("Guatemala", "GT"),
    ("Japan", "JP"),
    ("Indonesia", "ID"),
    ("Philippines", "PH"),
    ("Thailand", "TH"),
    ("Malaysia", "MY"),
    ("Singapore", "SG"),
    ("South Africa", "ZA"),
    ("Morocco", "MA"),
    ("Ireland", "IE"),
    ("Germany", "DE"),
    ("Italy", "IT"),
    ("Netherlands", "NL"),
    ("Belgium", "BE"),
    ("Switzerland", "CH"),
    ("Austria", "AT"),
    ("Norway", "NO"),
    ("Sweden", "SE"),
    ("Denmark", "DK"),
    ("Finland", "FI"),
];

/// Map a country name to its ISO 3166-1 alpha-2 code.
fn iso_country_code(name: &str) -> &'static str {
    let name = name.trim();
    COUNTRY_CODES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map_or(HOME_COUNTRY_CODE, |(_, code)| code)
}

/// Select the cheapest quote from the given carrier.
///
/// Ties keep the first quote the API listed; quotes from other carriers are
/// never considered.
fn select_rate<'a>(rates: &'a [Rate], carrier: &'static str) -> Result<&'a Rate, LabelError> {
    let mut best: Option<&Rate> = None;

    for rate in rates.iter().filter(|r| r.carrier == carrier) {
        match best {
            Some(current) if rate.rate >= current.rate => {}
            _ => best = Some(rate),
        }
    }

    best.ok_or(LabelError::NoRateAvailable { carrier })
}

/// Build the create-shipment payload from the sender profile and booking.
fn build_shipment_request(sender: &SenderProfile, booking: &Booking) -> ShipmentRequest {
    let (length, width, height) = parcel_dimensions(booking.board_size);

    ShipmentRequest {
        to_address: Address {
            name: booking.recipient.full_name(),
            street1: booking.recipient.street.clone(),
            city: booking.recipient.city.clone(),
            state: booking.recipient.state.clone(),
            zip: booking.recipient.zip.clone(),
            country: iso_country_code(&booking.recipient.country).to_owned(),
            phone: booking.recipient.phone.clone(),
            email: booking.recipient.email.to_string(),
        },
        from_address: Address {
            name: sender.business_name.clone(),
            street1: sender.street_address.clone(),
            city: sender.city.clone(),
            state: sender.state.clone(),
            zip: sender.zip_code.clone(),
            country: iso_country_code(&sender.country).to_owned(),
            phone: String::new(),
            email: String::new(),
        },
        parcel: Parcel {
            length,
            width,
            height,
            weight: weight_to_ounces(booking.weight_lb),
        },
    }
}

/// Pull label artifacts out of a purchased shipment.
///
/// Optional fields the carrier omitted are already empty strings by this
/// point (see [`crate::easypost`] response types).
fn extract_artifacts(purchased: PurchasedShipment) -> LabelArtifacts {
    LabelArtifacts {
        shipment_id: purchased.id,
        label_url: purchased.postage_label.label_url,
        tracking_url: purchased.tracker.public_url,
        tracking_code: purchased.tracking_code,
        carrier: purchased.selected_rate.carrier,
        service: purchased.selected_rate.service,
        carrier_rate: purchased.selected_rate.rate,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rate(id: &str, carrier: &str, rate: &str) -> Rate {
        Rate {
            id: id.to_owned(),
            carrier: carrier.to_owned(),
            service: "CPS".to_owned(),
            rate: rate.parse().unwrap(),
            delivery_days: None,
        }
    }

    #[test]
    fn test_select_rate_ignores_cheaper_other_carriers() {
        let rates = [
            rate("rate_x", "USPS", "10.00"),
            rate("rate_a", "GSO", "30.00"),
            rate("rate_b", "GSO", "25.00"),
        ];

        let selected = select_rate(&rates, "GSO").unwrap();
        assert_eq!(selected.id, "rate_b");
        assert_eq!(selected.rate, Decimal::new(2500, 2));
    }

    #[test]
    fn test_select_rate_no_preferred_carrier_quotes() {
        let rates = [rate("rate_x", "USPS", "10.00"), rate("rate_y", "FedEx", "12.00")];

        assert!(matches!(
            select_rate(&rates, "GSO"),
            Err(LabelError::NoRateAvailable { carrier: "GSO" })
        ));
    }

    #[test]
    fn test_select_rate_empty_quote_list() {
        assert!(matches!(
            select_rate(&[], "GSO"),
            Err(LabelError::NoRateAvailable { .. })
        ));
    }

    #[test]
    fn test_select_rate_tie_keeps_first_listed() {
        let rates = [
            rate("rate_first", "GSO", "25.00"),
            rate("rate_second", "GSO", "25.00"),
        ];

        assert_eq!(select_rate(&rates, "GSO").unwrap().id, "rate_first");
    }

    #[test]
    fn test_select_rate_carrier_match_is_case_sensitive() {
        let rates = [rate("rate_l", "gso", "5.00")];

        assert!(select_rate(&rates, "GSO").is_err());
    }

    #[test]
    fn test_weight_conversion_pounds_to_ounces() {
        assert!((weight_to_ounces(Decimal::from(10)) - 160.0).abs() < f64::EPSILON);
        assert!((weight_to_ounces(Decimal::new(125, 1)) - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parcel_dimensions_by_board_size() {
        assert_eq!(parcel_dimensions(BoardSize::Shortboard), (76.0, 22.0, 5.0));
        assert_eq!(parcel_dimensions(BoardSize::Midlength), (90.0, 23.0, 7.0));
        assert_eq!(parcel_dimensions(BoardSize::Longboard), (120.0, 24.0, 7.0));
    }

    #[test]
    fn test_unrecognized_board_input_packs_as_shortboard() {
        let board = BoardSize::from_input("gun");
        assert_eq!(parcel_dimensions(board), (76.0, 22.0, 5.0));
    }

    #[test]
    fn test_country_mapping() {
        assert_eq!(iso_country_code("United States"), "US");
        assert_eq!(iso_country_code("japan"), "JP");
        assert_eq!(iso_country_code(" New Zealand "), "NZ");
    }

    #[test]
    fn test_unmapped_country_defaults_to_home() {
        assert_eq!(iso_country_code("Atlantis"), "US");
        assert_eq!(iso_country_code(""), "US");
    }

    #[test]
    fn test_extract_artifacts_degrades_missing_fields() {
        let purchased: PurchasedShipment =
            serde_json::from_str(r#"{"id": "shp_1", "tracking_code": "GSO42"}"#).unwrap();

        let artifacts = extract_artifacts(purchased);
        assert_eq!(artifacts.shipment_id, "shp_1");
        assert_eq!(artifacts.tracking_code, "GSO42");
        assert_eq!(artifacts.label_url, "");
        assert_eq!(artifacts.tracking_url, "");
        assert_eq!(artifacts.carrier, "");
        assert_eq!(artifacts.carrier_rate, Decimal::ZERO);
    }
}
