//! Live rate inspection command.
//!
//! Creates a trial EasyPost shipment and prints every quote sorted by
//! price, flagging the preferred carrier. Useful for checking margin
//! against the customer price table before changing it.

use clap::Args;
use rust_decimal::Decimal;

use boardshipper::config::ShipperConfig;
use boardshipper::easypost::{Address, EasyPostClient, Parcel, ShipmentRequest};
use boardshipper::label::{self, PREFERRED_CARRIER};
use boardshipper_core::BoardSize;

/// Arguments for the `rates` command.
#[derive(Debug, Args)]
pub struct RatesArgs {
    /// Board size (shortboard, midlength, longboard)
    #[arg(short, long)]
    pub board: String,

    /// Package weight in pounds
    #[arg(short, long)]
    pub weight: Decimal,

    /// Origin street address
    #[arg(long, default_value = "1234 Surf Street")]
    pub from_street: String,

    /// Origin city
    #[arg(long, default_value = "San Diego")]
    pub from_city: String,

    /// Origin state
    #[arg(long, default_value = "CA")]
    pub from_state: String,

    /// Origin zip
    #[arg(long, default_value = "92101")]
    pub from_zip: String,

    /// Destination street address
    #[arg(long, default_value = "5678 Broadway")]
    pub to_street: String,

    /// Destination city
    #[arg(long, default_value = "New York")]
    pub to_city: String,

    /// Destination state
    #[arg(long, default_value = "NY")]
    pub to_state: String,

    /// Destination zip
    #[arg(long, default_value = "10001")]
    pub to_zip: String,
}

/// Fetch and print rate quotes for a trial shipment.
///
/// # Errors
///
/// Returns an error for an unknown board size, missing `EASYPOST_API_KEY`,
/// or an API failure.
#[allow(clippy::print_stdout)]
pub async fn run(args: &RatesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let board_size: BoardSize = args.board.parse()?;
    let config = ShipperConfig::from_env()?;
    let client = EasyPostClient::new(&config)?;

    let (length, width, height) = label::parcel_dimensions(board_size);
    let request = ShipmentRequest {
        to_address: Address {
            name: "Rate Check Recipient".to_owned(),
            street1: args.to_street.clone(),
            city: args.to_city.clone(),
            state: args.to_state.clone(),
            zip: args.to_zip.clone(),
            country: "US".to_owned(),
            ..Address::default()
        },
        from_address: Address {
            name: "Rate Check Sender".to_owned(),
            street1: args.from_street.clone(),
            city: args.from_city.clone(),
            state: args.from_state.clone(),
            zip: args.from_zip.clone(),
            country: "US".to_owned(),
            ..Address::default()
        },
        parcel: Parcel {
            length,
            width,
            height,
            weight: label::weight_to_ounces(args.weight),
        },
    };

    let shipment = client.create_shipment(&request).await?;

    let mut rates = shipment.rates;
    rates.sort_by(|a, b| a.rate.cmp(&b.rate));

    println!(
        "{board_size} ({length}x{width}x{height} in, {} lb) {} -> {}",
        args.weight, args.from_state, args.to_state
    );

    if rates.is_empty() {
        println!("no rates returned");
        return Ok(());
    }

    for rate in &rates {
        let days = rate
            .delivery_days
            .map_or_else(|| "?".to_owned(), |d| d.to_string());
        let flag = if rate.carrier == PREFERRED_CARRIER {
            " <- preferred"
        } else {
            ""
        };
        println!(
            "{:10} | {:30} | ${:>8} | {days} days{flag}",
            rate.carrier, rate.service, rate.rate
        );
    }

    Ok(())
}
