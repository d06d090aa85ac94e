//! Boardshipper CLI - quoting and operations tools.
//!
//! # Usage
//!
//! ```bash
//! # Quote the customer price for a destination
//! bs-cli quote -b midlength -s CA
//!
//! # Fetch live carrier rates for a trial shipment (requires EASYPOST_API_KEY)
//! bs-cli rates -b shortboard -w 15 --to-city "New York" --to-state NY --to-zip 10001
//!
//! # List a business's bookings, newest first (requires DATABASE_URL)
//! bs-cli bookings -a 1
//! ```
//!
//! # Commands
//!
//! - `quote` - Run the pricing policy for a board size and destination
//! - `rates` - Create a trial EasyPost shipment and print its rate quotes
//! - `bookings` - List bookings for an account

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bs-cli")]
#[command(author, version, about = "Boardshipper CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote the customer price for a board size and destination
    Quote {
        /// Board size (shortboard, midlength, longboard)
        #[arg(short, long)]
        board: String,

        /// Destination state (two-letter code or full name)
        #[arg(short, long)]
        state: String,

        /// Destination country
        #[arg(short, long, default_value = "United States")]
        country: String,
    },
    /// Fetch live carrier rate quotes for a trial shipment
    Rates(commands::rates::RatesArgs),
    /// List bookings for an account, newest first
    Bookings {
        /// Account id
        #[arg(short, long)]
        account: i32,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Quote {
            board,
            state,
            country,
        } => commands::quote::run(&board, &state, &country)?,
        Commands::Rates(args) => commands::rates::run(&args).await?,
        Commands::Bookings { account } => commands::bookings::run(account).await?,
    }

    Ok(())
}
