//! Price quoting command.
//!
//! Runs the same pricing policy the booking form uses, so support staff can
//! answer "what would this cost" without touching the database or the
//! carrier API.

use boardshipper::pricing;
use boardshipper_core::BoardSize;

/// Quote the customer price for a board size and destination.
///
/// # Errors
///
/// Returns an error for an unknown board size. A policy rejection is a
/// normal outcome and is printed, not returned.
#[allow(clippy::print_stdout)]
pub fn run(board: &str, state: &str, country: &str) -> Result<(), Box<dyn std::error::Error>> {
    let board_size: BoardSize = board.parse()?;

    match pricing::evaluate(board_size, country, state) {
        Ok(price) => println!("{board_size} to {state}: {price}"),
        Err(reason) => println!("{board_size} to {state}: not bookable ({reason})"),
    }

    Ok(())
}
