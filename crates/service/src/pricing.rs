//! Eligibility and pricing policy.
//!
//! Pure functions over `(board size, destination country, destination
//! state)`. No I/O, no clock, no configuration: every price a customer sees
//! comes out of [`evaluate`] at submission time and is stored on the
//! booking, so later edits to this table never reprice an existing booking.
//!
//! # Rules
//!
//! Applied in order:
//!
//! 1. Only United States destinations are supported.
//! 2. The destination state must be on the serviced allow-list (the GSO
//!    coverage area): CA, OR, WA, NV, AZ, UT. Codes and full names are
//!    accepted, case-insensitively.
//! 3. Longboards additionally require a state on the longboard allow-list.
//! 4. The price comes from a three-tier table keyed by board size and
//!    region tier (California is the home region, the other five states
//!    are near-region).

use boardshipper_core::{BoardSize, Price};

/// The single country bookings may ship to.
const SUPPORTED_COUNTRY: &str = "united states";

/// Reasons a booking is rejected before anything is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RejectionReason {
    /// The destination country is outside the supported country.
    #[error("we currently only ship within the United States")]
    CountryNotSupported,
    /// The destination state is not on the serviced allow-list.
    #[error("we do not yet service this destination state")]
    DestinationNotServiced,
    /// The board size cannot ship to this destination.
    #[error("this board size is not available for this destination")]
    BoardSizeUnavailableForDestination,
}

/// A destination state we service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServicedState {
    California,
    Oregon,
    Washington,
    Nevada,
    Arizona,
    Utah,
}

impl ServicedState {
    /// All serviced states.
    pub const ALL: [Self; 6] = [
        Self::California,
        Self::Oregon,
        Self::Washington,
        Self::Nevada,
        Self::Arizona,
        Self::Utah,
    ];

    /// Match a raw state field against the allow-list.
    ///
    /// Accepts the two-letter code and the full name, case-insensitively
    /// and ignoring surrounding whitespace.
    #[must_use]
    pub fn from_input(state: &str) -> Option<Self> {
        match state.trim().to_ascii_uppercase().as_str() {
            "CA" | "CALIFORNIA" => Some(Self::California),
            "OR" | "OREGON" => Some(Self::Oregon),
            "WA" | "WASHINGTON" => Some(Self::Washington),
            "NV" | "NEVADA" => Some(Self::Nevada),
            "AZ" | "ARIZONA" => Some(Self::Arizona),
            "UT" | "UTAH" => Some(Self::Utah),
            _ => None,
        }
    }

    /// USPS two-letter code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::California => "CA",
            Self::Oregon => "OR",
            Self::Washington => "WA",
            Self::Nevada => "NV",
            Self::Arizona => "AZ",
            Self::Utah => "UT",
        }
    }

    /// Pricing tier for this state. California is the home region.
    #[must_use]
    pub const fn tier(self) -> RegionTier {
        match self {
            Self::California => RegionTier::Home,
            _ => RegionTier::Near,
        }
    }
}

/// Pricing tier for a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionTier {
    /// The home state (California).
    Home,
    /// The five remaining serviced states.
    Near,
    /// Anywhere else. Unreachable through [`evaluate`] while the serviced
    /// allow-list gates rule 2; the table still defines it.
    Other,
}

/// Destinations that can take a longboard.
///
/// Currently identical to the serviced list; kept separate so the two can
/// diverge without touching the rule order.
const LONGBOARD_STATES: [ServicedState; 6] = ServicedState::ALL;

/// Evaluate a booking's destination and board size, returning the
/// customer-facing price.
///
/// Rules are applied in order: country, destination state, longboard
/// destination restriction, then the price table. The first rule that
/// fails names the rejection; nothing is persisted for a rejected booking.
///
/// # Errors
///
/// - [`RejectionReason::CountryNotSupported`] for any non-US destination,
///   even when the state would otherwise be valid.
/// - [`RejectionReason::DestinationNotServiced`] for states off the
///   allow-list, regardless of board size.
/// - [`RejectionReason::BoardSizeUnavailableForDestination`] for longboards
///   bound outside the longboard list.
pub fn evaluate(
    board_size: BoardSize,
    recipient_country: &str,
    recipient_state: &str,
) -> Result<Price, RejectionReason> {
    if !recipient_country
        .trim()
        .eq_ignore_ascii_case(SUPPORTED_COUNTRY)
    {
        return Err(RejectionReason::CountryNotSupported);
    }

    let state = ServicedState::from_input(recipient_state)
        .ok_or(RejectionReason::DestinationNotServiced)?;

    if board_size == BoardSize::Longboard && !LONGBOARD_STATES.contains(&state) {
        return Err(RejectionReason::BoardSizeUnavailableForDestination);
    }

    tier_price(board_size, state.tier())
}

/// Price for a board size at a region tier.
///
/// Total over both axes so callers holding a tier (rather than a raw state)
/// get a defined answer; longboards have no "other" tier and report
/// [`RejectionReason::BoardSizeUnavailableForDestination`] there.
///
/// # Errors
///
/// Returns `BoardSizeUnavailableForDestination` for longboard at
/// [`RegionTier::Other`]; every other combination has a price.
pub const fn tier_price(
    board_size: BoardSize,
    tier: RegionTier,
) -> Result<Price, RejectionReason> {
    let dollars = match (board_size, tier) {
        (BoardSize::Shortboard, RegionTier::Home) => 55,
        (BoardSize::Shortboard, RegionTier::Near) => 75,
        (BoardSize::Shortboard, RegionTier::Other) => 95,
        (BoardSize::Midlength, RegionTier::Home) => 95,
        (BoardSize::Midlength, RegionTier::Near) => 110,
        (BoardSize::Midlength, RegionTier::Other) => 195,
        (BoardSize::Longboard, RegionTier::Home) => 155,
        (BoardSize::Longboard, RegionTier::Near) => 175,
        (BoardSize::Longboard, RegionTier::Other) => {
            return Err(RejectionReason::BoardSizeUnavailableForDestination);
        }
    };
    Ok(Price::new(dollars))
}
