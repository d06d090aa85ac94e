//! Board size classification.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Surfboard size class.
///
/// Drives both the parcel dimensions sent to the carrier and the
/// customer-facing price tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardSize {
    Shortboard,
    Midlength,
    Longboard,
}

impl BoardSize {
    /// All board sizes, in form-display order.
    pub const ALL: [Self; 3] = [Self::Shortboard, Self::Midlength, Self::Longboard];

    /// The wire/form value for this board size.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shortboard => "shortboard",
            Self::Midlength => "midlength",
            Self::Longboard => "longboard",
        }
    }

    /// Resolve raw input, falling back to shortboard.
    ///
    /// Unrecognized values price and pack as a shortboard rather than
    /// failing the booking. Use [`str::parse`] where bad input must be
    /// rejected instead.
    #[must_use]
    pub fn from_input(s: &str) -> Self {
        s.parse().unwrap_or(Self::Shortboard)
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known board size.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown board size: {0}")]
pub struct ParseBoardSizeError(String);

impl std::str::FromStr for BoardSize {
    type Err = ParseBoardSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shortboard" => Ok(Self::Shortboard),
            "midlength" => Ok(Self::Midlength),
            "longboard" => Ok(Self::Longboard),
            _ => Err(ParseBoardSizeError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("Shortboard".parse::<BoardSize>().unwrap(), BoardSize::Shortboard);
        assert_eq!(" LONGBOARD ".parse::<BoardSize>().unwrap(), BoardSize::Longboard);
        assert_eq!("midlength".parse::<BoardSize>().unwrap(), BoardSize::Midlength);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("funboard".parse::<BoardSize>().is_err());
        assert!("".parse::<BoardSize>().is_err());
    }

    #[test]
    fn test_from_input_falls_back_to_shortboard() {
        assert_eq!(BoardSize::from_input("funboard"), BoardSize::Shortboard);
        assert_eq!(BoardSize::from_input(""), BoardSize::Shortboard);
        assert_eq!(BoardSize::from_input("longboard"), BoardSize::Longboard);
    }

    #[test]
    fn test_serde_wire_values() {
        let json = serde_json::to_string(&BoardSize::Midlength).unwrap();
        assert_eq!(json, "\"midlength\"");

        let parsed: BoardSize = serde_json::from_str("\"longboard\"").unwrap();
        assert_eq!(parsed, BoardSize::Longboard);
    }

    #[test]
    fn test_display_matches_wire_value() {
        for size in BoardSize::ALL {
            assert_eq!(size.to_string(), size.as_str());
        }
    }
}
