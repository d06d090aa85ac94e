//! Customer-facing price representation.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A customer-facing price in whole US dollars.
///
/// Boardshipper quotes flat per-board prices; there are no cents and no
/// currency conversion. The carrier's own quoted rate is a separate decimal
/// value and never shown in place of this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u32);

impl Price {
    /// Create a price from whole dollars.
    #[must_use]
    pub const fn new(dollars: u32) -> Self {
        Self(dollars)
    }

    /// The price in whole dollars.
    #[must_use]
    pub const fn dollars(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl From<u32> for Price {
    fn from(dollars: u32) -> Self {
        Self(dollars)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Price::new(55).to_string(), "$55");
        assert_eq!(Price::new(195).to_string(), "$195");
    }

    #[test]
    fn test_ordering() {
        assert!(Price::new(55) < Price::new(75));
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Price::new(110)).unwrap();
        assert_eq!(json, "110");

        let parsed: Price = serde_json::from_str("110").unwrap();
        assert_eq!(parsed, Price::new(110));
    }
}
