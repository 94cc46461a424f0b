//! Station identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station {input:?}: {reason}")]
pub struct InvalidStation {
    input: String,
    reason: &'static str,
}

/// A station on the network, identified by a non-negative integer.
///
/// Stations are numbered so that every train travels from lower to higher
/// numbers. Journeys always start at [`Station::ORIGIN`].
///
/// # Examples
///
/// ```
/// use line_planner::domain::Station;
///
/// let s = Station::parse("42").unwrap();
/// assert_eq!(s.id(), 42);
/// assert_eq!(s.to_string(), "42");
///
/// assert!(Station::parse("-1").is_err());
/// assert!(Station::parse("x").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Station(u32);

impl Station {
    /// The station every journey starts from.
    pub const ORIGIN: Station = Station(0);

    /// Create a station from its numeric identifier.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Parse a station identifier from a decimal token.
    pub fn parse(s: &str) -> Result<Self, InvalidStation> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidStation {
                input: s.to_string(),
                reason: "must not be empty",
            });
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStation {
                input: s.to_string(),
                reason: "must be a non-negative integer",
            });
        }
        trimmed.parse::<u32>().map(Station).map_err(|_| InvalidStation {
            input: s.to_string(),
            reason: "out of range",
        })
    }

    /// Returns the numeric identifier.
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns true for the journey origin.
    pub fn is_origin(self) -> bool {
        self == Self::ORIGIN
    }
}

impl From<u32> for Station {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for Station {
    type Err = InvalidStation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        assert_eq!(Station::parse("0").unwrap(), Station::ORIGIN);
        assert_eq!(Station::parse("17").unwrap().id(), 17);
        assert_eq!(Station::parse(" 3 ").unwrap().id(), 3);
    }

    #[test]
    fn reject_invalid() {
        assert!(Station::parse("").is_err());
        assert!(Station::parse("-4").is_err());
        assert!(Station::parse("+4").is_err());
        assert!(Station::parse("1.5").is_err());
        assert!(Station::parse("abc").is_err());
        assert!(Station::parse("99999999999").is_err());
    }

    #[test]
    fn error_display() {
        let err = Station::parse("x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid station \"x\": must be a non-negative integer"
        );
    }

    #[test]
    fn ordering_follows_id() {
        assert!(Station::new(1) < Station::new(2));
        assert!(Station::ORIGIN.is_origin());
        assert!(!Station::new(5).is_origin());
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&Station::new(9)).unwrap();
        assert_eq!(json, "9");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Display then parse returns the same station
        #[test]
        fn roundtrip(id in any::<u32>()) {
            let s = Station::new(id);
            prop_assert_eq!(Station::parse(&s.to_string()).unwrap(), s);
        }

        /// Anything with a non-digit is rejected
        #[test]
        fn non_digits_rejected(s in "[0-9]{0,3}[a-z.-][0-9]{0,3}") {
            prop_assert!(Station::parse(&s).is_err());
        }
    }
}
