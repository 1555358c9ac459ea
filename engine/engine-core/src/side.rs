//! The two sides of an alternating-move game.

use std::fmt;
use std::str::FromStr;

/// One of the two movers. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Black,
    White,
}

impl Side {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Lowercase name as used in agent arguments (`role=black`).
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Black => "black",
            Side::White => "white",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names neither side.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown side: {0}")]
pub struct ParseSideError(pub String);

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "black" => Ok(Side::Black),
            "white" => Ok(Side::White),
            other => Err(ParseSideError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(Side::White.opponent(), Side::Black);
        assert_eq!(Side::Black.opponent().opponent(), Side::Black);
    }

    #[test]
    fn test_parse_side() {
        assert_eq!("black".parse::<Side>(), Ok(Side::Black));
        assert_eq!("white".parse::<Side>(), Ok(Side::White));
        assert!("unknown".parse::<Side>().is_err());
        // Case sensitive, matching the role= argument convention
        assert!("Black".parse::<Side>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for side in [Side::Black, Side::White] {
            assert_eq!(side.to_string().parse::<Side>(), Ok(side));
        }
    }
}
