//! Bracket boundary resolver.
//!
//! A bracket is the coarse quality tier the user picks before any pairwise
//! comparisons happen ("Good" / "Ok" / "Bad"). Each tier owns a fixed
//! sub-range of the 0.0–10.0 rating scale; the comparison loop only refines
//! a rating *within* the chosen tier, never across it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Coarse quality tier constraining a concert's final numeric rating.
///
/// The three tiers partition [0, 10] with no gaps and no overlaps:
///
/// | Bracket | Min | Max  |
/// |---------|-----|------|
/// | Good    | 7.0 | 10.0 |
/// | Ok      | 5.0 | 6.9  |
/// | Bad     | 0.0 | 4.9  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bracket {
    Good,
    Ok,
    Bad,
}

impl Bracket {
    /// All brackets, highest range first.
    pub const ALL: [Bracket; 3] = [Bracket::Good, Bracket::Ok, Bracket::Bad];

    /// Map a rating to the bracket that owns it.
    ///
    /// Total over [0, 10]; values outside that range still resolve (anything
    /// above 7.0 is `Good`, anything below 5.0 is `Bad`) so a single
    /// out-of-contract input cannot panic downstream.
    pub fn for_rating(rating: f64) -> Bracket {
        if rating >= 7.0 {
            Bracket::Good
        } else if rating >= 5.0 {
            Bracket::Ok
        } else {
            Bracket::Bad
        }
    }

    /// Inclusive numeric bounds of this bracket, used for clamping.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Bracket::Good => (7.0, 10.0),
            Bracket::Ok => (5.0, 6.9),
            Bracket::Bad => (0.0, 4.9),
        }
    }

    /// Midpoint of the bracket range — the rating assigned when there is
    /// nothing to compare the new concert against.
    pub fn midpoint(self) -> f64 {
        let (min, max) = self.bounds();
        (min + max) / 2.0
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Bracket::Good => "good",
            Bracket::Ok => "ok",
            Bracket::Bad => "bad",
        };
        f.pad(s)
    }
}

impl FromStr for Bracket {
    type Err = ParseBracketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "good" => Ok(Bracket::Good),
            "ok" => Ok(Bracket::Ok),
            "bad" => Ok(Bracket::Bad),
            other => Err(ParseBracketError(other.to_string())),
        }
    }
}

/// Error for an unrecognized bracket name.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown bracket '{0}' (expected good, ok, or bad)")]
pub struct ParseBracketError(String);

// =============================================================================
// TESTS
// =============================================================================
