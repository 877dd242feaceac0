//! Matchup (game) model.
//!
//! A matchup is a required home/away pairing. Matchups come from an
//! external generator; the engine only places them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A required pairing to be scheduled exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Matchup {
    /// Home team.
    pub home: String,
    /// Away team.
    pub away: String,
    /// Season-wide unique identifier (e.g. "Game 17").
    pub label: String,
}

impl Matchup {
    /// Creates a matchup.
    pub fn new(home: impl Into<String>, away: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
            label: label.into(),
        }
    }

    /// Both teams, home first.
    #[inline]
    pub fn teams(&self) -> [&str; 2] {
        [&self.home, &self.away]
    }

    /// Whether `team` plays in this matchup.
    pub fn involves(&self, team: &str) -> bool {
        self.home == team || self.away == team
    }

    /// Order-independent key of the two teams.
    pub fn pair(&self) -> PairKey {
        PairKey::new(&self.home, &self.away)
    }
}

impl fmt::Display for Matchup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} @ {}", self.label, self.away, self.home)
    }
}

/// Unordered team pair, normalized so that `first <= second`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    pub first: String,
    pub second: String,
}

impl PairKey {
    /// Creates a normalized pair key.
    pub fn new(a: &str, b: &str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first: first.to_string(),
            second: second.to_string(),
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.first, self.second)
    }
}
