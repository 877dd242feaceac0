//! League configuration.
//!
//! Typed, serde-backed description of a season: dates, venues and their
//! reservations, per-day-type time lists, hard rules, soft guidelines and
//! search tuning. Loaded from TOML.
//!
//! # Example
//!
//! ```
//! use u_league::config::LeagueConfig;
//!
//! let config = LeagueConfig::from_toml_str(r#"
//!     [season]
//!     start_date = "2026-04-25"
//!     end_date = "2026-05-31"
//!
//!     [[divisions]]
//!     name = "American"
//!     teams = ["Angels", "Astros"]
//!
//!     [[venues]]
//!     name = "Symonds Field"
//!
//!     [time_slots]
//!     weekday = ["17:45"]
//!     saturday = ["12:30", "14:45"]
//!     sunday = ["17:00"]
//! "#).unwrap();
//!
//! assert_eq!(config.teams(), vec!["Angels", "Astros"]);
//! assert_eq!(config.rules.max_games_per_timeslot, 2);
//! assert_eq!(config.search.attempts, 50);
//! ```

use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::models::slot::hhmm;
use crate::validation::validate_config;

/// Complete season configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueConfig {
    pub season: Season,
    pub divisions: Vec<Division>,
    pub venues: Vec<Venue>,
    pub time_slots: TimeSlots,
    #[serde(default)]
    pub rules: Rules,
    #[serde(default)]
    pub guidelines: Guidelines,
    #[serde(default)]
    pub search: SearchSettings,
}

/// Season window and whole-day blackouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Last day of the optional overflow window (starts the day after `end_date`).
    #[serde(default)]
    pub overflow_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub blackout_dates: Vec<BlackoutDate>,
}

/// A date on which no venue is usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlackoutDate {
    pub date: NaiveDate,
    #[serde(default)]
    pub reason: String,
}

/// A named group of teams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Division {
    pub name: String,
    pub teams: Vec<String>,
}

/// A playing venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

/// A venue reservation.
///
/// Either `date` or the `start_date`/`end_date` pair is set. Empty `times`
/// reserves the whole day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default, with = "hhmm::list")]
    pub times: Vec<NaiveTime>,
    #[serde(default)]
    pub reason: String,
}

/// Time-of-day lists per day type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlots {
    #[serde(with = "hhmm::list")]
    pub weekday: Vec<NaiveTime>,
    #[serde(with = "hhmm::list")]
    pub saturday: Vec<NaiveTime>,
    #[serde(with = "hhmm::list")]
    pub sunday: Vec<NaiveTime>,
    /// Dates that use the Sunday list regardless of weekday.
    #[serde(default)]
    pub holiday_dates: Vec<NaiveDate>,
}

/// Hard rules. Never violated by an accepted schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub max_games_per_day_per_team: u32,
    pub max_consecutive_days: u32,
    pub max_games_per_week: u32,
    pub max_games_per_timeslot: u32,
    /// Forbid any team playing 3 games within 4 days.
    pub max_3_in_4_days: bool,
}

/// Soft guidelines. Violations are reported, not rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Guidelines {
    /// Penalize (but allow) 3 games in 4 days.
    pub avoid_3_in_4_days: bool,
    pub min_days_between_same_matchup: u32,
    pub balance_sunday_games: bool,
    pub balance_pace: bool,
}

/// Search tuning for the assignment engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Independent restart attempts.
    pub attempts: u32,
    /// Attempt `i` is seeded with `base_seed + i`.
    pub base_seed: u64,
    /// Maximum eviction chain length in phase 3.
    pub max_displacement_depth: u32,
    /// Node budget for one Saturday's perfect-matching search.
    pub matching_node_budget: u64,
    /// Eviction budget for placing one matchup by displacement.
    pub displacement_node_budget: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_games_per_day_per_team: 1,
            max_consecutive_days: 2,
            max_games_per_week: 3,
            max_games_per_timeslot: 2,
            max_3_in_4_days: false,
        }
    }
}

impl Default for Guidelines {
    fn default() -> Self {
        Self {
            avoid_3_in_4_days: false,
            min_days_between_same_matchup: 14,
            balance_sunday_games: true,
            balance_pace: true,
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            attempts: 50,
            base_seed: 42,
            max_displacement_depth: 3,
            matching_node_budget: 100_000,
            displacement_node_budget: 20_000,
        }
    }
}

impl Reservation {
    /// All dates covered by this reservation.
    ///
    /// A range wins over a single date; a half-specified range covers nothing.
    pub fn dates(&self) -> Vec<NaiveDate> {
        match (self.start_date, self.end_date, self.date) {
            (Some(start), Some(end), _) => start
                .iter_days()
                .take_while(|d| *d <= end)
                .collect(),
            (None, None, Some(date)) => vec![date],
            _ => Vec::new(),
        }
    }

    /// Whether the whole day is reserved.
    #[inline]
    pub fn is_full_day(&self) -> bool {
        self.times.is_empty()
    }
}

impl Season {
    /// Inclusive bounds of the overflow window, if configured.
    pub fn overflow_window(&self) -> Option<(NaiveDate, NaiveDate)> {
        let end = self.overflow_end_date?;
        let start = self.end_date.checked_add_days(Days::new(1))?;
        Some((start, end))
    }

    /// Last date any slot can fall on.
    pub fn effective_end(&self) -> NaiveDate {
        self.overflow_end_date.unwrap_or(self.end_date)
    }
}

impl LeagueConfig {
    /// Loads and validates a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LeagueConfig = toml::from_str(content)?;
        validate_config(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// All teams across divisions, in declaration order.
    pub fn teams(&self) -> Vec<String> {
        self.divisions
            .iter()
            .flat_map(|d| d.teams.iter().cloned())
            .collect()
    }
}
