//! League fixture scheduling.
//!
//! Turns a season configuration (dates, venues, blackouts, reservations,
//! league rules) and a list of required matchups into a dated, venue-bound
//! schedule, with warnings and per-team metrics.
//!
//! # Modules
//!
//! - **`config`**: `LeagueConfig` loaded from TOML, with defaults for rules,
//!   guidelines and search settings
//! - **`availability`**: Regular, overflow and blackout slot generation
//! - **`models`**: Domain types: `Slot`, `Matchup`, `Assignment`,
//!   `ScheduleResult`, `TeamMetrics`, `Violation`, `AvailabilityCalendar`
//! - **`rules`**: Hard-rule predicates, soft scoring, violation detectors and
//!   the assignment checker
//! - **`scheduler`**: Multi-restart, four-phase assignment engine and the
//!   metrics builder
//! - **`validation`**: Input integrity checks (dates, duplicates, unknown teams)
//! - **`error`**: `SchedulingError` and `ConfigError`
//!
//! # Example
//!
//! ```no_run
//! use u_league::config::LeagueConfig;
//! use u_league::models::Matchup;
//! use u_league::scheduler::{ScheduleRequest, Scheduler};
//!
//! let config = LeagueConfig::from_file("league.toml").unwrap();
//! let matchups = vec![Matchup::new("Cubs", "Royals", "Game 1")];
//! let request = ScheduleRequest::from_config(&config, matchups);
//! match Scheduler::from_config(&config).schedule(&request) {
//!     Ok(result) => println!("{} games placed", result.assignment_count()),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! # References
//!
//! - Kendall et al. (2010), "Scheduling in sports: An annotated bibliography"
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6

pub mod availability;
pub mod config;
pub mod error;
pub mod models;
pub mod rules;
pub mod scheduler;
pub mod validation;
