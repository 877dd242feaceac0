//! League scheduling domain models.
//!
//! Provides the core data types for representing a fixture problem
//! (slots, matchups, availability) and its solution (assignments,
//! warnings, per-team metrics, violations).
//!
//! # Domain Mappings
//!
//! | u-league | Generic scheduling |
//! |----------|--------------------|
//! | Matchup | Task |
//! | Team | Resource (two per task) |
//! | Slot | Time window on a venue |
//! | ScheduleResult | Schedule |

mod calendar;
mod matchup;
mod schedule;
pub mod slot;

pub use calendar::AvailabilityCalendar;
pub use matchup::{Matchup, PairKey};
pub use schedule::{Assignment, ScheduleResult, Severity, TeamMetrics, Violation, ViolationType};
pub use slot::{BlackoutSlot, DayType, Slot};
