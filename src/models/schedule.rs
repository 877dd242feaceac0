//! Schedule (solution) model.
//!
//! A schedule is a set of matchup-to-slot assignments together with the
//! warnings and per-team metrics derived from it. It may be partial when
//! the engine could not place every matchup.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Matchup, Slot};

/// The engine's output: assignments, warnings and per-team metrics.
///
/// Immutable once returned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Matchup-slot assignments, ordered by slot.
    pub assignments: Vec<Assignment>,
    /// Human-readable soft-constraint warnings.
    pub warnings: Vec<String>,
    /// Per-team metrics, in league team order.
    pub metrics: Vec<TeamMetrics>,
}

/// A matchup placed into a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub matchup: Matchup,
    pub slot: Slot,
}

/// Per-team counts and the violation messages that involve the team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMetrics {
    pub team: String,
    pub games: usize,
    pub saturday_games: usize,
    pub sunday_games: usize,
    pub violations: Vec<String>,
}

/// A rule violation found in a set of assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity (team, "A vs B" pair, or "MM/DD HH:MM" timeslot).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
    /// Gap in days for rematch violations.
    pub days: Option<i64>,
}

/// Classification of rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// Two assignments share a (date, time, venue).
    DoubleBooked,
    /// A team plays more games in one day than allowed.
    DailyLimit,
    /// A team plays on too many consecutive days.
    ConsecutiveDays,
    /// A team plays too many games in one ISO week.
    WeeklyLimit,
    /// Too many simultaneous games in one timeslot.
    TimeslotCapacity,
    /// A team plays 3 games within 4 days.
    ThreeInFourDays,
    /// A pair meets again sooner than the minimum spacing.
    RematchTooSoon,
    /// Sunday game counts differ too much across teams.
    SundayImbalance,
    /// Games were placed in the overflow window.
    OverflowUsage,
    /// A team has no games at all.
    MissingGames,
}

/// Hard errors invalidate a schedule; warnings are tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(matchup: Matchup, slot: Slot) -> Self {
        Self { matchup, slot }
    }

    /// Date of the assigned slot.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.slot.date
    }
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
            days: None,
        }
    }

    /// Attaches a gap in days.
    pub fn with_days(mut self, days: i64) -> Self {
        self.days = Some(days);
        self
    }

    /// Whether this is a hard error or a soft warning.
    ///
    /// 3-in-4 is a warning here; the checker reports it as an error
    /// through [`Violation::severity_with`] when the hard cap is enabled.
    pub fn severity(&self) -> Severity {
        self.severity_with(false)
    }

    /// Severity, treating 3-in-4 as hard when `three_in_four_is_hard`.
    pub fn severity_with(&self, three_in_four_is_hard: bool) -> Severity {
        match self.violation_type {
            ViolationType::DoubleBooked
            | ViolationType::DailyLimit
            | ViolationType::ConsecutiveDays
            | ViolationType::WeeklyLimit
            | ViolationType::TimeslotCapacity
            | ViolationType::MissingGames => Severity::Error,
            ViolationType::ThreeInFourDays if three_in_four_is_hard => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl ScheduleResult {
    /// Number of placed matchups.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Finds the assignment for a matchup label.
    pub fn assignment_for_label(&self, label: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.matchup.label == label)
    }

    /// All assignments involving a team, in slot order.
    pub fn assignments_for_team(&self, team: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.matchup.involves(team))
            .collect()
    }

    /// All assignments at a venue.
    pub fn assignments_for_venue(&self, venue: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.slot.venue == venue)
            .collect()
    }

    /// Metrics row for a team.
    pub fn metrics_for(&self, team: &str) -> Option<&TeamMetrics> {
        self.metrics.iter().find(|m| m.team == team)
    }
}
