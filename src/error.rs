//! Error types.

use crate::models::{Matchup, ScheduleResult};
use crate::validation::ValidationError;

/// Failure to produce a complete schedule.
#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    #[error("no matchups to schedule")]
    NoMatchups,

    /// Some matchups could not be placed in any attempt. Carries the best
    /// partial schedule so callers can still render it.
    #[error(
        "could only schedule {} of {} games; first stuck: {}",
        .0.placed, .0.required, .0.first_stuck
    )]
    Incomplete(Box<IncompleteSchedule>),
}

/// Diagnostics for a schedule that could not place every matchup.
#[derive(Debug, Clone)]
pub struct IncompleteSchedule {
    /// Matchups placed in the best attempt.
    pub placed: usize,
    /// Matchups requested.
    pub required: usize,
    /// First matchup no strategy could place.
    pub first_stuck: Matchup,
    /// Every unplaced matchup, in the order the engine gave up on them.
    pub unplaced: Vec<Matchup>,
    /// Best partial result found.
    pub partial: ScheduleResult,
}

impl SchedulingError {
    /// The best partial schedule, if this error carries one.
    pub fn partial(&self) -> Option<&ScheduleResult> {
        match self {
            Self::Incomplete(inc) => Some(&inc.partial),
            _ => None,
        }
    }
}

/// Failure to load a league configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
