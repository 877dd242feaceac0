//! Input validation for league scheduling.
//!
//! Checks structural integrity of the configuration and the matchup list
//! before scheduling. Detects:
//! - Non-chronological season and reservation ranges
//! - Duplicate team, venue and matchup identifiers
//! - Malformed reservations (neither or both of a date and a range)
//! - Matchups that reference unknown teams or pit a team against itself
//! - Degenerate rule thresholds and empty time lists
//!
//! The engine assumes inputs have passed these checks.

use crate::config::LeagueConfig;
use crate::models::Matchup;
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A date range ends before it starts.
    NonChronologicalRange,
    /// Two entities share the same identifier.
    DuplicateId,
    /// No divisions configured.
    MissingDivisions,
    /// A division has no teams.
    EmptyDivision,
    /// No venues configured.
    MissingVenues,
    /// A reservation has neither a date nor a range, or has both.
    MalformedReservation,
    /// A rule threshold that would forbid every placement.
    InvalidThreshold,
    /// A day type has no times.
    EmptyTimeList,
    /// A matchup references a team that is not in any division.
    UnknownTeam,
    /// A matchup pits a team against itself.
    SelfMatchup,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a league configuration.
///
/// Checks:
/// 1. Season end after start; overflow end after season end
/// 2. At least one division, none empty, no team in two divisions
/// 3. At least one venue, no duplicate venue names
/// 4. Every reservation is either a single date or a complete, ordered range
/// 5. Positive per-day, weekly, consecutive-day and timeslot caps
/// 6. Every day-type time list is non-empty
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &LeagueConfig) -> ValidationResult {
    let mut errors = Vec::new();
    let season = &config.season;

    if season.end_date <= season.start_date {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonChronologicalRange,
            format!(
                "end date {} must be after start date {}",
                season.end_date, season.start_date
            ),
        ));
    }
    if let Some(overflow_end) = season.overflow_end_date {
        if overflow_end <= season.end_date {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonChronologicalRange,
                format!(
                    "overflow end date {} must be after end date {}",
                    overflow_end, season.end_date
                ),
            ));
        }
    }

    // Teams
    if config.divisions.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingDivisions,
            "at least one division is required",
        ));
    }
    let mut team_division: HashMap<&str, &str> = HashMap::new();
    for div in &config.divisions {
        if div.teams.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyDivision,
                format!("division {:?} has no teams", div.name),
            ));
        }
        for team in &div.teams {
            if let Some(prev) = team_division.insert(team, &div.name) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!(
                        "team {:?} appears in both {:?} and {:?} divisions",
                        team, prev, div.name
                    ),
                ));
            }
        }
    }

    // Venues and reservations
    if config.venues.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingVenues,
            "at least one venue is required",
        ));
    }
    let mut venue_names = HashSet::new();
    for venue in &config.venues {
        if !venue_names.insert(venue.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("duplicate venue name: {}", venue.name),
            ));
        }
        for r in &venue.reservations {
            let has_date = r.date.is_some();
            let has_range = r.start_date.is_some() || r.end_date.is_some();
            let message = if !has_date && !has_range {
                Some("reservation must have either 'date' or 'start_date'/'end_date'")
            } else if has_date && has_range {
                Some("reservation cannot have both 'date' and 'start_date'/'end_date'")
            } else if has_range && (r.start_date.is_none() || r.end_date.is_none()) {
                Some("reservation with a date range must have both 'start_date' and 'end_date'")
            } else {
                None
            };
            if let Some(message) = message {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MalformedReservation,
                    format!("venue {:?}: {message}", venue.name),
                ));
            }
            if let (Some(start), Some(end)) = (r.start_date, r.end_date) {
                if end < start {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::NonChronologicalRange,
                        format!(
                            "venue {:?}: reservation end_date must be on or after start_date",
                            venue.name
                        ),
                    ));
                }
            }
        }
    }

    // Thresholds
    let rules = &config.rules;
    for (name, value) in [
        ("max_games_per_day_per_team", rules.max_games_per_day_per_team),
        ("max_consecutive_days", rules.max_consecutive_days),
        ("max_games_per_week", rules.max_games_per_week),
        ("max_games_per_timeslot", rules.max_games_per_timeslot),
    ] {
        if value == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidThreshold,
                format!("{name} must be at least 1"),
            ));
        }
    }
    if config.search.attempts == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidThreshold,
            "search.attempts must be at least 1",
        ));
    }

    let ts = &config.time_slots;
    for (name, times) in [
        ("weekday", &ts.weekday),
        ("saturday", &ts.saturday),
        ("sunday", &ts.sunday),
    ] {
        if times.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyTimeList,
                format!("time_slots.{name} has no times"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a matchup list against the league's teams.
///
/// Checks:
/// 1. No duplicate labels
/// 2. Both teams of every matchup are known
/// 3. No team plays itself
pub fn validate_matchups(teams: &[String], matchups: &[Matchup]) -> ValidationResult {
    let mut errors = Vec::new();
    let known: HashSet<&str> = teams.iter().map(String::as_str).collect();
    let mut labels = HashSet::new();

    for m in matchups {
        if !labels.insert(m.label.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("duplicate matchup label: {}", m.label),
            ));
        }
        for team in m.teams() {
            if !known.contains(team) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownTeam,
                    format!("matchup {:?} references unknown team {:?}", m.label, team),
                ));
            }
        }
        if m.home == m.away {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelfMatchup,
                format!("matchup {:?} pits {:?} against itself", m.label, m.home),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        Division, Guidelines, Reservation, Rules, SearchSettings, Season, TimeSlots, Venue,
    };
    use chrono::{NaiveDate, NaiveTime};

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    fn sample_config() -> LeagueConfig {
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        LeagueConfig {
            season: Season {
                start_date: d(4, 25),
                end_date: d(5, 31),
                overflow_end_date: None,
                blackout_dates: Vec::new(),
            },
            divisions: vec![
                Division {
                    name: "American".into(),
                    teams: vec!["Angels".into(), "Astros".into()],
                },
                Division {
                    name: "National".into(),
                    teams: vec!["Cubs".into(), "Padres".into()],
                },
            ],
            venues: vec![Venue {
                name: "Symonds Field".into(),
                reservations: Vec::new(),
            }],
            time_slots: TimeSlots {
                weekday: vec![t(17, 45)],
                saturday: vec![t(12, 30)],
                sunday: vec![t(17, 0)],
                holiday_dates: Vec::new(),
            },
            rules: Rules::default(),
            guidelines: Guidelines::default(),
            search: SearchSettings::default(),
        }
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&sample_config()).is_ok());
    }

    #[test]
    fn test_end_before_start() {
        let mut cfg = sample_config();
        cfg.season.end_date = d(4, 1);
        assert!(kinds(validate_config(&cfg)).contains(&ValidationErrorKind::NonChronologicalRange));
    }

    #[test]
    fn test_overflow_must_follow_end() {
        let mut cfg = sample_config();
        cfg.season.overflow_end_date = Some(d(5, 31));
        assert!(kinds(validate_config(&cfg)).contains(&ValidationErrorKind::NonChronologicalRange));
    }

    #[test]
    fn test_duplicate_team_across_divisions() {
        let mut cfg = sample_config();
        cfg.divisions[1].teams.push("Angels".into());
        let errors = validate_config(&cfg).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("Angels")));
    }

    #[test]
    fn test_empty_division_and_no_venues() {
        let mut cfg = sample_config();
        cfg.divisions[0].teams.clear();
        cfg.venues.clear();
        let k = kinds(validate_config(&cfg));
        assert!(k.contains(&ValidationErrorKind::EmptyDivision));
        assert!(k.contains(&ValidationErrorKind::MissingVenues));
    }

    #[test]
    fn test_malformed_reservations() {
        let mut cfg = sample_config();
        cfg.venues[0].reservations = vec![
            Reservation::default(),
            Reservation {
                date: Some(d(5, 2)),
                start_date: Some(d(5, 3)),
                end_date: Some(d(5, 4)),
                ..Default::default()
            },
            Reservation {
                start_date: Some(d(5, 3)),
                ..Default::default()
            },
        ];
        let k = kinds(validate_config(&cfg));
        assert_eq!(
            k.iter()
                .filter(|k| **k == ValidationErrorKind::MalformedReservation)
                .count(),
            3
        );
    }

    #[test]
    fn test_reversed_reservation_range() {
        let mut cfg = sample_config();
        cfg.venues[0].reservations = vec![Reservation {
            start_date: Some(d(5, 20)),
            end_date: Some(d(5, 18)),
            ..Default::default()
        }];
        assert_eq!(
            kinds(validate_config(&cfg)),
            vec![ValidationErrorKind::NonChronologicalRange]
        );
    }

    #[test]
    fn test_zero_thresholds_and_empty_times() {
        let mut cfg = sample_config();
        cfg.rules.max_games_per_timeslot = 0;
        cfg.time_slots.sunday.clear();
        let k = kinds(validate_config(&cfg));
        assert!(k.contains(&ValidationErrorKind::InvalidThreshold));
        assert!(k.contains(&ValidationErrorKind::EmptyTimeList));
    }

    #[test]
    fn test_validate_matchups() {
        let teams = sample_config().teams();
        let ok = vec![
            Matchup::new("Angels", "Cubs", "Game 1"),
            Matchup::new("Cubs", "Angels", "Game 2"),
        ];
        assert!(validate_matchups(&teams, &ok).is_ok());

        let bad = vec![
            Matchup::new("Angels", "Cubs", "Game 1"),
            Matchup::new("Angels", "Mets", "Game 1"),
            Matchup::new("Padres", "Padres", "Game 3"),
        ];
        let k = kinds(validate_matchups(&teams, &bad));
        assert!(k.contains(&ValidationErrorKind::DuplicateId));
        assert!(k.contains(&ValidationErrorKind::UnknownTeam));
        assert!(k.contains(&ValidationErrorKind::SelfMatchup));
    }
}
