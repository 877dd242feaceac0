//! Fixture assignment engine.
//!
//! Places every matchup into a (date, time, venue) slot under the league's
//! hard rules while keeping soft penalties low.
//!
//! # Algorithm
//!
//! A fixed number of independent restart attempts, each with its own seed
//! and shuffled matchup order, runs four phases on fresh state:
//!
//! 1. **Saturday coverage**: a perfect matching per Saturday so every team
//!    plays ([`matching`]).
//! 2. **Sunday balancing**: fill Sundays while keeping per-team Sunday
//!    counts close ([`phases`]).
//! 3. **Weekday fill**: most-constrained first, with bounded displacement
//!    of already placed games ([`displacement`]).
//! 4. **Overflow fallback**: first-fit into the post-season window.
//!
//! The best attempt wins (see [`attempt`]) and is turned into a
//! [`ScheduleResult`] with warnings and per-team metrics ([`metrics`]).
//!
//! # Reference
//! Kendall et al. (2010), "Scheduling in sports: An annotated bibliography",
//! Computers & Operations Research 37(1).

mod attempt;
mod displacement;
mod matching;
mod metrics;
mod phases;
mod problem;
mod state;
mod trail;

pub use metrics::{build_result, LeagueMetrics};

use chrono::NaiveDate;
use log::{info, warn};

use crate::availability::{generate_overflow_slots, generate_slots};
use crate::config::{LeagueConfig, SearchSettings};
use crate::error::{IncompleteSchedule, SchedulingError};
use crate::models::{Matchup, ScheduleResult, Slot};
use crate::rules::RuleSet;
use problem::Problem;

/// Input container for scheduling.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    /// League teams, in display order.
    pub teams: Vec<String>,
    /// Matchups to place, each exactly once.
    pub matchups: Vec<Matchup>,
    /// Regular-season slots.
    pub slots: Vec<Slot>,
    /// Post-season fallback slots, if the league allows overflow.
    pub overflow_slots: Option<Vec<Slot>>,
    pub season_start: NaiveDate,
    pub season_end: NaiveDate,
}

impl ScheduleRequest {
    /// Creates a request without an overflow window.
    pub fn new(
        teams: Vec<String>,
        matchups: Vec<Matchup>,
        slots: Vec<Slot>,
        season_start: NaiveDate,
        season_end: NaiveDate,
    ) -> Self {
        Self {
            teams,
            matchups,
            slots,
            overflow_slots: None,
            season_start,
            season_end,
        }
    }

    /// Sets overflow slots.
    pub fn with_overflow_slots(mut self, slots: Vec<Slot>) -> Self {
        self.overflow_slots = Some(slots);
        self
    }

    /// Builds a request from a configuration, generating its slots.
    pub fn from_config(config: &LeagueConfig, matchups: Vec<Matchup>) -> Self {
        Self {
            teams: config.teams(),
            matchups,
            slots: generate_slots(config),
            overflow_slots: generate_overflow_slots(config),
            season_start: config.season.start_date,
            season_end: config.season.end_date,
        }
    }
}

/// Multi-restart league scheduler.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use u_league::models::{Matchup, Slot};
/// use u_league::rules::RuleSet;
/// use u_league::scheduler::{ScheduleRequest, Scheduler};
///
/// let day = |d| NaiveDate::from_ymd_opt(2026, 5, d).unwrap();
/// let at = NaiveTime::from_hms_opt(17, 45, 0).unwrap();
/// let teams = vec!["Cubs".to_string(), "Royals".to_string()];
/// let matchups = vec![Matchup::new("Cubs", "Royals", "Game 1")];
/// let slots = vec![Slot::new(day(4), at, "North"), Slot::new(day(5), at, "North")];
/// let request = ScheduleRequest::new(teams, matchups, slots, day(4), day(5));
///
/// let result = Scheduler::new(RuleSet::default()).schedule(&request).unwrap();
/// assert_eq!(result.assignment_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    rule_set: RuleSet,
    settings: SearchSettings,
}

impl Scheduler {
    /// Creates a scheduler with default search settings.
    pub fn new(rule_set: RuleSet) -> Self {
        Self {
            rule_set,
            settings: SearchSettings::default(),
        }
    }

    /// Scheduler with the rules and search settings of a configuration.
    pub fn from_config(config: &LeagueConfig) -> Self {
        Self::new(RuleSet::from_config(config)).with_settings(config.search.clone())
    }

    /// Sets search settings.
    pub fn with_settings(mut self, settings: SearchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Schedules every matchup of `request`.
    ///
    /// # Errors
    /// * [`SchedulingError::NoMatchups`] for an empty matchup list.
    /// * [`SchedulingError::Incomplete`] when no attempt placed everything,
    ///   including when there are no slots at all; it carries the best
    ///   partial result.
    pub fn schedule(&self, request: &ScheduleRequest) -> Result<ScheduleResult, SchedulingError> {
        if request.matchups.is_empty() {
            return Err(SchedulingError::NoMatchups);
        }
        let overflow: &[Slot] = request.overflow_slots.as_deref().unwrap_or(&[]);

        let problem = Problem::new(
            &request.teams,
            &request.matchups,
            &request.slots,
            overflow,
            request.season_start,
            request.season_end,
        );
        info!(
            "scheduling {} matchups for {} teams into {} slots ({} overflow), {} attempts",
            problem.matchup_count(),
            problem.team_count(),
            request.slots.len(),
            overflow.len(),
            self.settings.attempts.max(1)
        );

        let settings = SearchSettings {
            attempts: self.settings.attempts.max(1),
            ..self.settings.clone()
        };
        let best = attempt::run_tournament(&problem, &self.rule_set, &settings);

        let placed = best.assignments.len();
        let result = build_result(
            &self.rule_set,
            &problem.teams,
            best.assignments,
            request.season_end,
        );

        match best.unplaced.first() {
            None => {
                info!(
                    "attempt {} placed all {} games with score {:.2}, {} warnings",
                    best.index,
                    placed,
                    best.score,
                    result.warnings.len()
                );
                Ok(result)
            }
            Some(&first) => {
                let unplaced: Vec<Matchup> = best
                    .unplaced
                    .iter()
                    .map(|&m| request.matchups[m].clone())
                    .collect();
                warn!(
                    "best attempt {} placed {} of {} games; first stuck: {}",
                    best.index,
                    placed,
                    request.matchups.len(),
                    request.matchups[first]
                );
                Err(SchedulingError::Incomplete(Box::new(IncompleteSchedule {
                    placed,
                    required: request.matchups.len(),
                    first_stuck: request.matchups[first].clone(),
                    unplaced,
                    partial: result,
                })))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use crate::rules::check_assignments;
    use chrono::{Datelike, Days, NaiveTime, Weekday};

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    fn round_robin(teams: &[String]) -> Vec<Matchup> {
        let mut matchups = Vec::new();
        for i in 0..teams.len() {
            for j in (i + 1)..teams.len() {
                let label = format!("Game {}", matchups.len() + 1);
                matchups.push(Matchup::new(&teams[i], &teams[j], label));
            }
        }
        matchups
    }

    fn season_slots(start: NaiveDate, end: NaiveDate, venues: &[&str]) -> Vec<Slot> {
        let mut slots = Vec::new();
        let mut date = start;
        while date <= end {
            let hours: &[u32] = match date.weekday() {
                Weekday::Sat => &[12, 15],
                _ => &[18],
            };
            for &h in hours {
                for v in venues {
                    slots.push(Slot::new(date, NaiveTime::from_hms_opt(h, 0, 0).unwrap(), *v));
                }
            }
            date = date + Days::new(1);
        }
        slots
    }

    fn six_teams() -> Vec<String> {
        ["A", "B", "C", "D", "E", "F"].iter().map(|s| s.to_string()).collect()
    }

    fn quick() -> SearchSettings {
        SearchSettings {
            attempts: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_inputs() {
        let scheduler = Scheduler::new(RuleSet::default());
        let request = ScheduleRequest::new(six_teams(), Vec::new(), Vec::new(), d(5, 1), d(5, 31));
        assert!(matches!(
            scheduler.schedule(&request),
            Err(SchedulingError::NoMatchups)
        ));

    }

    #[test]
    fn test_no_slots_reports_every_matchup() {
        let teams = six_teams();
        let matchups = round_robin(&teams);
        let request = ScheduleRequest::new(teams, matchups.clone(), Vec::new(), d(5, 1), d(5, 31));
        let err = Scheduler::new(RuleSet::default())
            .with_settings(quick())
            .schedule(&request)
            .unwrap_err();

        let SchedulingError::Incomplete(inc) = &err else {
            panic!("expected an incomplete schedule, got {err:?}");
        };
        assert_eq!(inc.placed, 0);
        assert_eq!(inc.required, 15);
        assert_eq!(inc.unplaced.len(), 15);
        assert_eq!(inc.first_stuck, inc.unplaced[0]);
        assert!(matchups.iter().all(|m| inc.unplaced.contains(m)));

        let partial = err.partial().unwrap();
        assert_eq!(partial.assignment_count(), 0);
        assert_eq!(partial.metrics.len(), 6);
    }

    #[test]
    fn test_round_robin_is_complete_and_clean() {
        let teams = six_teams();
        let slots = season_slots(d(4, 25), d(5, 31), &["North", "South"]);
        let request =
            ScheduleRequest::new(teams.clone(), round_robin(&teams), slots, d(4, 25), d(5, 31));
        let rules = RuleSet::default();
        let result = Scheduler::new(rules.clone())
            .with_settings(quick())
            .schedule(&request)
            .unwrap();

        assert_eq!(result.assignment_count(), 15);
        assert_eq!(result.metrics.len(), 6);
        assert!(result.metrics.iter().all(|m| m.games == 5));
        let violations = check_assignments(&rules, &teams, &result.assignments, d(5, 31));
        assert!(violations.iter().all(|v| v.severity() == Severity::Warning));
    }

    #[test]
    fn test_same_request_same_result() {
        let teams = six_teams();
        let slots = season_slots(d(4, 25), d(5, 20), &["North", "South"]);
        let request =
            ScheduleRequest::new(teams.clone(), round_robin(&teams), slots, d(4, 25), d(5, 20));
        let scheduler = Scheduler::new(RuleSet::default()).with_settings(quick());
        let a = scheduler.schedule(&request).unwrap();
        let b = scheduler.schedule(&request).unwrap();
        assert_eq!(a.assignments, b.assignments);
        assert_eq!(a.warnings, b.warnings);
    }

    #[test]
    fn test_incomplete_carries_partial() {
        let teams = six_teams();
        // Two weekday slots for fifteen games
        let slots = vec![
            Slot::new(d(5, 4), NaiveTime::from_hms_opt(18, 0, 0).unwrap(), "North"),
            Slot::new(d(5, 5), NaiveTime::from_hms_opt(18, 0, 0).unwrap(), "North"),
        ];
        let request =
            ScheduleRequest::new(teams.clone(), round_robin(&teams), slots, d(5, 4), d(5, 5));
        let err = Scheduler::new(RuleSet::default())
            .with_settings(quick())
            .schedule(&request)
            .unwrap_err();

        let SchedulingError::Incomplete(inc) = &err else {
            panic!("expected an incomplete schedule, got {err:?}");
        };
        assert_eq!(inc.required, 15);
        assert_eq!(inc.placed, 2);
        assert_eq!(inc.unplaced.len(), 13);
        assert_eq!(inc.first_stuck, inc.unplaced[0]);
        assert_eq!(err.partial().unwrap().assignment_count(), 2);
        assert!(err.to_string().starts_with("could only schedule 2 of 15 games"));
    }

    #[test]
    fn test_overflow_used_when_season_is_full() {
        let teams: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        let at = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
        // Mon/Wed/Fri in season, one venue: 3 of 6 games fit
        let slots = vec![
            Slot::new(d(5, 4), at, "North"),
            Slot::new(d(5, 6), at, "North"),
            Slot::new(d(5, 8), at, "North"),
        ];
        let overflow: Vec<Slot> = (0..6u64)
            .map(|i| Slot::new(d(6, 1) + Days::new(2 * i), at, "North"))
            .collect();
        let request =
            ScheduleRequest::new(teams.clone(), round_robin(&teams), slots, d(5, 4), d(5, 8))
                .with_overflow_slots(overflow);
        let result = Scheduler::new(RuleSet::default())
            .with_settings(quick())
            .schedule(&request)
            .unwrap();

        assert_eq!(result.assignment_count(), 6);
        let late = result.assignments.iter().filter(|a| a.date() > d(5, 8)).count();
        assert_eq!(late, 3);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.starts_with("3 game(s) scheduled in overflow period")));
    }
}
