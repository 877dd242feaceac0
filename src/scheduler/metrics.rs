//! Schedule warnings and per-team metrics.
//!
//! Computed from a finished set of assignments, never from search state,
//! so recomputing on the same input gives the same counts and the same
//! warning order.
//!
//! # Warnings
//!
//! | Warning | Emitted |
//! |---------|---------|
//! | 3 games in 4 days | once per occurrence, in league team order |
//! | Rematch too soon | once per under-spaced pair, smallest gap first |
//! | Sunday imbalance | once, if the spread exceeds 1 |
//! | Overflow usage | once, summarizing games, days and the latest date |
//!
//! Per-team metrics carry the 3-in-4 and rematch warnings that name the team.

use chrono::NaiveDate;

use crate::models::{Assignment, ScheduleResult, TeamMetrics};
use crate::rules::{detect, RuleSet};

const MAX_SUNDAY_SPREAD: usize = 1;

/// Warnings and per-team metrics of one schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueMetrics {
    /// League-wide warning messages.
    pub warnings: Vec<String>,
    /// One row per team, in league order.
    pub teams: Vec<TeamMetrics>,
}

impl LeagueMetrics {
    /// Computes warnings and team metrics.
    ///
    /// # Arguments
    /// * `rule_set` - Supplies the minimum rematch spacing.
    /// * `teams` - League teams; each gets a row even with no games.
    /// * `assignments` - The schedule, in any order.
    /// * `season_end` - Games after this date count as overflow.
    pub fn calculate(
        rule_set: &RuleSet,
        teams: &[String],
        assignments: &[Assignment],
        season_end: NaiveDate,
    ) -> Self {
        let mut rows: Vec<TeamMetrics> = teams
            .iter()
            .map(|team| TeamMetrics {
                team: team.clone(),
                ..Default::default()
            })
            .collect();
        let index_of = |team: &str| teams.iter().position(|t| t == team);

        for a in assignments {
            for team in a.matchup.teams() {
                if let Some(i) = index_of(team) {
                    let row = &mut rows[i];
                    row.games += 1;
                    if a.slot.is_saturday() {
                        row.saturday_games += 1;
                    }
                    if a.slot.is_sunday() {
                        row.sunday_games += 1;
                    }
                }
            }
        }

        let mut warnings = Vec::new();

        for tif in detect::three_in_four(teams, assignments) {
            let message = tif.message();
            if let Some(i) = index_of(tif.team.as_str()) {
                rows[i].violations.push(message.clone());
            }
            warnings.push(message);
        }

        let min_days = rule_set.guidelines.min_days_between_same_matchup;
        for r in detect::rematches(assignments, min_days) {
            let message = r.message();
            for team in [r.pair.first.as_str(), r.pair.second.as_str()] {
                if let Some(i) = index_of(team) {
                    rows[i].violations.push(message.clone());
                }
            }
            warnings.push(message);
        }

        if let Some(spread) = detect::sunday_spread(teams, assignments) {
            if spread.spread() > MAX_SUNDAY_SPREAD {
                warnings.push(spread.message());
            }
        }

        if let Some(usage) = detect::overflow_usage(assignments, season_end) {
            warnings.push(usage.message());
        }

        Self {
            warnings,
            teams: rows,
        }
    }

    /// Wraps `assignments` with their warnings and metrics.
    pub fn into_result(self, assignments: Vec<Assignment>) -> ScheduleResult {
        ScheduleResult {
            assignments,
            warnings: self.warnings,
            metrics: self.teams,
        }
    }
}

/// Builds the full result for `assignments`.
pub fn build_result(
    rule_set: &RuleSet,
    teams: &[String],
    assignments: Vec<Assignment>,
    season_end: NaiveDate,
) -> ScheduleResult {
    LeagueMetrics::calculate(rule_set, teams, &assignments, season_end).into_result(assignments)
}
