//! Assignment checker.
//!
//! Re-applies every rule to an arbitrary list of assignments, for example
//! a schedule recovered from a hand-edited file, and reports typed
//! [`Violation`]s. Hard errors come first, then warnings.

use chrono::{Datelike, NaiveDate};

use super::{detect, RuleSet};
use crate::models::{Assignment, Severity, Violation, ViolationType};

/// Checks `assignments` against `rule_set`.
///
/// `teams` is the full league; teams with no games are reported.
/// Games dated after `season_end` count as overflow usage.
pub fn check_assignments(
    rule_set: &RuleSet,
    teams: &[String],
    assignments: &[Assignment],
    season_end: NaiveDate,
) -> Vec<Violation> {
    let rules = &rule_set.rules;
    let guidelines = &rule_set.guidelines;
    let mut out = Vec::new();

    for b in detect::double_bookings(assignments) {
        out.push(Violation::new(
            ViolationType::DoubleBooked,
            b.slot.to_string(),
            format!(
                "{} games at {} {} on {}",
                b.games,
                detect::short_date(b.slot.date),
                b.slot.time.format("%H:%M"),
                b.slot.venue
            ),
        ));
    }

    for o in detect::daily_overloads(teams, assignments, rules.max_games_per_day_per_team) {
        out.push(Violation::new(
            ViolationType::DailyLimit,
            o.team.clone(),
            format!(
                "{} plays {} games on {} (max {})",
                o.team,
                o.games,
                detect::short_date(o.date),
                rules.max_games_per_day_per_team
            ),
        ));
    }

    for run in detect::long_runs(teams, assignments, rules.max_consecutive_days) {
        out.push(Violation::new(
            ViolationType::ConsecutiveDays,
            run.team.clone(),
            format!(
                "{} plays {} consecutive days ending {}",
                run.team,
                run.days,
                detect::short_date(run.last_day)
            ),
        ));
    }

    for o in detect::weekly_overloads(teams, assignments, rules.max_games_per_week) {
        out.push(Violation::new(
            ViolationType::WeeklyLimit,
            o.team.clone(),
            format!(
                "{} plays {} games in week {} (max {})",
                o.team,
                o.games,
                o.date.iso_week().week(),
                rules.max_games_per_week
            ),
        ));
    }

    for o in detect::timeslot_overloads(assignments, rules.max_games_per_timeslot) {
        let entity = format!("{} {}", detect::short_date(o.date), o.time.format("%H:%M"));
        out.push(Violation::new(
            ViolationType::TimeslotCapacity,
            entity.clone(),
            format!(
                "{} games at {} (max {})",
                o.games, entity, rules.max_games_per_timeslot
            ),
        ));
    }

    if rules.max_3_in_4_days || guidelines.avoid_3_in_4_days {
        for tif in detect::three_in_four(teams, assignments) {
            out.push(Violation::new(
                ViolationType::ThreeInFourDays,
                tif.team.clone(),
                tif.message(),
            ));
        }
    }

    let timelines = detect::team_timelines(teams, assignments);
    for (team, tl) in teams.iter().zip(&timelines) {
        if tl.is_empty() {
            out.push(Violation::new(
                ViolationType::MissingGames,
                team.clone(),
                format!("{team} has no games scheduled"),
            ));
        }
    }

    for r in detect::rematches(assignments, guidelines.min_days_between_same_matchup) {
        out.push(
            Violation::new(ViolationType::RematchTooSoon, r.pair.to_string(), r.message())
                .with_days(r.days),
        );
    }

    if guidelines.balance_sunday_games {
        if let Some(spread) = detect::sunday_spread(teams, assignments) {
            if spread.spread() > 1 {
                out.push(Violation::new(
                    ViolationType::SundayImbalance,
                    "league",
                    spread.message(),
                ));
            }
        }
    }

    if let Some(usage) = detect::overflow_usage(assignments, season_end) {
        out.push(Violation::new(
            ViolationType::OverflowUsage,
            "league",
            usage.message(),
        ));
    }

    let hard = rules.max_3_in_4_days;
    out.sort_by_key(|v| v.severity_with(hard) != Severity::Error);
    out
}
