//! Violation detectors over finished assignment lists.
//!
//! Each detector returns its findings in a deterministic order so that
//! warnings built from them are stable across runs.

use chrono::{Datelike, NaiveDate, NaiveTime};
use std::collections::{BTreeMap, BTreeSet};

use super::TeamTimeline;
use crate::models::{Assignment, PairKey, Slot};

/// Dates in warnings are rendered as `MM/DD`.
pub(crate) fn short_date(date: NaiveDate) -> String {
    date.format("%m/%d").to_string()
}

/// A team playing three games within four days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreeInFour {
    pub team: String,
    pub dates: [NaiveDate; 3],
}

/// A pair meeting again sooner than the minimum spacing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rematch {
    pub pair: PairKey,
    pub first: NaiveDate,
    pub second: NaiveDate,
    pub days: i64,
    pub min_days: u32,
}

/// Lowest and highest Sunday game counts across teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SundaySpread {
    pub min: usize,
    pub max: usize,
}

/// Games placed after the regular season ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverflowUsage {
    pub games: usize,
    pub days: usize,
    pub latest: NaiveDate,
}

/// A run of consecutive playing days longer than allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongRun {
    pub team: String,
    pub last_day: NaiveDate,
    pub days: u32,
}

/// A team with more games on one day, or in one ISO week, than allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamOverload {
    pub team: String,
    /// The day, or the Monday starting the ISO week.
    pub date: NaiveDate,
    pub games: usize,
}

/// A (date, time) with more simultaneous games than allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeslotOverload {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub games: usize,
}

/// A slot holding more than one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubleBooking {
    pub slot: Slot,
    pub games: usize,
}

impl ThreeInFour {
    pub fn message(&self) -> String {
        format!(
            "{} plays 3 games in 4 days: {}, {}, {}",
            self.team,
            short_date(self.dates[0]),
            short_date(self.dates[1]),
            short_date(self.dates[2])
        )
    }
}

impl Rematch {
    pub fn message(&self) -> String {
        format!(
            "{} rematch after only {} days (min {}): {} and {}",
            self.pair,
            self.days,
            self.min_days,
            short_date(self.first),
            short_date(self.second)
        )
    }

    /// Days short of the minimum spacing.
    pub fn shortfall(&self) -> i64 {
        i64::from(self.min_days) - self.days
    }
}

impl SundaySpread {
    #[inline]
    pub fn spread(&self) -> usize {
        self.max - self.min
    }

    pub fn message(&self) -> String {
        format!(
            "Sunday game imbalance: min {}, max {} across teams",
            self.min, self.max
        )
    }
}

impl OverflowUsage {
    pub fn message(&self) -> String {
        format!(
            "{} game(s) scheduled in overflow period across {} day(s), latest {}",
            self.games,
            self.days,
            short_date(self.latest)
        )
    }
}

/// Timelines of `teams`, in the same order. Teams not listed are ignored.
pub fn team_timelines(teams: &[String], assignments: &[Assignment]) -> Vec<TeamTimeline> {
    teams
        .iter()
        .map(|team| {
            TeamTimeline::from_dates(
                assignments
                    .iter()
                    .filter(|a| a.matchup.involves(team))
                    .map(Assignment::date),
            )
        })
        .collect()
}

/// 3-in-4 occurrences in team order, then date order.
pub fn three_in_four(teams: &[String], assignments: &[Assignment]) -> Vec<ThreeInFour> {
    teams
        .iter()
        .zip(team_timelines(teams, assignments))
        .flat_map(|(team, tl)| {
            tl.three_in_four()
                .into_iter()
                .map(|dates| ThreeInFour {
                    team: team.clone(),
                    dates,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Consecutive meetings of a pair closer than `min_days`, smallest gap first.
///
/// Returns nothing when `min_days` is zero.
pub fn rematches(assignments: &[Assignment], min_days: u32) -> Vec<Rematch> {
    if min_days == 0 {
        return Vec::new();
    }
    let mut by_pair: BTreeMap<PairKey, Vec<NaiveDate>> = BTreeMap::new();
    for a in assignments {
        by_pair.entry(a.matchup.pair()).or_default().push(a.date());
    }

    let mut found = Vec::new();
    for (pair, mut dates) in by_pair {
        dates.sort();
        for w in dates.windows(2) {
            let days = (w[1] - w[0]).num_days();
            if days < i64::from(min_days) {
                found.push(Rematch {
                    pair: pair.clone(),
                    first: w[0],
                    second: w[1],
                    days,
                    min_days,
                });
            }
        }
    }
    found.sort_by(|a, b| (a.days, &a.pair, a.first).cmp(&(b.days, &b.pair, b.first)));
    found
}

/// Sunday game counts of `teams`, in the same order.
pub fn sunday_counts(teams: &[String], assignments: &[Assignment]) -> Vec<usize> {
    team_timelines(teams, assignments)
        .iter()
        .map(TeamTimeline::sunday_games)
        .collect()
}

/// Min and max Sunday counts across `teams`; `None` for an empty league.
pub fn sunday_spread(teams: &[String], assignments: &[Assignment]) -> Option<SundaySpread> {
    let counts = sunday_counts(teams, assignments);
    let min = counts.iter().copied().min()?;
    let max = counts.iter().copied().max()?;
    Some(SundaySpread { min, max })
}

/// Games dated after `season_end`; `None` when there are none.
pub fn overflow_usage(assignments: &[Assignment], season_end: NaiveDate) -> Option<OverflowUsage> {
    let dates: Vec<NaiveDate> = assignments
        .iter()
        .map(Assignment::date)
        .filter(|d| *d > season_end)
        .collect();
    let latest = dates.iter().copied().max()?;
    let days = dates.iter().collect::<BTreeSet<_>>().len();
    Some(OverflowUsage {
        games: dates.len(),
        days,
        latest,
    })
}

/// Runs of consecutive playing days longer than `max_days`.
pub fn long_runs(teams: &[String], assignments: &[Assignment], max_days: u32) -> Vec<LongRun> {
    let mut found = Vec::new();
    for (team, tl) in teams.iter().zip(team_timelines(teams, assignments)) {
        for (start, len) in tl.consecutive_runs() {
            if len > max_days {
                found.push(LongRun {
                    team: team.clone(),
                    last_day: start + chrono::Days::new(u64::from(len - 1)),
                    days: len,
                });
            }
        }
    }
    found
}

/// Team-days with more than `cap` games.
pub fn daily_overloads(
    teams: &[String],
    assignments: &[Assignment],
    cap: u32,
) -> Vec<TeamOverload> {
    overloads(teams, assignments, cap, |d| d)
}

/// Team-weeks with more than `cap` games, keyed by the week's Monday.
pub fn weekly_overloads(
    teams: &[String],
    assignments: &[Assignment],
    cap: u32,
) -> Vec<TeamOverload> {
    overloads(teams, assignments, cap, |d| {
        d - chrono::Days::new(u64::from(d.weekday().num_days_from_monday()))
    })
}

fn overloads(
    teams: &[String],
    assignments: &[Assignment],
    cap: u32,
    bucket: impl Fn(NaiveDate) -> NaiveDate,
) -> Vec<TeamOverload> {
    let mut found = Vec::new();
    for (team, tl) in teams.iter().zip(team_timelines(teams, assignments)) {
        let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for &d in tl.dates() {
            *counts.entry(bucket(d)).or_default() += 1;
        }
        for (date, games) in counts {
            if games > cap as usize {
                found.push(TeamOverload {
                    team: team.clone(),
                    date,
                    games,
                });
            }
        }
    }
    found
}

/// (date, time) pairs holding more than `cap` games.
pub fn timeslot_overloads(assignments: &[Assignment], cap: u32) -> Vec<TimeslotOverload> {
    let mut counts: BTreeMap<(NaiveDate, NaiveTime), usize> = BTreeMap::new();
    for a in assignments {
        *counts.entry((a.slot.date, a.slot.time)).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, games)| *games > cap as usize)
        .map(|((date, time), games)| TimeslotOverload { date, time, games })
        .collect()
}

/// Slots holding more than one game.
pub fn double_bookings(assignments: &[Assignment]) -> Vec<DoubleBooking> {
    let mut counts: BTreeMap<&Slot, usize> = BTreeMap::new();
    for a in assignments {
        *counts.entry(&a.slot).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, games)| *games > 1)
        .map(|(slot, games)| DoubleBooking {
            slot: slot.clone(),
            games,
        })
        .collect()
}
