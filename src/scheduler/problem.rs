//! Indexed, immutable view of a scheduling request.
//!
//! Teams, matchups, slots, timeslots and team pairs are numbered once so
//! that the search works on plain vectors instead of string-keyed maps.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::ops::Range;

use crate::models::{Matchup, Slot};

/// Precomputed facts about one slot.
#[derive(Debug, Clone)]
pub(crate) struct SlotInfo<'a> {
    pub slot: &'a Slot,
    /// Index of the slot's (date, time).
    pub timeslot: usize,
    /// Times on the same date that start later.
    pub later_times: usize,
    /// Days since season start.
    pub day_offset: i64,
    pub is_saturday: bool,
    pub is_sunday: bool,
    pub is_overflow: bool,
}

/// Indexed scheduling problem shared by every attempt.
#[derive(Debug, Clone)]
pub(crate) struct Problem<'a> {
    pub teams: Vec<String>,
    pub matchups: &'a [Matchup],
    /// Home and away team index of each matchup.
    pub matchup_teams: Vec<[usize; 2]>,
    /// Pair index of each matchup.
    pub matchup_pair: Vec<usize>,
    /// Matchups of each pair.
    pub pair_matchups: Vec<Vec<usize>>,
    /// Regular slots first, then overflow slots, each list in slot order.
    pub slots: Vec<SlotInfo<'a>>,
    /// Slots `0..regular_count` are regular-season slots.
    pub regular_count: usize,
    pub timeslot_count: usize,
    /// Regular Saturdays and their slot ranges.
    pub saturdays: Vec<(NaiveDate, Range<usize>)>,
    /// Regular Sundays and their slot ranges.
    pub sundays: Vec<(NaiveDate, Range<usize>)>,
    pub season_end: NaiveDate,
}

impl<'a> Problem<'a> {
    /// Indexes a request.
    ///
    /// `teams` fixes the league order; teams that only appear in matchups
    /// are appended in first-seen order.
    pub fn new(
        teams: &[String],
        matchups: &'a [Matchup],
        slots: &'a [Slot],
        overflow_slots: &'a [Slot],
        season_start: NaiveDate,
        season_end: NaiveDate,
    ) -> Self {
        let mut team_names: Vec<String> = Vec::with_capacity(teams.len());
        let mut team_index: HashMap<&str, usize> = HashMap::new();
        for name in teams.iter().map(String::as_str).chain(
            matchups
                .iter()
                .flat_map(|m| [m.home.as_str(), m.away.as_str()]),
        ) {
            if !team_index.contains_key(name) {
                team_index.insert(name, team_names.len());
                team_names.push(name.to_string());
            }
        }

        let mut pair_index: HashMap<(usize, usize), usize> = HashMap::new();
        let mut pair_matchups: Vec<Vec<usize>> = Vec::new();
        let mut matchup_teams = Vec::with_capacity(matchups.len());
        let mut matchup_pair = Vec::with_capacity(matchups.len());
        for (i, m) in matchups.iter().enumerate() {
            let h = team_index[m.home.as_str()];
            let a = team_index[m.away.as_str()];
            matchup_teams.push([h, a]);
            let key = (h.min(a), h.max(a));
            let next = pair_matchups.len();
            let p = *pair_index.entry(key).or_insert(next);
            if p == next {
                pair_matchups.push(Vec::new());
            }
            pair_matchups[p].push(i);
            matchup_pair.push(p);
        }

        let mut timeslot_index = HashMap::new();
        let mut times_by_date: HashMap<NaiveDate, Vec<chrono::NaiveTime>> = HashMap::new();
        for s in slots.iter().chain(overflow_slots) {
            let n = timeslot_index.len();
            timeslot_index.entry((s.date, s.time)).or_insert(n);
            let times = times_by_date.entry(s.date).or_default();
            if !times.contains(&s.time) {
                times.push(s.time);
            }
        }

        let infos: Vec<SlotInfo<'a>> = slots
            .iter()
            .map(|s| (s, false))
            .chain(overflow_slots.iter().map(|s| (s, true)))
            .map(|(s, is_overflow)| SlotInfo {
                slot: s,
                timeslot: timeslot_index[&(s.date, s.time)],
                later_times: times_by_date[&s.date]
                    .iter()
                    .filter(|t| **t > s.time)
                    .count(),
                day_offset: (s.date - season_start).num_days(),
                is_saturday: s.is_saturday(),
                is_sunday: s.is_sunday(),
                is_overflow,
            })
            .collect();

        let saturdays = day_ranges(&infos[..slots.len()], |i| i.is_saturday);
        let sundays = day_ranges(&infos[..slots.len()], |i| i.is_sunday);

        Self {
            teams: team_names,
            matchups,
            matchup_teams,
            matchup_pair,
            pair_matchups,
            regular_count: slots.len(),
            timeslot_count: timeslot_index.len(),
            slots: infos,
            saturdays,
            sundays,
            season_end,
        }
    }

    #[inline]
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    #[inline]
    pub fn matchup_count(&self) -> usize {
        self.matchups.len()
    }

    /// Regular-season slot indices.
    #[inline]
    pub fn regular_slots(&self) -> Range<usize> {
        0..self.regular_count
    }

    /// Overflow slot indices.
    #[inline]
    pub fn overflow_slots(&self) -> Range<usize> {
        self.regular_count..self.slots.len()
    }

    /// Regular Saturday dates.
    pub fn saturday_dates(&self) -> Vec<NaiveDate> {
        self.saturdays.iter().map(|(d, _)| *d).collect()
    }
}

/// Groups consecutive slots by date, keeping the dates matching `pred`.
fn day_ranges(
    infos: &[SlotInfo<'_>],
    pred: impl Fn(&SlotInfo<'_>) -> bool,
) -> Vec<(NaiveDate, Range<usize>)> {
    let mut out: Vec<(NaiveDate, Range<usize>)> = Vec::new();
    for (i, info) in infos.iter().enumerate() {
        if !pred(info) {
            continue;
        }
        match out.last_mut() {
            Some((date, range)) if *date == info.slot.date && range.end == i => range.end = i + 1,
            _ => out.push((info.slot.date, i..i + 1)),
        }
    }
    out
}
