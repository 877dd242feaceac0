//! Mutable search state of one attempt.
//!
//! Every assign has an exact inverse: [`SearchState::unassign`] restores slot
//! occupancy, team timelines, Sunday counts, timeslot loads and the pair's
//! last-meeting date (recomputed from the pair's remaining placements).

use chrono::NaiveDate;

use super::problem::Problem;
use crate::models::Assignment;
use crate::rules::soft::{Candidate, TeamSide, SUNDAY_CEILING_SLACK};
use crate::rules::{RuleSet, TeamTimeline};

#[derive(Debug, Clone)]
pub(crate) struct SearchState<'p, 'a> {
    problem: &'p Problem<'a>,
    slot_owner: Vec<Option<usize>>,
    matchup_slot: Vec<Option<usize>>,
    timelines: Vec<TeamTimeline>,
    sundays: Vec<usize>,
    timeslot_load: Vec<usize>,
    pair_last: Vec<Option<NaiveDate>>,
    placed: usize,
}

impl<'p, 'a> SearchState<'p, 'a> {
    pub fn new(problem: &'p Problem<'a>) -> Self {
        Self {
            problem,
            slot_owner: vec![None; problem.slots.len()],
            matchup_slot: vec![None; problem.matchup_count()],
            timelines: vec![TeamTimeline::new(); problem.team_count()],
            sundays: vec![0; problem.team_count()],
            timeslot_load: vec![0; problem.timeslot_count],
            pair_last: vec![None; problem.pair_matchups.len()],
            placed: 0,
        }
    }

    #[inline]
    pub fn problem(&self) -> &'p Problem<'a> {
        self.problem
    }

    #[inline]
    pub fn placed(&self) -> usize {
        self.placed
    }

    #[cfg(test)]
    pub fn slot_of(&self, matchup: usize) -> Option<usize> {
        self.matchup_slot[matchup]
    }

    #[inline]
    pub fn owner_of(&self, slot: usize) -> Option<usize> {
        self.slot_owner[slot]
    }

    #[inline]
    pub fn is_placed(&self, matchup: usize) -> bool {
        self.matchup_slot[matchup].is_some()
    }

    #[inline]
    pub fn timeline(&self, team: usize) -> &TeamTimeline {
        &self.timelines[team]
    }

    #[inline]
    pub fn sunday_count(&self, team: usize) -> usize {
        self.sundays[team]
    }

    /// Lowest Sunday count across the league.
    pub fn min_sundays(&self) -> usize {
        self.sundays.iter().copied().min().unwrap_or(0)
    }

    /// Places `matchup` into the free `slot`.
    pub fn assign(&mut self, matchup: usize, slot: usize) {
        debug_assert!(self.slot_owner[slot].is_none());
        debug_assert!(self.matchup_slot[matchup].is_none());
        let info = &self.problem.slots[slot];
        let date = info.slot.date;

        self.slot_owner[slot] = Some(matchup);
        self.matchup_slot[matchup] = Some(slot);
        self.timeslot_load[info.timeslot] += 1;
        for team in self.problem.matchup_teams[matchup] {
            self.timelines[team].insert(date);
            if info.is_sunday {
                self.sundays[team] += 1;
            }
        }
        let pair = self.problem.matchup_pair[matchup];
        self.pair_last[pair] = Some(self.pair_last[pair].map_or(date, |d| d.max(date)));
        self.placed += 1;
    }

    /// Removes `matchup` from its slot and returns that slot.
    pub fn unassign(&mut self, matchup: usize) -> Option<usize> {
        let slot = self.matchup_slot[matchup].take()?;
        let info = &self.problem.slots[slot];
        let date = info.slot.date;

        self.slot_owner[slot] = None;
        self.timeslot_load[info.timeslot] -= 1;
        for team in self.problem.matchup_teams[matchup] {
            self.timelines[team].remove(date);
            if info.is_sunday {
                self.sundays[team] -= 1;
            }
        }
        let pair = self.problem.matchup_pair[matchup];
        self.pair_last[pair] = self.problem.pair_matchups[pair]
            .iter()
            .filter_map(|&m| self.matchup_slot[m])
            .map(|s| self.problem.slots[s].slot.date)
            .max();
        self.placed -= 1;
        Some(slot)
    }

    /// Whether `matchup` may be placed into `slot` right now.
    pub fn is_legal(&self, rules: &RuleSet, matchup: usize, slot: usize) -> bool {
        if self.slot_owner[slot].is_some() {
            return false;
        }
        let info = &self.problem.slots[slot];
        if !rules.timeslot_has_room(self.timeslot_load[info.timeslot]) {
            return false;
        }
        self.problem.matchup_teams[matchup]
            .iter()
            .all(|&team| rules.team_can_play(&self.timelines[team], info.slot.date))
    }

    /// Soft score of placing `matchup` into `slot`.
    pub fn slot_score(&self, rules: &RuleSet, matchup: usize, slot: usize) -> f64 {
        let info = &self.problem.slots[slot];
        let [home, away] = self.problem.matchup_teams[matchup];
        let side = |team: usize| TeamSide {
            games: self.timelines[team].len(),
            sundays: self.sundays[team],
            timeline: &self.timelines[team],
        };
        let candidate = Candidate {
            date: info.slot.date,
            is_sunday: info.is_sunday,
            day_offset: info.day_offset,
            later_times: info.later_times,
            home: side(home),
            away: side(away),
            average_games: self.average_games(),
            last_meeting: self.pair_last[self.problem.matchup_pair[matchup]],
            sunday_ceiling: self.min_sundays() + SUNDAY_CEILING_SLACK,
        };
        rules.slot_score(&candidate)
    }

    /// Legal slot among `slots` with the lowest score; earliest on ties.
    pub fn best_slot(
        &self,
        rules: &RuleSet,
        matchup: usize,
        slots: impl IntoIterator<Item = usize>,
    ) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for slot in slots {
            if !self.is_legal(rules, matchup, slot) {
                continue;
            }
            let score = self.slot_score(rules, matchup, slot);
            match best {
                Some((_, b)) if score >= b => {}
                _ => best = Some((slot, score)),
            }
        }
        best.map(|(slot, _)| slot)
    }

    /// Number of legal slots among `slots`.
    pub fn legal_count(
        &self,
        rules: &RuleSet,
        matchup: usize,
        slots: impl IntoIterator<Item = usize>,
    ) -> usize {
        slots
            .into_iter()
            .filter(|&s| self.is_legal(rules, matchup, s))
            .count()
    }

    /// Free capacity of a timeslot, ignoring venue availability.
    pub fn timeslot_room(&self, rules: &RuleSet, slot: usize) -> usize {
        let load = self.timeslot_load[self.problem.slots[slot].timeslot];
        (rules.rules.max_games_per_timeslot as usize).saturating_sub(load)
    }

    fn average_games(&self) -> f64 {
        if self.timelines.is_empty() {
            return 0.0;
        }
        (2 * self.placed) as f64 / self.timelines.len() as f64
    }

    /// Games currently placed in overflow slots.
    pub fn overflow_games(&self) -> usize {
        self.slot_owner
            .iter()
            .zip(&self.problem.slots)
            .filter(|(owner, info)| owner.is_some() && info.is_overflow)
            .count()
    }

    /// Current placements in slot order.
    pub fn assignments(&self) -> Vec<Assignment> {
        self.slot_owner
            .iter()
            .enumerate()
            .filter_map(|(slot, owner)| {
                owner.map(|m| {
                    Assignment::new(
                        self.problem.matchups[m].clone(),
                        self.problem.slots[slot].slot.clone(),
                    )
                })
            })
            .collect()
    }

    /// Unplaced matchup indices in ascending order.
    #[cfg(test)]
    pub fn unplaced(&self) -> Vec<usize> {
        (0..self.matchup_slot.len())
            .filter(|&m| self.matchup_slot[m].is_none())
            .collect()
    }
}
