//! Sunday balancing and overflow fallback.
//!
//! # Sunday balancing
//! For each regular Sunday, the day's capacity is the sum over its times of
//! `min(free venues, timeslot cap - load)`. Until that capacity is used,
//! place the legal (matchup, slot) pair with the lowest
//! `10 × (home Sundays + away Sundays) + slot score`, skipping any team
//! that would pass the league-minimum Sunday count plus the slack.
//!
//! # Overflow fallback
//! Matchups nothing else could seat go first-fit into the earliest legal
//! overflow slot, without displacement.

use std::collections::BTreeMap;
use std::ops::Range;

use super::state::SearchState;
use crate::rules::soft::SUNDAY_CEILING_SLACK;
use crate::rules::RuleSet;

const SUNDAY_COUNT_WEIGHT: f64 = 10.0;

/// Fills regular Sundays fairly. Returns the number of games placed.
pub(crate) fn balance_sundays(
    state: &mut SearchState<'_, '_>,
    rules: &RuleSet,
    order: &[usize],
) -> usize {
    let problem = state.problem();
    let mut placed = 0;
    for (_, range) in &problem.sundays {
        let capacity = sunday_capacity(state, rules, range.clone());
        for _ in 0..capacity {
            match cheapest_sunday_pick(state, rules, order, range.clone()) {
                Some((m, slot)) => {
                    state.assign(m, slot);
                    placed += 1;
                }
                None => break,
            }
        }
    }
    placed
}

/// Games a day's slots can still take.
fn sunday_capacity(state: &SearchState<'_, '_>, rules: &RuleSet, slots: Range<usize>) -> usize {
    let problem = state.problem();
    let mut free_by_timeslot: BTreeMap<usize, (usize, usize)> = BTreeMap::new();
    for s in slots {
        let entry = free_by_timeslot
            .entry(problem.slots[s].timeslot)
            .or_insert((0, state.timeslot_room(rules, s)));
        if state.owner_of(s).is_none() {
            entry.0 += 1;
        }
    }
    free_by_timeslot
        .values()
        .map(|&(free, room)| free.min(room))
        .sum()
}

fn cheapest_sunday_pick(
    state: &SearchState<'_, '_>,
    rules: &RuleSet,
    order: &[usize],
    slots: Range<usize>,
) -> Option<(usize, usize)> {
    let problem = state.problem();
    let ceiling = state.min_sundays() + SUNDAY_CEILING_SLACK;
    let mut best: Option<(usize, usize, f64)> = None;

    for &m in order {
        if state.is_placed(m) {
            continue;
        }
        let [home, away] = problem.matchup_teams[m];
        let (sh, sa) = (state.sunday_count(home), state.sunday_count(away));
        if sh + 1 > ceiling || sa + 1 > ceiling {
            continue;
        }
        for slot in slots.clone() {
            if !state.is_legal(rules, m, slot) {
                continue;
            }
            let cost = SUNDAY_COUNT_WEIGHT * (sh + sa) as f64 + state.slot_score(rules, m, slot);
            match best {
                Some((_, _, b)) if cost >= b => {}
                _ => best = Some((m, slot, cost)),
            }
        }
    }
    best.map(|(m, slot, _)| (m, slot))
}

/// Seats `pending` first-fit into overflow slots. Returns what is still unplaced.
pub(crate) fn place_in_overflow(
    state: &mut SearchState<'_, '_>,
    rules: &RuleSet,
    pending: Vec<usize>,
) -> Vec<usize> {
    let overflow = state.problem().overflow_slots();
    let mut stuck = Vec::new();
    for m in pending {
        match overflow.clone().find(|&s| state.is_legal(rules, m, s)) {
            Some(slot) => state.assign(m, slot),
            None => stuck.push(m),
        }
    }
    stuck
}
