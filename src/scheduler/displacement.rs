//! Weekday fill with bounded displacement.
//!
//! # Algorithm
//! Remaining matchups are taken most-constrained first: the one with the
//! fewest legal regular slots under the live state goes next. Each is
//!
//! 1. placed directly into its best-scoring legal regular slot, or else
//! 2. placed by displacement: evict the occupant of an occupied non-Sunday
//!    regular slot, seat the candidate there if that is now legal, then
//!    re-seat the evicted matchup directly or by displacement one level
//!    shallower. A failed chain is rolled back through the trail before the
//!    next slot is tried.
//!
//! Matchups placed earlier in the same chain are never evicted again.
//! A matchup that exhausts every option is reported back to the caller.

use log::trace;

use super::state::SearchState;
use super::trail::SearchTrail;
use crate::rules::RuleSet;

/// Limits for one displacement search.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DisplacementLimits {
    pub max_depth: u32,
    /// Evictions tried per placed matchup.
    pub node_budget: u64,
}

/// Seats every unplaced matchup of `order` it can.
///
/// Returns the matchups that could not be seated, in the order they were
/// given up on.
pub(crate) fn fill_regular_slots(
    state: &mut SearchState<'_, '_>,
    trail: &mut SearchTrail,
    rules: &RuleSet,
    order: &[usize],
    limits: DisplacementLimits,
) -> Vec<usize> {
    let regular = state.problem().regular_slots();
    let mut pending: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&m| !state.is_placed(m))
        .collect();
    let mut unscheduled = Vec::new();

    while !pending.is_empty() {
        let next = pending
            .iter()
            .enumerate()
            .min_by_key(|&(_, m)| state.legal_count(rules, *m, regular.clone()))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let m = pending.remove(next);

        if let Some(slot) = state.best_slot(rules, m, regular.clone()) {
            state.assign(m, slot);
            continue;
        }

        let mut displacer = Displacer {
            state: &mut *state,
            trail: &mut *trail,
            rules,
            chain: Vec::new(),
            budget: limits.node_budget,
        };
        if displacer.displace(m, limits.max_depth) {
            trace!("seated matchup {m} by displacement");
        } else {
            unscheduled.push(m);
        }
    }
    unscheduled
}

struct Displacer<'s, 'p, 'a> {
    state: &'s mut SearchState<'p, 'a>,
    trail: &'s mut SearchTrail,
    rules: &'s RuleSet,
    /// Matchups seated by the current chain.
    chain: Vec<usize>,
    budget: u64,
}

impl Displacer<'_, '_, '_> {
    fn displace(&mut self, matchup: usize, depth: u32) -> bool {
        if depth == 0 {
            return false;
        }
        let problem = self.state.problem();
        for slot in problem.regular_slots() {
            if problem.slots[slot].is_sunday {
                continue;
            }
            let Some(occupant) = self.state.owner_of(slot) else {
                continue;
            };
            if self.chain.contains(&occupant) {
                continue;
            }
            if self.budget == 0 {
                return false;
            }
            self.budget -= 1;

            self.trail.push_frame();
            self.trail.evict(self.state, occupant);
            if self.state.is_legal(self.rules, matchup, slot) {
                self.trail.place(self.state, matchup, slot);
                self.chain.push(matchup);
                let reseated = match self
                    .state
                    .best_slot(self.rules, occupant, problem.regular_slots())
                {
                    Some(to) => {
                        self.trail.place(self.state, occupant, to);
                        true
                    }
                    None => self.displace(occupant, depth - 1),
                };
                self.chain.pop();
                if reseated {
                    self.trail.commit();
                    return true;
                }
            }
            self.trail.backtrack(self.state);
        }
        false
    }
}
