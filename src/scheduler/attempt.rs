//! One independent restart attempt and the tournament that ranks them.
//!
//! # Attempt
//! Attempt `i` seeds its own generator with `base_seed + i`, shuffles its
//! own copy of the matchup order and runs the four phases on fresh state:
//! Saturday matching, Sunday balancing, weekday fill with displacement and
//! overflow fallback.
//!
//! # Tournament
//! Attempts share nothing mutable and run on the rayon pool. The winner is
//! the complete attempt with the lowest score; if none is complete, the one
//! with the most placements, then the lowest score. Remaining ties go to the
//! lowest attempt index, so the result matches a sequential run.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use std::cmp::Ordering;

use super::displacement::{fill_regular_slots, DisplacementLimits};
use super::matching::cover_saturdays;
use super::phases::{balance_sundays, place_in_overflow};
use super::problem::Problem;
use super::state::SearchState;
use super::trail::SearchTrail;
use crate::config::SearchSettings;
use crate::models::Assignment;
use crate::rules::RuleSet;

/// Result of one attempt.
#[derive(Debug, Clone)]
pub(crate) struct AttemptOutcome {
    pub index: u32,
    /// Placements in slot order.
    pub assignments: Vec<Assignment>,
    /// Unplaced matchup indices, in the order the attempt gave up on them.
    pub unplaced: Vec<usize>,
    pub score: f64,
}

impl AttemptOutcome {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Ranking: complete first, then more placements, lower score, lower index.
    fn rank(&self, other: &Self) -> Ordering {
        other
            .is_complete()
            .cmp(&self.is_complete())
            .then_with(|| other.assignments.len().cmp(&self.assignments.len()))
            .then_with(|| self.score.total_cmp(&other.score))
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Runs attempt `index`.
pub(crate) fn run_attempt(
    problem: &Problem<'_>,
    rules: &RuleSet,
    settings: &SearchSettings,
    index: u32,
) -> AttemptOutcome {
    let mut rng = StdRng::seed_from_u64(settings.base_seed.wrapping_add(u64::from(index)));
    let mut order: Vec<usize> = (0..problem.matchup_count()).collect();
    order.shuffle(&mut rng);

    let mut state = SearchState::new(problem);
    let mut trail = SearchTrail::new();

    let saturdays = cover_saturdays(
        &mut state,
        &mut trail,
        rules,
        &order,
        settings.matching_node_budget,
        &mut rng,
    );
    let sundays = balance_sundays(&mut state, rules, &order);
    let pending = fill_regular_slots(
        &mut state,
        &mut trail,
        rules,
        &order,
        DisplacementLimits {
            max_depth: settings.max_displacement_depth,
            node_budget: settings.displacement_node_budget,
        },
    );
    let unplaced = place_in_overflow(&mut state, rules, pending);
    debug_assert_eq!(trail.depth(), 0);

    trace!(
        "attempt {index}: {saturdays}/{} Saturdays matched, {sundays} Sunday games, \
         {} in overflow, {} unplaced",
        problem.saturdays.len(),
        state.overflow_games(),
        unplaced.len()
    );

    let assignments = state.assignments();
    let score = rules.attempt_score(
        &problem.teams,
        &assignments,
        &problem.saturday_dates(),
        problem.season_end,
    );
    AttemptOutcome {
        index,
        assignments,
        unplaced,
        score,
    }
}

/// Runs `settings.attempts` attempts in parallel and returns the best one.
///
/// Attempt 0 always runs, so at least one outcome exists.
pub(crate) fn run_tournament(
    problem: &Problem<'_>,
    rules: &RuleSet,
    settings: &SearchSettings,
) -> AttemptOutcome {
    let (first, rest) = rayon::join(
        || run_attempt(problem, rules, settings, 0),
        || {
            (1..settings.attempts)
                .into_par_iter()
                .map(|i| run_attempt(problem, rules, settings, i))
                .collect::<Vec<_>>()
        },
    );

    let complete = std::iter::once(&first)
        .chain(&rest)
        .filter(|o| o.is_complete())
        .count();
    debug!(
        "{} of {} attempts placed every matchup",
        complete,
        rest.len() + 1
    );
    select_best(first, rest)
}

/// Picks the winning attempt among `first` and `rest`.
pub(crate) fn select_best(first: AttemptOutcome, rest: Vec<AttemptOutcome>) -> AttemptOutcome {
    rest.into_iter().fold(first, |best, o| match o.rank(&best) {
        Ordering::Less => o,
        _ => best,
    })
}
