//! Saturday coverage by perfect matching.
//!
//! # Algorithm
//! For each regular Saturday, search for a team-disjoint set of unplaced
//! matchups that covers every team exactly once:
//!
//! 1. Candidates are unplaced matchups whose teams may both play that day,
//!    shuffled by the attempt's generator.
//! 2. Branch on the uncovered team with the fewest remaining candidates.
//! 3. Each tentative pick is placed into its best-scoring legal slot that
//!    Saturday through the trail, so slot and timeslot capacity are honored.
//! 4. A dead end backtracks the trail; exhausting the node budget abandons
//!    the day.
//!
//! A Saturday without a perfect matching (odd team count, no candidates,
//! budget exhausted) is left untouched for the later phases.
//!
//! # Reference
//! Branching on the most constrained variable follows the usual MRV rule
//! from constraint search (Russell & Norvig, "AIMA", Ch. 6).

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::Range;

use super::state::SearchState;
use super::trail::SearchTrail;
use crate::rules::RuleSet;

/// Covers as many Saturdays as possible. Returns the number covered.
pub(crate) fn cover_saturdays<R: Rng>(
    state: &mut SearchState<'_, '_>,
    trail: &mut SearchTrail,
    rules: &RuleSet,
    order: &[usize],
    node_budget: u64,
    rng: &mut R,
) -> usize {
    let problem = state.problem();
    let mut covered = 0;
    for (date, range) in &problem.saturdays {
        if cover_saturday(state, trail, rules, order, range.clone(), node_budget, rng) {
            covered += 1;
        } else {
            debug!("no perfect matching on {date}; left to later phases");
        }
    }
    covered
}

fn cover_saturday<R: Rng>(
    state: &mut SearchState<'_, '_>,
    trail: &mut SearchTrail,
    rules: &RuleSet,
    order: &[usize],
    slots: Range<usize>,
    node_budget: u64,
    rng: &mut R,
) -> bool {
    let problem = state.problem();
    let team_count = problem.team_count();
    if team_count == 0 || team_count % 2 == 1 || slots.is_empty() {
        return false;
    }
    let date = problem.slots[slots.start].slot.date;

    let mut candidates: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&m| !state.is_placed(m))
        .filter(|&m| {
            problem.matchup_teams[m]
                .iter()
                .all(|&t| rules.team_can_play(state.timeline(t), date))
        })
        .collect();
    candidates.shuffle(rng);

    let mut by_team: Vec<Vec<usize>> = vec![Vec::new(); team_count];
    for &m in &candidates {
        for t in problem.matchup_teams[m] {
            by_team[t].push(m);
        }
    }

    let mut matcher = Matcher {
        state,
        trail,
        rules,
        slots,
        by_team,
        covered: vec![false; team_count],
        nodes: 0,
        budget: node_budget,
    };
    matcher.trail.push_frame();
    if matcher.search(team_count) {
        matcher.trail.commit();
        true
    } else {
        matcher.trail.backtrack(matcher.state);
        false
    }
}

struct Matcher<'s, 'p, 'a> {
    state: &'s mut SearchState<'p, 'a>,
    trail: &'s mut SearchTrail,
    rules: &'s RuleSet,
    slots: Range<usize>,
    by_team: Vec<Vec<usize>>,
    covered: Vec<bool>,
    nodes: u64,
    budget: u64,
}

impl Matcher<'_, '_, '_> {
    /// Unplaced candidates of `team` whose opponent is still uncovered.
    fn options(&self, team: usize) -> Vec<usize> {
        let teams = &self.state.problem().matchup_teams;
        self.by_team[team]
            .iter()
            .copied()
            .filter(|&m| !self.state.is_placed(m) && teams[m].iter().all(|&t| !self.covered[t]))
            .collect()
    }

    /// Uncovered team with the fewest options, and that count.
    fn most_constrained(&self) -> Option<(usize, usize)> {
        (0..self.covered.len())
            .filter(|&t| !self.covered[t])
            .map(|t| (t, self.options(t).len()))
            .min_by_key(|&(_, n)| n)
    }

    fn search(&mut self, uncovered: usize) -> bool {
        if uncovered == 0 {
            return true;
        }
        if self.nodes >= self.budget {
            return false;
        }
        self.nodes += 1;

        let Some((team, n)) = self.most_constrained() else {
            return false;
        };
        if n == 0 {
            return false;
        }

        for m in self.options(team) {
            let Some(slot) = self.state.best_slot(self.rules, m, self.slots.clone()) else {
                continue;
            };
            let [home, away] = self.state.problem().matchup_teams[m];

            self.trail.push_frame();
            self.trail.place(self.state, m, slot);
            self.covered[home] = true;
            self.covered[away] = true;

            if self.search(uncovered - 2) {
                self.trail.commit();
                return true;
            }

            self.covered[home] = false;
            self.covered[away] = false;
            self.trail.backtrack(self.state);

            if self.nodes >= self.budget {
                return false;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Matchup, Slot};
    use crate::scheduler::problem::Problem;
    use chrono::{NaiveDate, NaiveTime};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    fn saturday_slots(venues: &[&str]) -> Vec<Slot> {
        let mut slots = Vec::new();
        for h in [12, 14, 17] {
            for v in venues {
                slots.push(Slot::new(d(4, 25), NaiveTime::from_hms_opt(h, 0, 0).unwrap(), *v));
            }
        }
        slots
    }

    fn teams(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_covers_every_team() {
        let t = teams(&["A", "B", "C", "D", "E", "F"]);
        // A-B and C-D would strand E-F without a partner; the search must
        // find a combination that covers all six teams.
        let matchups = vec![
            Matchup::new("A", "B", "G1"),
            Matchup::new("C", "D", "G2"),
            Matchup::new("A", "E", "G3"),
            Matchup::new("B", "F", "G4"),
            Matchup::new("C", "E", "G5"),
            Matchup::new("D", "F", "G6"),
        ];
        let slots = saturday_slots(&["N", "S"]);
        let p = Problem::new(&t, &matchups, &slots, &[], d(4, 25), d(5, 31));
        let rules = RuleSet::default();

        for seed in 0..8 {
            let mut st = SearchState::new(&p);
            let mut trail = SearchTrail::new();
            let mut rng = StdRng::seed_from_u64(seed);
            let order: Vec<usize> = (0..matchups.len()).collect();
            let covered =
                cover_saturdays(&mut st, &mut trail, &rules, &order, 10_000, &mut rng);
            assert_eq!(covered, 1);
            assert_eq!(st.placed(), 3);
            for team in 0..p.team_count() {
                assert_eq!(st.timeline(team).len(), 1);
            }
        }
    }

    #[test]
    fn test_odd_team_count_skipped() {
        let t = teams(&["A", "B", "C"]);
        let matchups = vec![Matchup::new("A", "B", "G1"), Matchup::new("B", "C", "G2")];
        let slots = saturday_slots(&["N"]);
        let p = Problem::new(&t, &matchups, &slots, &[], d(4, 25), d(5, 31));
        let mut st = SearchState::new(&p);
        let mut trail = SearchTrail::new();
        let mut rng = StdRng::seed_from_u64(1);
        let rules = RuleSet::default();
        let covered = cover_saturdays(&mut st, &mut trail, &rules, &[0, 1], 100, &mut rng);
        assert_eq!(covered, 0);
        assert_eq!(st.placed(), 0);
    }

    #[test]
    fn test_failed_matching_rolls_back() {
        let t = teams(&["A", "B", "C", "D"]);
        // D has no matchup, so no perfect matching exists
        let matchups = vec![Matchup::new("A", "B", "G1"), Matchup::new("B", "C", "G2")];
        let slots = saturday_slots(&["N"]);
        let p = Problem::new(&t, &matchups, &slots, &[], d(4, 25), d(5, 31));
        let mut st = SearchState::new(&p);
        let before = format!("{st:?}");
        let mut trail = SearchTrail::new();
        let mut rng = StdRng::seed_from_u64(1);
        let rules = RuleSet::default();
        let covered = cover_saturdays(&mut st, &mut trail, &rules, &[0, 1], 100, &mut rng);
        assert_eq!(covered, 0);
        assert_eq!(format!("{st:?}"), before);
        assert_eq!(trail.depth(), 0);
    }

    #[test]
    fn test_capacity_limits_matching() {
        let t = teams(&["A", "B", "C", "D", "E", "F"]);
        let matchups = vec![
            Matchup::new("A", "B", "G1"),
            Matchup::new("C", "D", "G2"),
            Matchup::new("E", "F", "G3"),
        ];
        // One venue, one time: only one game fits
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        let slots = vec![Slot::new(d(4, 25), noon, "N")];
        let p = Problem::new(&t, &matchups, &slots, &[], d(4, 25), d(5, 31));
        let mut st = SearchState::new(&p);
        let mut trail = SearchTrail::new();
        let mut rng = StdRng::seed_from_u64(3);
        let rules = RuleSet::default();
        let covered = cover_saturdays(&mut st, &mut trail, &rules, &[0, 1, 2], 100, &mut rng);
        assert_eq!(covered, 0);
        assert_eq!(st.placed(), 0);
    }

    #[test]
    fn test_options_shrink_as_teams_are_covered() {
        let t = teams(&["A", "B", "C", "D"]);
        let matchups = vec![
            Matchup::new("A", "B", "G1"),
            Matchup::new("A", "C", "G2"),
            Matchup::new("C", "D", "G3"),
        ];
        let slots = saturday_slots(&["N"]);
        let p = Problem::new(&t, &matchups, &slots, &[], d(4, 25), d(5, 31));
        let mut st = SearchState::new(&p);
        let mut trail = SearchTrail::new();
        let rules = RuleSet::default();
        let mut matcher = Matcher {
            state: &mut st,
            trail: &mut trail,
            rules: &rules,
            slots: 0..slots.len(),
            by_team: vec![vec![0, 1], vec![0], vec![1, 2], vec![2]],
            covered: vec![false; 4],
            nodes: 0,
            budget: 100,
        };
        assert_eq!(matcher.options(0), vec![0, 1]);
        // B has a single option
        assert_eq!(matcher.most_constrained(), Some((1, 1)));

        matcher.covered[2] = true;
        assert_eq!(matcher.options(0), vec![0]);
        assert!(matcher.options(3).is_empty());
        assert_eq!(matcher.most_constrained(), Some((3, 0)));
    }
}
