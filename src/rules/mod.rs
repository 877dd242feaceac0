//! League rules: hard constraints, soft scoring and violation detection.
//!
//! Every rule predicate lives here once and is shared by the assignment
//! engine, the metrics builder and the assignment checker.
//!
//! # Hard rules
//! A game may be placed for a team on a date only if the team stays within
//! the per-day cap, the consecutive-day cap, the ISO-week cap and, when
//! enabled, the 3-games-in-4-days cap: at most one other game within 3 days
//! either side of the date. Slot occupancy and the simultaneous-game cap are
//! checked by the caller, which owns that state.
//!
//! # Soft rules
//! See [`soft`] for the per-slot and per-attempt scoring terms.

pub mod checker;
pub mod detect;
pub mod soft;
mod timeline;

pub use checker::check_assignments;
pub use timeline::TeamTimeline;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{Guidelines, LeagueConfig, Rules};

/// Hard rules plus soft guidelines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    pub rules: Rules,
    pub guidelines: Guidelines,
}

impl RuleSet {
    /// Creates a rule set.
    pub fn new(rules: Rules, guidelines: Guidelines) -> Self {
        Self { rules, guidelines }
    }

    /// Rule set of a league configuration.
    pub fn from_config(config: &LeagueConfig) -> Self {
        Self::new(config.rules.clone(), config.guidelines.clone())
    }

    /// Whether a team with `timeline` may play one more game on `date`.
    pub fn team_can_play(&self, timeline: &TeamTimeline, date: NaiveDate) -> bool {
        let r = &self.rules;
        if timeline.games_on(date) >= r.max_games_per_day_per_team as usize {
            return false;
        }
        if timeline.run_with(date) > r.max_consecutive_days {
            return false;
        }
        if timeline.games_in_week(date) >= r.max_games_per_week as usize {
            return false;
        }
        if r.max_3_in_4_days && timeline.crowds_three_in_four(date) {
            return false;
        }
        true
    }

    /// Whether a timeslot holding `load` games can take one more.
    #[inline]
    pub fn timeslot_has_room(&self, load: usize) -> bool {
        load < self.rules.max_games_per_timeslot as usize
    }

    /// Whether 3-in-4 occurrences are only penalized, not forbidden.
    #[inline]
    pub fn three_in_four_is_soft(&self) -> bool {
        self.guidelines.avoid_3_in_4_days && !self.rules.max_3_in_4_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    #[test]
    fn test_daily_cap() {
        let rs = RuleSet::default();
        let tl = TeamTimeline::from_dates([d(5, 4)]);
        assert!(!rs.team_can_play(&tl, d(5, 4)));

        let mut loose = RuleSet::default();
        loose.rules.max_games_per_day_per_team = 2;
        assert!(loose.team_can_play(&tl, d(5, 4)));
    }

    #[test]
    fn test_consecutive_cap() {
        let rs = RuleSet::default();
        let tl = TeamTimeline::from_dates([d(5, 4), d(5, 5)]);
        assert!(!rs.team_can_play(&tl, d(5, 6)));
        assert!(!rs.team_can_play(&tl, d(5, 3)));
        assert!(rs.team_can_play(&tl, d(5, 7)));
    }

    #[test]
    fn test_weekly_cap() {
        let rs = RuleSet::default();
        // Mon, Wed, Fri of the same ISO week
        let tl = TeamTimeline::from_dates([d(5, 4), d(5, 6), d(5, 8)]);
        assert!(!rs.team_can_play(&tl, d(5, 10)));
        // Next Monday is a new week
        assert!(rs.team_can_play(&tl, d(5, 11)));
    }

    #[test]
    fn test_three_in_four_only_when_enabled() {
        let mut rs = RuleSet::default();
        rs.rules.max_games_per_week = 7;
        let tl = TeamTimeline::from_dates([d(5, 4), d(5, 6)]);
        assert!(rs.team_can_play(&tl, d(5, 7)));

        rs.rules.max_3_in_4_days = true;
        assert!(!rs.team_can_play(&tl, d(5, 7)));
        assert!(!rs.team_can_play(&tl, d(5, 5)));
        // Only 5/6 lies within 3 days of 5/9
        assert!(rs.team_can_play(&tl, d(5, 9)));
    }

    #[test]
    fn test_three_in_four_counts_both_sides() {
        let mut rs = RuleSet::default();
        rs.rules.max_3_in_4_days = true;
        rs.rules.max_games_per_week = 7;

        let apart = TeamTimeline::from_dates([d(5, 4), d(5, 10)]);
        assert!(!rs.team_can_play(&apart, d(5, 7)));
        assert!(rs.team_can_play(&apart, d(5, 6)));

        let around = TeamTimeline::from_dates([d(5, 5), d(5, 9)]);
        assert!(!rs.team_can_play(&around, d(5, 7)));
        assert!(rs.team_can_play(&around, d(5, 13)));
    }

    #[test]
    fn test_timeslot_room() {
        let rs = RuleSet::default();
        assert!(rs.timeslot_has_room(1));
        assert!(!rs.timeslot_has_room(2));
    }

    #[test]
    fn test_three_in_four_soft_flag() {
        let mut rs = RuleSet::default();
        assert!(!rs.three_in_four_is_soft());
        rs.guidelines.avoid_3_in_4_days = true;
        assert!(rs.three_in_four_is_soft());
        rs.rules.max_3_in_4_days = true;
        assert!(!rs.three_in_four_is_soft());
    }
}
