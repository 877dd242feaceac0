//! Soft scoring. Lower is better.
//!
//! # Slot score
//! Ranks legal slots for one matchup against the live search state:
//!
//! | Term | Value |
//! |------|-------|
//! | Pace | `|games - league average| × 2` per team |
//! | Rematch | `(min spacing - days since last meeting) × 5` when short |
//! | Sunday | `Sunday count × 10` per team, `+1000` past the ceiling |
//! | 3-in-4 | `20` per team with 2+ games within 3 days, when only the guideline is on |
//! | Date | `0.1` per day after season start |
//! | Time | `0.05` per later time that day |
//!
//! # Attempt score
//! Ranks whole attempts: pace spread, `50` per (team, Saturday) without a
//! game, `25` per Sunday-spread point above 2, `10` per 3-in-4 occurrence,
//! `2` per day of rematch shortfall and `1000` per overflow game.

use chrono::NaiveDate;

use super::{detect, RuleSet, TeamTimeline};
use crate::models::Assignment;

const PACE_WEIGHT: f64 = 2.0;
const REMATCH_WEIGHT: f64 = 5.0;
const SUNDAY_WEIGHT: f64 = 10.0;
const SUNDAY_CEILING_PENALTY: f64 = 1000.0;
const THREE_IN_FOUR_WEIGHT: f64 = 20.0;
const DAY_OFFSET_WEIGHT: f64 = 0.1;
const LATE_TIME_WEIGHT: f64 = 0.05;

const MISSED_SATURDAY_PENALTY: f64 = 50.0;
const SUNDAY_SPREAD_TOLERANCE: usize = 2;
const SUNDAY_SPREAD_WEIGHT: f64 = 25.0;
const THREE_IN_FOUR_PENALTY: f64 = 10.0;
const REMATCH_SHORTFALL_WEIGHT: f64 = 2.0;
const OVERFLOW_PENALTY: f64 = 1000.0;

/// Sunday counts may exceed the league minimum by this much.
pub const SUNDAY_CEILING_SLACK: usize = 2;

/// One team's side of a candidate placement.
#[derive(Debug, Clone, Copy)]
pub struct TeamSide<'a> {
    pub games: usize,
    pub sundays: usize,
    pub timeline: &'a TeamTimeline,
}

/// A candidate (matchup, slot) placement, described by the numbers the
/// slot score needs.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub date: NaiveDate,
    pub is_sunday: bool,
    /// Days since season start.
    pub day_offset: i64,
    /// Times on the same date that start later than this slot.
    pub later_times: usize,
    pub home: TeamSide<'a>,
    pub away: TeamSide<'a>,
    /// Mean games per team across the whole league.
    pub average_games: f64,
    /// Latest date the pair already plays on, if any.
    pub last_meeting: Option<NaiveDate>,
    /// Highest Sunday count allowed without the ceiling penalty.
    pub sunday_ceiling: usize,
}

impl RuleSet {
    /// Soft score of one candidate placement.
    pub fn slot_score(&self, c: &Candidate<'_>) -> f64 {
        let g = &self.guidelines;
        let sides = [c.home, c.away];
        let mut score = 0.0;

        if g.balance_pace {
            for side in &sides {
                score += (side.games as f64 - c.average_games).abs() * PACE_WEIGHT;
            }
        }

        if let Some(last) = c.last_meeting {
            let days = (c.date - last).num_days().abs();
            let min = i64::from(g.min_days_between_same_matchup);
            if days < min {
                score += (min - days) as f64 * REMATCH_WEIGHT;
            }
        }

        if g.balance_sunday_games && c.is_sunday {
            for side in &sides {
                score += side.sundays as f64 * SUNDAY_WEIGHT;
                if side.sundays + 1 > c.sunday_ceiling {
                    score += SUNDAY_CEILING_PENALTY;
                }
            }
        }

        if self.three_in_four_is_soft() {
            for side in &sides {
                if side.timeline.crowds_three_in_four(c.date) {
                    score += THREE_IN_FOUR_WEIGHT;
                }
            }
        }

        score += c.day_offset as f64 * DAY_OFFSET_WEIGHT;
        score += c.later_times as f64 * LATE_TIME_WEIGHT;
        score
    }

    /// Soft score of a whole attempt.
    ///
    /// `saturdays` are the regular-season Saturdays every team should play on.
    pub fn attempt_score(
        &self,
        teams: &[String],
        assignments: &[Assignment],
        saturdays: &[NaiveDate],
        season_end: NaiveDate,
    ) -> f64 {
        let timelines = detect::team_timelines(teams, assignments);
        let mut score = 0.0;

        let games = timelines.iter().map(TeamTimeline::len);
        if let (Some(min), Some(max)) = (games.clone().min(), games.max()) {
            score += (max - min) as f64;
        }

        for tl in &timelines {
            let missed = saturdays.iter().filter(|d| !tl.plays_on(**d)).count();
            score += missed as f64 * MISSED_SATURDAY_PENALTY;
        }

        if let Some(spread) = detect::sunday_spread(teams, assignments) {
            if spread.spread() > SUNDAY_SPREAD_TOLERANCE {
                score += (spread.spread() - SUNDAY_SPREAD_TOLERANCE) as f64 * SUNDAY_SPREAD_WEIGHT;
            }
        }

        let three_in_four: usize = timelines.iter().map(|tl| tl.three_in_four().len()).sum();
        score += three_in_four as f64 * THREE_IN_FOUR_PENALTY;

        let shortfall: i64 = detect::rematches(
            assignments,
            self.guidelines.min_days_between_same_matchup,
        )
        .iter()
        .map(detect::Rematch::shortfall)
        .sum();
        score += shortfall as f64 * REMATCH_SHORTFALL_WEIGHT;

        if let Some(overflow) = detect::overflow_usage(assignments, season_end) {
            score += overflow.games as f64 * OVERFLOW_PENALTY;
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Matchup, Slot};
    use chrono::NaiveTime;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    fn candidate<'a>(tl: &'a TeamTimeline, date: NaiveDate) -> Candidate<'a> {
        let side = TeamSide {
            games: 2,
            sundays: 0,
            timeline: tl,
        };
        Candidate {
            date,
            is_sunday: false,
            day_offset: 0,
            later_times: 0,
            home: side,
            away: side,
            average_games: 2.0,
            last_meeting: None,
            sunday_ceiling: 2,
        }
    }

    #[test]
    fn test_neutral_candidate_scores_zero() {
        let tl = TeamTimeline::new();
        let rs = RuleSet::default();
        assert_eq!(rs.slot_score(&candidate(&tl, d(5, 4))), 0.0);
    }

    #[test]
    fn test_pace_term() {
        let tl = TeamTimeline::new();
        let rs = RuleSet::default();
        let mut c = candidate(&tl, d(5, 4));
        c.home.games = 4;
        assert_eq!(rs.slot_score(&c), 4.0);

        let mut off = RuleSet::default();
        off.guidelines.balance_pace = false;
        assert_eq!(off.slot_score(&c), 0.0);
    }

    #[test]
    fn test_rematch_term() {
        let tl = TeamTimeline::new();
        let rs = RuleSet::default();
        let mut c = candidate(&tl, d(5, 11));
        c.last_meeting = Some(d(5, 4));
        // 14 - 7 = 7 days short
        assert_eq!(rs.slot_score(&c), 35.0);
        c.last_meeting = Some(d(4, 20));
        assert_eq!(rs.slot_score(&c), 0.0);
    }

    #[test]
    fn test_sunday_term_and_ceiling() {
        let tl = TeamTimeline::new();
        let rs = RuleSet::default();
        let mut c = candidate(&tl, d(5, 10));
        c.is_sunday = true;
        c.home.sundays = 1;
        c.away.sundays = 2;
        // 10 + 20, and the away side would go past a ceiling of 2
        assert_eq!(rs.slot_score(&c), 1030.0);
    }

    #[test]
    fn test_date_and_time_preference() {
        let tl = TeamTimeline::new();
        let rs = RuleSet::default();
        let mut early = candidate(&tl, d(4, 25));
        early.later_times = 2;
        let mut late = candidate(&tl, d(4, 25));
        late.later_times = 0;
        assert!(rs.slot_score(&late) < rs.slot_score(&early));

        let mut later_day = candidate(&tl, d(5, 5));
        later_day.day_offset = 10;
        assert!(rs.slot_score(&early) < rs.slot_score(&later_day));
    }

    #[test]
    fn test_soft_three_in_four() {
        let tl = TeamTimeline::from_dates([d(5, 4), d(5, 6)]);
        let mut rs = RuleSet::default();
        let c = candidate(&tl, d(5, 7));
        assert_eq!(rs.slot_score(&c), 0.0);
        rs.guidelines.avoid_3_in_4_days = true;
        assert_eq!(rs.slot_score(&c), 40.0);

        let apart = TeamTimeline::from_dates([d(5, 4), d(5, 10)]);
        assert_eq!(rs.slot_score(&candidate(&apart, d(5, 7))), 40.0);
        assert_eq!(rs.slot_score(&candidate(&apart, d(5, 6))), 0.0);
    }

    #[test]
    fn test_attempt_score_penalties() {
        let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        let teams: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        let saturday = d(4, 25);
        let full = vec![
            Assignment::new(Matchup::new("A", "B", "G1"), Slot::new(saturday, t(12), "N")),
            Assignment::new(Matchup::new("C", "D", "G2"), Slot::new(saturday, t(14), "N")),
        ];
        let rs = RuleSet::default();
        assert_eq!(rs.attempt_score(&teams, &full, &[saturday], d(5, 31)), 0.0);

        // C and D miss the Saturday: 2 × 50, plus pace spread 1
        let partial = &full[..1];
        assert_eq!(rs.attempt_score(&teams, partial, &[saturday], d(5, 31)), 101.0);

        // An overflow game costs 1000 on top of the pace spread
        let overflow = vec![Assignment::new(
            Matchup::new("A", "B", "G3"),
            Slot::new(d(6, 2), t(17), "N"),
        )];
        assert_eq!(rs.attempt_score(&teams, &overflow, &[], d(5, 31)), 1001.0);
    }

    fn game(home: &str, away: &str, date: NaiveDate) -> Assignment {
        let at = NaiveTime::from_hms_opt(17, 45, 0).unwrap();
        Assignment::new(Matchup::new(home, away, "G"), Slot::new(date, at, "N"))
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_attempt_score_sunday_spread() {
        let rs = RuleSet::default();
        let teams = names(&["A", "B", "C", "D", "E"]);
        // Sundays 5/3, 5/17, 5/31: A has 3, E has none, pace spread 3
        let mut games = vec![
            game("A", "B", d(5, 3)),
            game("A", "C", d(5, 17)),
            game("A", "D", d(5, 31)),
        ];
        assert_eq!(rs.attempt_score(&teams, &games, &[], d(6, 30)), 3.0 + 25.0);

        let teams = names(&["A", "B", "C", "D", "E", "F"]);
        games.push(game("A", "F", d(6, 14)));
        assert_eq!(rs.attempt_score(&teams, &games, &[], d(6, 30)), 4.0 + 50.0);
    }

    #[test]
    fn test_attempt_score_three_in_four() {
        let rs = RuleSet::default();
        let teams = names(&["A", "B", "C", "D"]);
        let spaced = vec![
            game("A", "B", d(5, 4)),
            game("A", "C", d(5, 5)),
            game("A", "D", d(5, 9)),
        ];
        let crowded = vec![
            game("A", "B", d(5, 4)),
            game("A", "C", d(5, 5)),
            game("A", "D", d(5, 7)),
        ];
        // Pace spread 2 in both; one occurrence for A costs 10
        assert_eq!(rs.attempt_score(&teams, &spaced, &[], d(5, 31)), 2.0);
        assert_eq!(rs.attempt_score(&teams, &crowded, &[], d(5, 31)), 12.0);
    }

    #[test]
    fn test_attempt_score_rematch_shortfall() {
        let mut rs = RuleSet::default();
        let teams = names(&["A", "B"]);
        let games = vec![game("A", "B", d(5, 4)), game("B", "A", d(5, 11))];
        // 7 days short of 14, 2 per day
        assert_eq!(rs.attempt_score(&teams, &games, &[], d(5, 31)), 14.0);

        rs.guidelines.min_days_between_same_matchup = 10;
        assert_eq!(rs.attempt_score(&teams, &games, &[], d(5, 31)), 6.0);
        rs.guidelines.min_days_between_same_matchup = 7;
        assert_eq!(rs.attempt_score(&teams, &games, &[], d(5, 31)), 0.0);
    }
}
