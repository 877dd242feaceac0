//! Per-team game timeline.
//!
//! A sorted list of the dates a team plays on, with the date predicates
//! every rule is phrased in. The engine keeps one per team and updates it
//! on every assign/unassign; the detectors build them from assignment lists.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Sorted game dates of one team. A date appears once per game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamTimeline {
    dates: Vec<NaiveDate>,
}

impl TeamTimeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a timeline from unsorted dates.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        let mut dates: Vec<NaiveDate> = dates.into_iter().collect();
        dates.sort();
        Self { dates }
    }

    /// Records a game on `date`, keeping the list sorted.
    pub fn insert(&mut self, date: NaiveDate) {
        let pos = self.dates.partition_point(|d| *d <= date);
        self.dates.insert(pos, date);
    }

    /// Removes one game on `date`. Returns false if there was none.
    pub fn remove(&mut self, date: NaiveDate) -> bool {
        match self.dates.binary_search(&date) {
            Ok(pos) => {
                self.dates.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// All game dates, ascending.
    #[inline]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of games.
    #[inline]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the team has no games.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Whether the team plays on `date`.
    pub fn plays_on(&self, date: NaiveDate) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    /// Games on `date`.
    pub fn games_on(&self, date: NaiveDate) -> usize {
        self.games_between(date, date)
    }

    /// Games in the inclusive range `[start, end]`.
    pub fn games_between(&self, start: NaiveDate, end: NaiveDate) -> usize {
        let lo = self.dates.partition_point(|d| *d < start);
        let hi = self.dates.partition_point(|d| *d <= end);
        hi.saturating_sub(lo)
    }

    /// Games in the ISO week (Monday start) containing `date`.
    pub fn games_in_week(&self, date: NaiveDate) -> usize {
        let week = date.iso_week();
        self.dates.iter().filter(|d| d.iso_week() == week).count()
    }

    /// Games on Sundays.
    pub fn sunday_games(&self) -> usize {
        self.dates
            .iter()
            .filter(|d| d.weekday() == Weekday::Sun)
            .count()
    }

    /// Length of the run of consecutive playing days that would contain
    /// `date` if a game were added on it.
    pub fn run_with(&self, date: NaiveDate) -> u32 {
        let mut run = 1;
        let mut cursor = date;
        while let Some(prev) = cursor.checked_sub_days(Days::new(1)) {
            if !self.plays_on(prev) {
                break;
            }
            run += 1;
            cursor = prev;
        }
        cursor = date;
        while let Some(next) = cursor.checked_add_days(Days::new(1)) {
            if !self.plays_on(next) {
                break;
            }
            run += 1;
            cursor = next;
        }
        run
    }

    /// Games already played within 3 days either side of `date`, inclusive.
    pub fn games_near(&self, date: NaiveDate) -> usize {
        let start = date.checked_sub_days(Days::new(3)).unwrap_or(NaiveDate::MIN);
        let end = date.checked_add_days(Days::new(3)).unwrap_or(NaiveDate::MAX);
        self.games_between(start, end)
    }

    /// Whether a game on `date` would be the third inside a 4-day stretch
    /// centered on it.
    #[inline]
    pub fn crowds_three_in_four(&self, date: NaiveDate) -> bool {
        self.games_near(date) >= 2
    }

    /// Each third game that falls within 3 days of the game two before it,
    /// as `[d(i-2), d(i-1), d(i)]`.
    pub fn three_in_four(&self) -> Vec<[NaiveDate; 3]> {
        self.dates
            .windows(3)
            .filter(|w| (w[2] - w[0]).num_days() <= 3)
            .map(|w| [w[0], w[1], w[2]])
            .collect()
    }

    /// Maximal runs of consecutive playing days as `(first day, length)`.
    pub fn consecutive_runs(&self) -> Vec<(NaiveDate, u32)> {
        let mut runs = Vec::new();
        let mut distinct = self.dates.clone();
        distinct.dedup();
        let mut iter = distinct.into_iter();
        let Some(first) = iter.next() else {
            return runs;
        };
        let (mut start, mut prev, mut len) = (first, first, 1u32);
        for d in iter {
            if (d - prev).num_days() == 1 {
                len += 1;
            } else {
                runs.push((start, len));
                start = d;
                len = 1;
            }
            prev = d;
        }
        runs.push((start, len));
        runs
    }
}
