//! Availability calendar.
//!
//! Combines the season's per-day-type time lists with negative blocks:
//! whole-day blackouts, holidays that borrow the Sunday list, and venue
//! reservations (full-day or specific times).
//!
//! # Precedence
//! Blocks override time lists. A (date, time, venue) is open iff:
//! - the date is not a season-wide blackout, AND
//! - the time is in the date's time list, AND
//! - no reservation on that venue covers the whole date or that time.

use chrono::{NaiveDate, NaiveTime};
use std::collections::{HashMap, HashSet};

use super::DayType;
use crate::config::LeagueConfig;

/// Lookup structure for slot availability, built once from a config.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityCalendar {
    /// Season-wide blackout dates with reasons.
    blackouts: HashMap<NaiveDate, String>,
    /// Dates that use the Sunday list.
    holidays: HashSet<NaiveDate>,
    /// (venue, date) → reason, for full-day reservations.
    full_day: HashMap<(String, NaiveDate), String>,
    /// (venue, date, time) → reason, for timed reservations.
    timed: HashMap<(String, NaiveDate, NaiveTime), String>,
    weekday_times: Vec<NaiveTime>,
    saturday_times: Vec<NaiveTime>,
    sunday_times: Vec<NaiveTime>,
}

impl AvailabilityCalendar {
    /// Creates an empty calendar with the given time lists (nothing blocked).
    pub fn new(
        weekday_times: Vec<NaiveTime>,
        saturday_times: Vec<NaiveTime>,
        sunday_times: Vec<NaiveTime>,
    ) -> Self {
        Self {
            weekday_times,
            saturday_times,
            sunday_times,
            ..Default::default()
        }
    }

    /// Builds the calendar from a league configuration.
    pub fn from_config(config: &LeagueConfig) -> Self {
        let ts = &config.time_slots;
        let mut cal = Self::new(ts.weekday.clone(), ts.saturday.clone(), ts.sunday.clone());
        for b in &config.season.blackout_dates {
            cal = cal.with_blackout(b.date, b.reason.clone());
        }
        for &h in &ts.holiday_dates {
            cal = cal.with_holiday(h);
        }
        for venue in &config.venues {
            for r in &venue.reservations {
                for date in r.dates() {
                    if r.is_full_day() {
                        cal = cal.with_full_day_reservation(&venue.name, date, r.reason.clone());
                    } else {
                        for &time in &r.times {
                            cal = cal.with_timed_reservation(
                                &venue.name,
                                date,
                                time,
                                r.reason.clone(),
                            );
                        }
                    }
                }
            }
        }
        cal
    }

    /// Adds a season-wide blackout.
    pub fn with_blackout(mut self, date: NaiveDate, reason: impl Into<String>) -> Self {
        self.blackouts.insert(date, reason.into());
        self
    }

    /// Adds a holiday (uses the Sunday time list).
    pub fn with_holiday(mut self, date: NaiveDate) -> Self {
        self.holidays.insert(date);
        self
    }

    /// Reserves a venue for a whole day.
    pub fn with_full_day_reservation(
        mut self,
        venue: &str,
        date: NaiveDate,
        reason: impl Into<String>,
    ) -> Self {
        self.full_day.insert((venue.to_string(), date), reason.into());
        self
    }

    /// Reserves a venue at one time on one day.
    pub fn with_timed_reservation(
        mut self,
        venue: &str,
        date: NaiveDate,
        time: NaiveTime,
        reason: impl Into<String>,
    ) -> Self {
        self.timed
            .insert((venue.to_string(), date, time), reason.into());
        self
    }

    /// Reason a date is blacked out, if it is.
    pub fn blackout_reason(&self, date: NaiveDate) -> Option<&str> {
        self.blackouts.get(&date).map(String::as_str)
    }

    /// Whether a date is a configured holiday.
    #[inline]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Day type of a date, holidays counting as Sundays.
    pub fn day_type(&self, date: NaiveDate) -> DayType {
        DayType::of(date, self.is_holiday(date))
    }

    /// Times of day offered on a date (ignores blackouts).
    pub fn times_for(&self, date: NaiveDate) -> &[NaiveTime] {
        match self.day_type(date) {
            DayType::Weekday => &self.weekday_times,
            DayType::Saturday => &self.saturday_times,
            DayType::Sunday => &self.sunday_times,
        }
    }

    /// Reason a venue is reserved at (date, time), if it is.
    ///
    /// Full-day reservations take precedence over timed ones.
    pub fn reservation_reason(
        &self,
        venue: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Option<&str> {
        let key = (venue.to_string(), date);
        if let Some(reason) = self.full_day.get(&key) {
            return Some(reason);
        }
        self.timed
            .get(&(key.0, date, time))
            .map(String::as_str)
    }

    /// Whether (date, time, venue) can host a game.
    pub fn is_open(&self, venue: &str, date: NaiveDate, time: NaiveTime) -> bool {
        if self.blackouts.contains_key(&date) {
            return false;
        }
        if !self.times_for(date).contains(&time) {
            return false;
        }
        self.reservation_reason(venue, date, time).is_none()
    }

    /// Full-day reservations as (venue, date, reason), unordered.
    pub(crate) fn full_day_reservations(&self) -> impl Iterator<Item = (&str, NaiveDate, &str)> {
        self.full_day
            .iter()
            .map(|((v, d), r)| (v.as_str(), *d, r.as_str()))
    }

    /// Timed reservations as (venue, date, time, reason), unordered.
    pub(crate) fn timed_reservations(
        &self,
    ) -> impl Iterator<Item = (&str, NaiveDate, NaiveTime, &str)> {
        self.timed
            .iter()
            .map(|((v, d, t), r)| (v.as_str(), *d, *t, r.as_str()))
    }

    /// Blackout dates as (date, reason), unordered.
    pub(crate) fn blackout_dates(&self) -> impl Iterator<Item = (NaiveDate, &str)> {
        self.blackouts.iter().map(|(d, r)| (*d, r.as_str()))
    }
}
