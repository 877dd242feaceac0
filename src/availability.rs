//! Availability calculator.
//!
//! Turns a [`LeagueConfig`] into the ordered slot lists the engine consumes:
//! the regular season slots, the optional overflow slots, and a display-only
//! list of unusable slots with reasons.
//!
//! # Algorithm
//! Walk every date in the window, skip season-wide blackouts, pick the time
//! list for the date's [`DayType`](crate::models::DayType) and emit every
//! (time, venue) that [`AvailabilityCalendar::is_open`] accepts. Output is
//! sorted by date, time and venue.

use chrono::{Days, NaiveDate};
use log::debug;

use crate::config::LeagueConfig;
use crate::models::{AvailabilityCalendar, BlackoutSlot, Slot};

/// Every usable slot in `[start_date, end_date]`.
pub fn generate_slots(config: &LeagueConfig) -> Vec<Slot> {
    let calendar = AvailabilityCalendar::from_config(config);
    let slots = slots_between(
        config,
        &calendar,
        config.season.start_date,
        config.season.end_date,
    );
    debug!(
        "generated {} slots between {} and {}",
        slots.len(),
        config.season.start_date,
        config.season.end_date
    );
    slots
}

/// Every usable slot in the overflow window `(end_date, overflow_end_date]`.
///
/// Returns `None` when no overflow window is configured.
pub fn generate_overflow_slots(config: &LeagueConfig) -> Option<Vec<Slot>> {
    let (start, end) = config.season.overflow_window()?;
    let calendar = AvailabilityCalendar::from_config(config);
    Some(slots_between(config, &calendar, start, end))
}

/// Every blacked-out or reserved (date, time, venue) with its reason.
///
/// Season-wide blackouts list every time of the day on every venue.
/// Reservations are listed only inside `[start_date, effective end]`.
pub fn generate_blackout_slots(config: &LeagueConfig) -> Vec<BlackoutSlot> {
    let calendar = AvailabilityCalendar::from_config(config);
    let start = config.season.start_date;
    let end = config.season.effective_end();
    let in_season = |d: NaiveDate| d >= start && d <= end;

    let mut out = Vec::new();
    for (date, reason) in calendar.blackout_dates() {
        for &time in calendar.times_for(date) {
            for venue in &config.venues {
                out.push(BlackoutSlot {
                    date,
                    time,
                    venue: venue.name.clone(),
                    reason: reason.to_string(),
                });
            }
        }
    }
    for (venue, date, reason) in calendar.full_day_reservations() {
        if !in_season(date) {
            continue;
        }
        for &time in calendar.times_for(date) {
            out.push(BlackoutSlot {
                date,
                time,
                venue: venue.to_string(),
                reason: reason.to_string(),
            });
        }
    }
    for (venue, date, time, reason) in calendar.timed_reservations() {
        if in_season(date) {
            out.push(BlackoutSlot {
                date,
                time,
                venue: venue.to_string(),
                reason: reason.to_string(),
            });
        }
    }

    out.sort_by(|a, b| {
        (a.date, a.time, &a.venue, &a.reason).cmp(&(b.date, b.time, &b.venue, &b.reason))
    });
    out
}

fn slots_between(
    config: &LeagueConfig,
    calendar: &AvailabilityCalendar,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<Slot> {
    let mut slots = Vec::new();
    let mut date = start;
    while date <= end {
        if calendar.blackout_reason(date).is_none() {
            for &time in calendar.times_for(date) {
                for venue in &config.venues {
                    if calendar.is_open(&venue.name, date, time) {
                        slots.push(Slot::new(date, time, venue.name.clone()));
                    }
                }
            }
        }
        match date.checked_add_days(Days::new(1)) {
            Some(next) => date = next,
            None => break,
        }
    }
    slots.sort();
    slots.dedup();
    slots
}
