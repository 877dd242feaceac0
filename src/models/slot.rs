//! Slot models.
//!
//! A slot is one bookable `(date, time, venue)` unit. Slots are produced
//! once per run by the availability calculator and never mutated.
//!
//! # Ordering
//! Slots order by date, then time of day, then venue name. This is the
//! order the engine walks them in and the order every slot list is emitted in.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bookable (date, time, venue) unit.
///
/// Identity is the three fields together; no slot list contains duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    /// Calendar date.
    pub date: NaiveDate,
    /// Start time, serialized as `"HH:MM"`.
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    /// Venue name.
    pub venue: String,
}

impl Slot {
    /// Creates a slot.
    pub fn new(date: NaiveDate, time: NaiveTime, venue: impl Into<String>) -> Self {
        Self {
            date,
            time,
            venue: venue.into(),
        }
    }

    /// Whether the slot falls on a Saturday.
    #[inline]
    pub fn is_saturday(&self) -> bool {
        self.date.weekday() == Weekday::Sat
    }

    /// Whether the slot falls on a Sunday.
    ///
    /// Holidays borrow the Sunday time list but are not Sundays here.
    #[inline]
    pub fn is_sunday(&self) -> bool {
        self.date.weekday() == Weekday::Sun
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ {}",
            self.date.format("%Y-%m-%d"),
            self.time.format("%H:%M"),
            self.venue
        )
    }
}

/// A slot that cannot be used, with the reason it is unavailable.
///
/// Display only; the engine never reads these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackoutSlot {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub venue: String,
    /// Human-readable reason ("Mother's Day", "Varsity", ...).
    pub reason: String,
}

/// Which time list a date draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayType {
    Weekday,
    Saturday,
    /// Sundays and configured holidays.
    Sunday,
}

impl DayType {
    /// Day type of a date, with holidays treated as Sundays.
    pub fn of(date: NaiveDate, is_holiday: bool) -> Self {
        if is_holiday {
            return Self::Sunday;
        }
        match date.weekday() {
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
            _ => Self::Weekday,
        }
    }
}

/// Serde adapter for `"HH:MM"` times of day.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Parses `"HH:MM"`, also accepting `"HH:MM:SS"`.
    pub fn parse(raw: &str) -> Result<NaiveTime, String> {
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|e| format!("invalid time of day {raw:?}: {e}"))
    }

    /// Same adapter for lists of times.
    pub mod list {
        use chrono::NaiveTime;
        use serde::ser::SerializeSeq;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            times: &[NaiveTime],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(times.len()))?;
            for t in times {
                seq.serialize_element(&t.format(super::FORMAT).to_string())?;
            }
            seq.end()
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<NaiveTime>, D::Error> {
            let raw = Vec::<String>::deserialize(deserializer)?;
            raw.iter()
                .map(|s| super::parse(s).map_err(serde::de::Error::custom))
                .collect()
        }
    }
}
