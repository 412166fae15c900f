//! Calendar date handling for bookings
//!
//! Billing works on calendar dates only. Timestamps coming from the booking
//! records are reduced to their calendar date before any day counting, so no
//! time-of-day or offset can shift a count by one.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: end {end} is before start {start}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Date out of supported range: {0}")]
    OutOfRange(String),
}

/// Reduces a timestamp to its calendar date in its own timezone
pub fn to_calendar_date<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> NaiveDate {
    timestamp.date_naive()
}

/// Returns the 1st of the date's month
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Returns the last calendar day of the date's month
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    match first_day_of_month(date).checked_add_months(Months::new(1)) {
        Some(next) => next - Days::new(1),
        None => NaiveDate::MAX,
    }
}

/// Returns the 1st of the month following the date's month
pub fn first_day_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    first_day_of_month(date).checked_add_months(Months::new(1))
}

/// Number of days in the date's month (28-31)
pub fn days_in_month(date: NaiveDate) -> u32 {
    last_day_of_month(date).day()
}

/// True when `[start, end]` is exactly one complete calendar month
pub fn is_full_calendar_month(start: NaiveDate, end: NaiveDate) -> bool {
    start.day() == 1 && end == last_day_of_month(start)
}

/// `YYYY-MM` key for the date's month
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// `Mon YYYY` label for the date's month
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// True when both dates fall in the same calendar month
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// A booking interval, inclusive at both ends
///
/// A one-day booking has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct BookingInterval {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawInterval> for BookingInterval {
    type Error = TemporalError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        BookingInterval::new(raw.start, raw.end)
    }
}

impl BookingInterval {
    /// Creates an interval, rejecting `end < start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if end < start {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates an interval from two timestamps, keeping only their dates
    pub fn from_timestamps<Tz: TimeZone>(
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
    ) -> Result<Self, TemporalError> {
        Self::new(to_calendar_date(start), to_calendar_date(end))
    }

    /// The interval covering one whole calendar month
    pub fn calendar_month(year: i32, month: u32) -> Result<Self, TemporalError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| TemporalError::OutOfRange(format!("{year}-{month:02}")))?;
        Ok(Self {
            start,
            end: last_day_of_month(start),
        })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Inclusive day count, never less than 1
    pub fn inclusive_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// True when the interval is exactly one complete calendar month
    pub fn is_full_calendar_month(&self) -> bool {
        is_full_calendar_month(self.start, self.end)
    }

    /// Smallest interval covering both `self` and `other`
    pub fn span(&self, other: &BookingInterval) -> BookingInterval {
        BookingInterval {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for BookingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
