//! Billable day counting
//!
//! Two day-count policies exist and are kept apart on purpose:
//!
//! - [`DayCountPolicy::CalendarNormalized`]: inclusive count, except that a
//!   booking covering exactly one calendar month counts as one full billing
//!   cycle (Feb 1-28 bills the same as Jul 1-31). Used for line-item pricing.
//! - [`DayCountPolicy::SimpleInclusive`]: plain inclusive count with no month
//!   normalization. Used when summing a campaign's asset bookings.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use core_kernel::{round_half_up, BookingInterval, TemporalError};
use crate::config::BillingConfig;
use crate::error::{BillingError, BillingResult};

/// How a booking interval is turned into billable days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCountPolicy {
    /// Complete calendar months count as one billing cycle
    CalendarNormalized,
    /// Inclusive day count, never normalized
    SimpleInclusive,
}

impl DayCountPolicy {
    /// Counts billable days in `[start, end]`
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::InvalidRange`] when `end < start`.
    pub fn count(&self, start: NaiveDate, end: NaiveDate, config: &BillingConfig) -> BillingResult<i64> {
        let interval = booking_interval(start, end)?;
        Ok(self.count_interval(&interval, config))
    }

    /// Counts billable days in an already-validated interval
    pub fn count_interval(&self, interval: &BookingInterval, config: &BillingConfig) -> i64 {
        match self {
            DayCountPolicy::CalendarNormalized if interval.is_full_calendar_month() => {
                i64::from(config.cycle_days)
            }
            _ => interval.inclusive_days().max(1),
        }
    }
}

/// Builds an interval, reporting `end < start` as an invalid range
pub fn booking_interval(start: NaiveDate, end: NaiveDate) -> BillingResult<BookingInterval> {
    if end < start {
        return Err(BillingError::invalid_range(start, end));
    }
    Ok(BookingInterval::new(start, end)?)
}

/// Billable days between two dates under the calendar-normalized policy
///
/// ```
/// use chrono::NaiveDate;
/// use domain_billing::{calculate_duration_days, BillingConfig};
///
/// let config = BillingConfig::default();
/// let feb_1 = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
/// let feb_28 = NaiveDate::from_ymd_opt(2023, 2, 28).unwrap();
/// assert_eq!(calculate_duration_days(feb_1, feb_28, &config).unwrap(), 30);
/// ```
pub fn calculate_duration_days(start: NaiveDate, end: NaiveDate, config: &BillingConfig) -> BillingResult<i64> {
    DayCountPolicy::CalendarNormalized.count(start, end, config)
}

/// Billable days between two dates under the simple inclusive policy
pub fn simple_inclusive_days(start: NaiveDate, end: NaiveDate, config: &BillingConfig) -> BillingResult<i64> {
    DayCountPolicy::SimpleInclusive.count(start, end, config)
}

/// End date of a booking that starts on `start` and lasts `duration_days`
///
/// Durations below one day are treated as one day.
pub fn calculate_end_date(start: NaiveDate, duration_days: i64) -> BillingResult<NaiveDate> {
    let offset = duration_days.max(1) - 1;
    start
        .checked_add_days(Days::new(offset.unsigned_abs()))
        .ok_or_else(|| {
            TemporalError::OutOfRange(format!("{start} + {duration_days} days")).into()
        })
}

/// Whole billing months in a day count, rounded half up
///
/// Lossy; meant for switching a form between day and month entry.
pub fn calculate_months_from_days(days: i64, config: &BillingConfig) -> i64 {
    let months = config.per_cycle(Decimal::from(days.max(0)));
    round_half_up(months, 0).to_i64().unwrap_or_default()
}

/// Days in a (possibly half) month count
pub fn calculate_days_from_months(months: Decimal, config: &BillingConfig) -> i64 {
    let days = months.max(Decimal::ZERO) * config.cycle_days_decimal();
    round_half_up(days, 0).to_i64().unwrap_or_default()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::Datelike;
    use core_kernel::temporal::{is_full_calendar_month, last_day_of_month};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn every_calendar_month_bills_as_one_cycle(year in 1990i32..2100, month in 1u32..=12) {
            let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            let last = last_day_of_month(first);
            let days = calculate_duration_days(first, last, &BillingConfig::default()).unwrap();
            prop_assert_eq!(days, 30);
        }

        #[test]
        fn end_date_inverts_day_count(offset in 0i64..20_000, n in 1i64..400) {
            let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Days::new(offset as u64);
            let end = calculate_end_date(start, n).unwrap();
            prop_assume!(!is_full_calendar_month(start, end));

            let days = calculate_duration_days(start, end, &BillingConfig::default()).unwrap();
            prop_assert_eq!(days, n);
            prop_assert!(end.num_days_from_ce() - start.num_days_from_ce() == (n - 1) as i32);
        }
    }
}
