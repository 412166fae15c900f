//! Optional pre-checks for booking durations
//!
//! Validation never fails: it reports whether a duration is acceptable and
//! why not, and the caller decides whether to block. The calculations
//! themselves still reject reversed ranges on their own.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::temporal::first_day_of_month;
use crate::config::BillingConfig;
use crate::duration::{calculate_days_from_months, calculate_end_date};
use crate::line_item::BookingDuration;

/// Outcome of [`validate_duration`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationValidation {
    pub is_valid: bool,
    pub message: Option<String>,
}

impl DurationValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: Some(message.into()),
        }
    }
}

/// Checks a booking's dates and duration before pricing
///
/// A start date is always required. In day mode the end date is required,
/// may not precede the start, and the day count must be at least one. In
/// month mode the count must be a positive whole or half month. Bookings
/// spanning more calendar months than `config.max_periods` are rejected,
/// since their billing schedule would be truncated.
pub fn validate_duration(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    duration: &BookingDuration,
    config: &BillingConfig,
) -> DurationValidation {
    let Some(start) = start else {
        return DurationValidation::invalid("Start date is required");
    };

    let end = match *duration {
        BookingDuration::Days(days) => {
            let Some(end) = end else {
                return DurationValidation::invalid("End date is required");
            };
            if end < start {
                return DurationValidation::invalid("End date cannot be before start date");
            }
            if days < 1 {
                return DurationValidation::invalid("Duration must be at least 1 day");
            }
            end
        }
        BookingDuration::Month(months) => {
            if months <= Decimal::ZERO {
                return DurationValidation::invalid("Duration must be at least half a month");
            }
            if !(months * dec!(2)).fract().is_zero() {
                return DurationValidation::invalid("Month duration must be in whole or half months");
            }
            match end {
                Some(end) if end < start => {
                    return DurationValidation::invalid("End date cannot be before start date");
                }
                Some(end) => end,
                None => {
                    let days = calculate_days_from_months(months, config);
                    match calculate_end_date(start, days) {
                        Ok(end) => end,
                        Err(_) => return DurationValidation::invalid("End date is out of range"),
                    }
                }
            }
        }
    };

    if months_spanned(start, end) > config.max_periods {
        return DurationValidation::invalid(format!(
            "Booking cannot span more than {} billing months",
            config.max_periods
        ));
    }

    DurationValidation::valid()
}

/// Calendar months touched by `[start, end]`
fn months_spanned(start: NaiveDate, end: NaiveDate) -> usize {
    let from = first_day_of_month(start);
    let to = first_day_of_month(end);
    let months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32 + 1;
    usize::try_from(months).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn check(start: Option<NaiveDate>, end: Option<NaiveDate>, duration: BookingDuration) -> DurationValidation {
        validate_duration(start, end, &duration, &BillingConfig::default())
    }

    #[test]
    fn test_valid_day_booking() {
        let result = check(Some(date(2024, 7, 1)), Some(date(2024, 7, 15)), BookingDuration::Days(15));
        assert_eq!(result, DurationValidation::valid());
    }

    #[test]
    fn test_missing_dates() {
        let result = check(None, Some(date(2024, 7, 15)), BookingDuration::Days(15));
        assert_eq!(result.message.as_deref(), Some("Start date is required"));

        let result = check(Some(date(2024, 7, 1)), None, BookingDuration::Days(15));
        assert_eq!(result.message.as_deref(), Some("End date is required"));
    }

    #[test]
    fn test_reversed_dates() {
        let result = check(Some(date(2024, 7, 15)), Some(date(2024, 7, 1)), BookingDuration::Days(15));
        assert!(!result.is_valid);
        assert_eq!(result.message.as_deref(), Some("End date cannot be before start date"));

        let result = check(Some(date(2024, 7, 15)), Some(date(2024, 7, 1)), BookingDuration::Month(dec!(1)));
        assert!(!result.is_valid);
    }

    #[test]
    fn test_zero_days() {
        let result = check(Some(date(2024, 7, 1)), Some(date(2024, 7, 1)), BookingDuration::Days(0));
        assert_eq!(result.message.as_deref(), Some("Duration must be at least 1 day"));
    }

    #[test]
    fn test_month_counts() {
        assert!(check(Some(date(2024, 7, 1)), None, BookingDuration::Month(dec!(1.5))).is_valid);
        assert!(check(Some(date(2024, 7, 1)), None, BookingDuration::Month(dec!(3))).is_valid);

        let result = check(Some(date(2024, 7, 1)), None, BookingDuration::Month(dec!(1.25)));
        assert_eq!(result.message.as_deref(), Some("Month duration must be in whole or half months"));

        let result = check(Some(date(2024, 7, 1)), None, BookingDuration::Month(Decimal::ZERO));
        assert!(!result.is_valid);
    }

    #[test]
    fn test_span_beyond_cap() {
        let config = BillingConfig::default().with_max_periods(6);
        let result = validate_duration(
            Some(date(2024, 1, 15)),
            Some(date(2024, 7, 1)),
            &BookingDuration::Days(169),
            &config,
        );
        assert_eq!(
            result.message.as_deref(),
            Some("Booking cannot span more than 6 billing months")
        );

        let result = validate_duration(
            Some(date(2024, 1, 15)),
            Some(date(2024, 6, 30)),
            &BookingDuration::Days(168),
            &config,
        );
        assert!(result.is_valid);
    }

    #[test]
    fn test_months_spanned() {
        assert_eq!(months_spanned(date(2024, 7, 31), date(2024, 8, 1)), 2);
        assert_eq!(months_spanned(date(2024, 12, 1), date(2025, 1, 31)), 2);
        assert_eq!(months_spanned(date(2024, 7, 1), date(2024, 7, 31)), 1);
    }
}
