//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Days, NaiveDate};
use core_kernel::BookingInterval;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating dates between 2020-01-01 and roughly 2030
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..3650u64).prop_map(|offset| base_date() + Days::new(offset))
}

/// Strategy for generating valid booking intervals up to `max_days` long
pub fn interval_strategy(max_days: u64) -> impl Strategy<Value = BookingInterval> {
    (date_strategy(), 0u64..max_days).prop_map(|(start, extra)| {
        BookingInterval::new(start, start + Days::new(extra))
            .expect("Generated end is never before start")
    })
}

/// Strategy for intervals that never form a full calendar month
pub fn partial_month_interval_strategy(max_days: u64) -> impl Strategy<Value = BookingInterval> {
    interval_strategy(max_days).prop_filter("full calendar month", |interval| {
        !interval.is_full_calendar_month()
    })
}

/// Strategy for monthly rates between 1.00 and 10,000,000.00
pub fn monthly_rate_strategy() -> impl Strategy<Value = Decimal> {
    (100i64..1_000_000_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

/// Strategy for non-negative amounts such as printing or discounts
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

/// Strategy for amounts that may be negative
pub fn signed_amount_strategy() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

/// Strategy for GST percentages commonly seen on invoices
pub fn gst_rate_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::ZERO),
        Just(Decimal::from(5)),
        Just(Decimal::from(12)),
        Just(Decimal::from(18)),
        Just(Decimal::from(28)),
    ]
}

/// Strategy for month counts in half-month steps from 0.5 to 24
pub fn half_month_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=48i64).prop_map(|halves| Decimal::new(halves * 5, 1))
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("2020-01-01 is a valid date")
}
