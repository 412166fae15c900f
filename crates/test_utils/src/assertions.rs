//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for billing types that give
//! more meaningful error messages than standard assertions.

use chrono::Days;
use core_kernel::{BookingInterval, Money};
use domain_billing::{BillingPeriod, CampaignTotals};
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    assert_decimal_approx_eq(actual.amount(), expected.amount(), tolerance);
}

/// Asserts that two decimals differ by at most `tolerance`
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that a decimal carries at most two decimal places
pub fn assert_rounded_to_paisa(value: Decimal) {
    assert!(
        value.normalize().scale() <= 2,
        "Expected an amount rounded to 2 decimal places, got {}",
        value
    );
}

/// Asserts that periods are contiguous, non-overlapping, and cover `interval`
pub fn assert_periods_tile(periods: &[BillingPeriod], interval: &BookingInterval) {
    let first = periods.first().expect("Expected at least one billing period");
    let last = periods.last().expect("Expected at least one billing period");

    assert_eq!(first.period_start, interval.start(), "First period must start at the interval start");
    assert_eq!(last.period_end, interval.end(), "Last period must end at the interval end");

    for pair in periods.windows(2) {
        let next_day = pair[0].period_end + Days::new(1);
        assert_eq!(
            pair[1].period_start, next_day,
            "Gap or overlap between {} and {}",
            pair[0].month_key, pair[1].month_key
        );
    }

    for period in periods {
        assert!(
            period.period_start <= period.period_end,
            "Period {} ends before it starts",
            period.month_key
        );
    }
}

/// Asserts the campaign totals arithmetic identities
///
/// `taxable == gross - discount`, `grand_total == taxable + gst`, and the
/// discount lies within `[0, gross]`.
pub fn assert_totals_consistent(totals: &CampaignTotals) {
    assert!(
        !totals.manual_discount_amount.is_negative(),
        "Discount is negative: {}",
        totals.manual_discount_amount
    );
    assert!(
        totals.manual_discount_amount.amount() <= totals.gross_amount.amount(),
        "Discount {} exceeds gross {}",
        totals.manual_discount_amount,
        totals.gross_amount
    );
    assert_eq!(
        totals.taxable_amount,
        totals.gross_amount - totals.manual_discount_amount,
        "Taxable must equal gross minus discount"
    );
    assert_eq!(
        totals.grand_total,
        totals.taxable_amount + totals.gst_amount,
        "Grand total must equal taxable plus GST"
    );
}
