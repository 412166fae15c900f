//! Calendar-month billing periods
//!
//! A booking longer than one billing cycle is split into calendar-month
//! slices, clipped to the booking at both ends. Each slice carries its own
//! pro-rata factor; a slice covering a whole calendar month always counts as
//! exactly one cycle.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use core_kernel::temporal::{
    first_day_of_month, first_day_of_next_month, is_full_calendar_month, last_day_of_month,
    month_key, month_label, same_month,
};
use core_kernel::{round_half_up, BookingInterval};
use crate::config::BillingConfig;

/// One calendar-month slice of a booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingPeriod {
    /// `YYYY-MM`
    pub month_key: String,
    /// `Mon YYYY`
    pub label: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub days_in_period: i64,
    pub pro_rata_factor: Decimal,
    pub is_first_month: bool,
    pub is_last_month: bool,
    pub is_current_month: bool,
}

impl BillingPeriod {
    fn new(period_start: NaiveDate, period_end: NaiveDate, days_in_period: i64, pro_rata_factor: Decimal, today: NaiveDate) -> Self {
        Self {
            month_key: month_key(period_start),
            label: month_label(period_start),
            period_start,
            period_end,
            days_in_period,
            pro_rata_factor,
            is_first_month: false,
            is_last_month: false,
            is_current_month: same_month(period_start, today),
        }
    }

    /// True when the period is a whole calendar month
    pub fn is_full_month(&self) -> bool {
        is_full_calendar_month(self.period_start, self.period_end)
    }
}

/// Ordered billing periods of one booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingSchedule {
    pub periods: Vec<BillingPeriod>,
    /// Set when the period cap cut the schedule short
    pub truncated: bool,
}

impl BillingSchedule {
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BillingPeriod> {
        self.periods.iter()
    }

    /// Sum of every period's pro-rata factor
    pub fn total_factor(&self) -> Decimal {
        self.periods.iter().map(|p| p.pro_rata_factor).sum()
    }

    pub fn into_periods(self) -> Vec<BillingPeriod> {
        self.periods
    }
}

/// Splits a booking into billing periods
///
/// Bookings of at most one cycle produce a single period whose factor is
/// `days / cycle_days` rounded to 2 dp. Longer bookings walk calendar
/// months from the start month to the end month. At most
/// `config.max_periods` periods are produced; anything beyond is dropped and
/// the schedule is flagged as truncated.
pub fn calculate_billing_periods(interval: &BookingInterval, today: NaiveDate, config: &BillingConfig) -> BillingSchedule {
    let total_days = interval.inclusive_days();

    if total_days <= i64::from(config.cycle_days) {
        let factor = round_half_up(config.per_cycle(Decimal::from(total_days)), 2);
        let mut period = BillingPeriod::new(interval.start(), interval.end(), total_days, factor, today);
        period.is_first_month = true;
        period.is_last_month = true;

        return BillingSchedule {
            periods: vec![period],
            truncated: false,
        };
    }

    let mut periods = Vec::new();
    let mut cursor = Some(first_day_of_month(interval.start()));

    while let Some(month_start) = cursor {
        if month_start > interval.end() || periods.len() >= config.max_periods {
            break;
        }

        let period_start = month_start.max(interval.start());
        let period_end = last_day_of_month(month_start).min(interval.end());

        let (days, factor) = if is_full_calendar_month(period_start, period_end) {
            (i64::from(config.cycle_days), Decimal::ONE)
        } else {
            let days = (period_end - period_start).num_days() + 1;
            (days, config.per_cycle(Decimal::from(days)))
        };

        periods.push(BillingPeriod::new(period_start, period_end, days, factor, today));
        cursor = first_day_of_next_month(month_start);
    }

    let truncated = cursor.is_some_and(|next| next <= interval.end());
    if truncated {
        warn!(
            %interval,
            max_periods = config.max_periods,
            "Billing period cap reached, schedule truncated"
        );
    }

    if let Some(first) = periods.first_mut() {
        first.is_first_month = true;
    }
    if let Some(last) = periods.last_mut() {
        last.is_last_month = true;
    }

    debug!(%interval, periods = periods.len(), "Split booking into billing periods");

    BillingSchedule { periods, truncated }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn periods_tile_the_booking(offset in 0u64..10_000, len in 0u64..1_500) {
            let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Days::new(offset);
            let end = start + chrono::Days::new(len);
            let booking = BookingInterval::new(start, end).unwrap();
            let schedule = calculate_billing_periods(&booking, start, &BillingConfig::default());

            prop_assert!(!schedule.truncated);
            prop_assert_eq!(schedule.periods.first().unwrap().period_start, start);
            prop_assert_eq!(schedule.periods.last().unwrap().period_end, end);

            for pair in schedule.periods.windows(2) {
                prop_assert_eq!(pair[0].period_end + chrono::Days::new(1), pair[1].period_start);
            }

            let firsts = schedule.iter().filter(|p| p.is_first_month).count();
            let lasts = schedule.iter().filter(|p| p.is_last_month).count();
            prop_assert_eq!(firsts, 1);
            prop_assert_eq!(lasts, 1);

            if schedule.len() > 1 && schedule.iter().all(|p| !p.is_full_month()) {
                let days: i64 = schedule.iter().map(|p| p.days_in_period).sum();
                prop_assert_eq!(days, booking.inclusive_days());
            }
        }
    }
}
