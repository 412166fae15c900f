//! Billing calculator service
//!
//! Bundles a validated [`BillingConfig`] with a [`Clock`] and exposes every
//! billing calculation as a method, so callers configure the engine once.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use core_kernel::BookingInterval;
use crate::allocation::{
    allocate_period_amounts, calculate_period_amount_from_totals, OneTimeChargePlacement,
    PeriodAmount,
};
use crate::billing_period::{calculate_billing_periods, BillingPeriod, BillingSchedule};
use crate::campaign::{compute_campaign_totals, AssetBooking, Campaign, CampaignTotals};
use crate::clock::{Clock, SystemClock};
use crate::config::BillingConfig;
use crate::duration::{
    booking_interval, calculate_days_from_months, calculate_duration_days, calculate_end_date,
    calculate_months_from_days, DayCountPolicy,
};
use crate::error::BillingResult;
use crate::line_item::{calculate_line_item_totals, BookingDuration, LineItemPricing, LineItemTotals};
use crate::pro_rata::pro_rata;
use crate::validation::{validate_duration, DurationValidation};

/// Entry point for billing calculations
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use domain_billing::{BillingCalculator, BillingConfig, FixedClock};
///
/// let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
/// let calculator = BillingCalculator::new(BillingConfig::default())
///     .unwrap()
///     .with_clock(FixedClock(today));
///
/// let start = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 7, 31).unwrap();
/// let days = calculator.duration_days(start, end).unwrap();
/// assert_eq!(calculator.pro_rata(dec!(30000), days), dec!(30000));
/// ```
#[derive(Debug, Clone)]
pub struct BillingCalculator<C: Clock = SystemClock> {
    config: BillingConfig,
    clock: C,
}

impl BillingCalculator<SystemClock> {
    /// Creates a calculator on the system clock
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails validation.
    pub fn new(config: BillingConfig) -> BillingResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            clock: SystemClock,
        })
    }

    /// Creates a calculator from `BILLING_*` environment variables
    pub fn from_env() -> BillingResult<Self> {
        Self::new(BillingConfig::load()?)
    }
}

impl<C: Clock> BillingCalculator<C> {
    /// Replaces the clock
    pub fn with_clock<D: Clock>(self, clock: D) -> BillingCalculator<D> {
        BillingCalculator {
            config: self.config,
            clock,
        }
    }

    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn duration_days(&self, start: NaiveDate, end: NaiveDate) -> BillingResult<i64> {
        calculate_duration_days(start, end, &self.config)
    }

    pub fn day_count(&self, policy: DayCountPolicy, start: NaiveDate, end: NaiveDate) -> BillingResult<i64> {
        policy.count(start, end, &self.config)
    }

    pub fn end_date(&self, start: NaiveDate, duration_days: i64) -> BillingResult<NaiveDate> {
        calculate_end_date(start, duration_days)
    }

    pub fn months_from_days(&self, days: i64) -> i64 {
        calculate_months_from_days(days, &self.config)
    }

    pub fn days_from_months(&self, months: Decimal) -> i64 {
        calculate_days_from_months(months, &self.config)
    }

    pub fn pro_rata(&self, monthly_rate: Decimal, days: i64) -> Decimal {
        pro_rata(monthly_rate, days, &self.config)
    }

    pub fn line_item_totals(&self, pricing: &LineItemPricing) -> LineItemTotals {
        calculate_line_item_totals(pricing, &self.config)
    }

    pub fn campaign_totals(
        &self,
        campaign: &Campaign,
        assets: &[AssetBooking],
        manual_discount_override: Option<Decimal>,
    ) -> BillingResult<CampaignTotals> {
        compute_campaign_totals(campaign, assets, manual_discount_override, self.today(), &self.config)
    }

    pub fn billing_periods(&self, start: NaiveDate, end: NaiveDate) -> BillingResult<BillingSchedule> {
        let interval = booking_interval(start, end)?;
        Ok(self.billing_periods_for(&interval))
    }

    pub fn billing_periods_for(&self, interval: &BookingInterval) -> BillingSchedule {
        calculate_billing_periods(interval, self.today(), &self.config)
    }

    pub fn period_amount(
        &self,
        period: &BillingPeriod,
        totals: &CampaignTotals,
        include_printing: bool,
        include_mounting: bool,
    ) -> BillingResult<PeriodAmount> {
        calculate_period_amount_from_totals(period, totals, include_printing, include_mounting)
    }

    pub fn period_amounts(
        &self,
        totals: &CampaignTotals,
        placement: OneTimeChargePlacement,
    ) -> BillingResult<Vec<PeriodAmount>> {
        allocate_period_amounts(totals, placement)
    }

    pub fn validate_duration(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        duration: &BookingDuration,
    ) -> DurationValidation {
        validate_duration(start, end, duration, &self.config)
    }
}
