//! Billing Domain - Pro-Rata Billing Engine
//!
//! This crate turns monthly advertising rates, booking date ranges and
//! campaign line items into taxable amounts, GST, discounts and calendar-month
//! billing breakdowns. Every calculation is a pure function of its inputs.
//!
//! # Components
//!
//! - **Duration**: billable day counts, with a full calendar month counted
//!   as one billing cycle
//! - **Pro-rata**: monthly rate scaled to a day count on the billing cycle
//! - **Line items**: per-line rates scaled by a duration factor, with
//!   discount and profit
//! - **Campaign totals**: gross, discount, taxable, GST and grand total
//! - **Billing periods**: calendar-month slices and proportional rent split
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{BillingCalculator, BillingConfig, OneTimeChargePlacement};
//!
//! let calculator = BillingCalculator::new(BillingConfig::default())?;
//! let totals = calculator.campaign_totals(&campaign, &assets, None)?;
//! let invoices = calculator.period_amounts(&totals, OneTimeChargePlacement::FirstPeriod)?;
//! ```

pub mod allocation;
pub mod billing_period;
pub mod calculator;
pub mod campaign;
pub mod clock;
pub mod config;
pub mod duration;
pub mod error;
pub mod line_item;
pub mod pro_rata;
pub mod validation;

pub use allocation::{
    allocate_period_amounts, calculate_period_amount_from_totals, OneTimeChargePlacement,
    PeriodAmount,
};
pub use billing_period::{calculate_billing_periods, BillingPeriod, BillingSchedule};
pub use calculator::BillingCalculator;
pub use campaign::{compute_campaign_totals, AssetBooking, Campaign, CampaignTotals};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::BillingConfig;
pub use duration::{
    booking_interval, calculate_days_from_months, calculate_duration_days, calculate_end_date,
    calculate_months_from_days, simple_inclusive_days, DayCountPolicy,
};
pub use error::{BillingError, BillingResult};
pub use line_item::{
    calculate_line_item_totals, BookingDuration, DurationMode, LineItemPricing, LineItemTotals,
};
pub use pro_rata::{daily_rate, pro_rata};
pub use validation::{validate_duration, DurationValidation};
