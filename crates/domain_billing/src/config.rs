//! Billing engine configuration
//!
//! The billing cycle length and the period cap are configuration, threaded
//! through every calculation, so alternate cycles can be exercised without
//! touching the calculations themselves.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use core_kernel::Currency;
use crate::error::{BillingError, BillingResult};

/// Configuration for the billing engine
///
/// Loaded from `BILLING_*` environment variables:
///
/// * `BILLING_CYCLE_DAYS` - days in one billing cycle (default: 30)
/// * `BILLING_MAX_PERIODS` - cap on generated billing periods (default: 120)
/// * `BILLING_DEFAULT_GST_RATE` - GST percentage when a campaign has none (default: 18)
/// * `BILLING_CURRENCY` - ISO code of billed amounts (default: INR)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    /// Days in one billing cycle; the denominator of every monthly-to-daily conversion
    pub cycle_days: u32,
    /// Maximum number of billing periods generated for one booking
    pub max_periods: usize,
    /// GST percentage applied when the campaign does not carry its own
    pub default_gst_rate: Decimal,
    /// Currency of all billed amounts
    pub currency: Currency,
}

impl BillingConfig {
    pub const DEFAULT_CYCLE_DAYS: u32 = 30;
    pub const DEFAULT_MAX_PERIODS: usize = 120;

    /// Loads configuration from environment, reading a local `.env` first
    pub fn load() -> BillingResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Loads configuration from `BILLING_*` environment variables
    pub fn from_env() -> BillingResult<Self> {
        Self::from_env_prefix("BILLING")
    }

    /// Loads configuration from environment variables with a custom prefix
    pub fn from_env_prefix(prefix: &str) -> BillingResult<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix(prefix).try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| BillingError::configuration(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Sets the billing cycle length
    pub fn with_cycle_days(mut self, days: u32) -> Self {
        self.cycle_days = days;
        self
    }

    /// Sets the billing period cap
    pub fn with_max_periods(mut self, max_periods: usize) -> Self {
        self.max_periods = max_periods;
        self
    }

    /// Sets the default GST percentage
    pub fn with_default_gst_rate(mut self, rate: Decimal) -> Self {
        self.default_gst_rate = rate;
        self
    }

    /// Sets the billing currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Checks the configuration can drive calculations
    pub fn validate(&self) -> BillingResult<()> {
        if self.cycle_days == 0 {
            return Err(BillingError::configuration("cycle_days must be positive"));
        }
        if self.max_periods == 0 {
            return Err(BillingError::configuration("max_periods must be positive"));
        }
        if self.default_gst_rate.is_sign_negative() {
            return Err(BillingError::configuration("default_gst_rate cannot be negative"));
        }
        Ok(())
    }

    /// Billing cycle length as a decimal
    pub fn cycle_days_decimal(&self) -> Decimal {
        Decimal::from(self.cycle_days)
    }

    /// `value / cycle_days`, zero for a zero-length cycle
    pub(crate) fn per_cycle(&self, value: Decimal) -> Decimal {
        value
            .checked_div(self.cycle_days_decimal())
            .unwrap_or(Decimal::ZERO)
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            cycle_days: Self::DEFAULT_CYCLE_DAYS,
            max_periods: Self::DEFAULT_MAX_PERIODS,
            default_gst_rate: dec!(18),
            currency: Currency::INR,
        }
    }
}
