//! Per-line pricing for a booked asset
//!
//! A line carries monthly base, card and negotiated rates plus optional
//! printing and mounting rates. A duration factor scales every rate; each
//! scaled field is rounded on its own before anything is summed.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::round_amount;
use crate::config::BillingConfig;

/// How a line's duration was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DurationMode {
    Days,
    Month,
}

/// A line's booked duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingDuration {
    /// Billable days; the factor is `days / cycle_days`
    Days(i64),
    /// Month count (whole or half), used directly as the factor
    Month(Decimal),
}

impl BookingDuration {
    pub fn mode(&self) -> DurationMode {
        match self {
            BookingDuration::Days(_) => DurationMode::Days,
            BookingDuration::Month(_) => DurationMode::Month,
        }
    }

    /// Multiplier applied to monthly rates, never negative
    pub fn factor(&self, config: &BillingConfig) -> Decimal {
        match *self {
            BookingDuration::Days(days) if days > 0 => config.per_cycle(Decimal::from(days)),
            BookingDuration::Days(_) => Decimal::ZERO,
            BookingDuration::Month(months) => months.max(Decimal::ZERO),
        }
    }
}

/// Monthly rates of one line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemPricing {
    /// Internal cost rate, reporting only
    pub base_rate_month: Decimal,
    /// List rate, reporting only
    pub card_rate_month: Decimal,
    /// Agreed rate; the one actually billed
    pub negotiated_rate_month: Decimal,
    #[serde(default)]
    pub printing_rate_month: Option<Decimal>,
    #[serde(default)]
    pub mounting_rate_month: Option<Decimal>,
    pub duration: BookingDuration,
}

impl LineItemPricing {
    /// Creates a line billed at `negotiated_rate_month`, with card and base
    /// rates defaulting to the same value
    pub fn new(negotiated_rate_month: Decimal, duration: BookingDuration) -> Self {
        Self {
            base_rate_month: negotiated_rate_month,
            card_rate_month: negotiated_rate_month,
            negotiated_rate_month,
            printing_rate_month: None,
            mounting_rate_month: None,
            duration,
        }
    }

    pub fn with_base_rate(mut self, rate: Decimal) -> Self {
        self.base_rate_month = rate;
        self
    }

    pub fn with_card_rate(mut self, rate: Decimal) -> Self {
        self.card_rate_month = rate;
        self
    }

    pub fn with_printing_rate(mut self, rate: Decimal) -> Self {
        self.printing_rate_month = Some(rate);
        self
    }

    pub fn with_mounting_rate(mut self, rate: Decimal) -> Self {
        self.mounting_rate_month = Some(rate);
        self
    }
}

/// Scaled totals of one line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemTotals {
    pub line_base_rate: Decimal,
    pub line_card_rate: Decimal,
    pub line_negotiation_rate: Decimal,
    pub line_printing_charge: Decimal,
    pub line_mounting_charge: Decimal,
    /// Negotiated + printing + mounting; base and card are not billed
    pub line_subtotal: Decimal,
    pub duration_factor: Decimal,
    /// Card total minus negotiated total, never negative
    pub discount_amount: Decimal,
    pub discount_percent: Decimal,
    /// Negotiated total minus base total; negative for a loss
    pub profit_amount: Decimal,
    pub profit_percent: Decimal,
}

impl LineItemTotals {
    /// True when the negotiated rate is below the internal cost
    pub fn is_loss(&self) -> bool {
        self.profit_amount.is_sign_negative() && !self.profit_amount.is_zero()
    }
}

/// Scales a line's monthly rates by its duration factor
pub fn calculate_line_item_totals(pricing: &LineItemPricing, config: &BillingConfig) -> LineItemTotals {
    let factor = pricing.duration.factor(config);
    let scale = |rate: Decimal| round_amount(rate * factor);

    let line_base_rate = scale(pricing.base_rate_month);
    let line_card_rate = scale(pricing.card_rate_month);
    let line_negotiation_rate = scale(pricing.negotiated_rate_month);
    let line_printing_charge = scale(pricing.printing_rate_month.unwrap_or_default());
    let line_mounting_charge = scale(pricing.mounting_rate_month.unwrap_or_default());

    let line_subtotal = line_negotiation_rate + line_printing_charge + line_mounting_charge;

    let discount_amount = (line_card_rate - line_negotiation_rate).max(Decimal::ZERO);
    let profit_amount = line_negotiation_rate - line_base_rate;

    LineItemTotals {
        line_base_rate,
        line_card_rate,
        line_negotiation_rate,
        line_printing_charge,
        line_mounting_charge,
        line_subtotal,
        duration_factor: factor,
        discount_amount,
        discount_percent: percent_of(discount_amount, line_card_rate),
        profit_amount,
        profit_percent: percent_of(profit_amount, line_base_rate),
    }
}

/// `part / whole * 100` rounded to 2 dp, zero when `whole` is zero
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    round_amount(part / whole * dec!(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BillingConfig {
        BillingConfig::default()
    }

    #[test]
    fn test_days_mode_factor() {
        assert_eq!(BookingDuration::Days(15).factor(&config()), dec!(0.5));
        assert_eq!(BookingDuration::Days(30).factor(&config()), Decimal::ONE);
        assert_eq!(BookingDuration::Days(0).factor(&config()), Decimal::ZERO);
        assert_eq!(BookingDuration::Days(-4).factor(&config()), Decimal::ZERO);
        assert_eq!(BookingDuration::Days(15).mode(), DurationMode::Days);
    }

    #[test]
    fn test_month_mode_uses_count_directly() {
        assert_eq!(BookingDuration::Month(dec!(2.5)).factor(&config()), dec!(2.5));
        assert_eq!(BookingDuration::Month(dec!(-1)).factor(&config()), Decimal::ZERO);
        assert_eq!(BookingDuration::Month(dec!(1)).mode(), DurationMode::Month);
    }

    #[test]
    fn test_full_line() {
        let pricing = LineItemPricing::new(dec!(45000), BookingDuration::Month(dec!(2)))
            .with_base_rate(dec!(30000))
            .with_card_rate(dec!(50000))
            .with_printing_rate(dec!(4000))
            .with_mounting_rate(dec!(1500));

        let totals = calculate_line_item_totals(&pricing, &config());

        assert_eq!(totals.line_base_rate, dec!(60000));
        assert_eq!(totals.line_card_rate, dec!(100000));
        assert_eq!(totals.line_negotiation_rate, dec!(90000));
        assert_eq!(totals.line_printing_charge, dec!(8000));
        assert_eq!(totals.line_mounting_charge, dec!(3000));
        assert_eq!(totals.line_subtotal, dec!(101000));
        assert_eq!(totals.discount_amount, dec!(10000));
        assert_eq!(totals.discount_percent, dec!(10));
        assert_eq!(totals.profit_amount, dec!(30000));
        assert_eq!(totals.profit_percent, dec!(50));
        assert!(!totals.is_loss());
    }

    #[test]
    fn test_each_field_is_rounded_before_summing() {
        // 0.5 x 1000.01 = 500.005 -> 500.01, 0.5 x 0.01 = 0.005 -> 0.01 (twice).
        // Rounding once at the end would give round(500.015) = 500.02.
        let pricing = LineItemPricing::new(dec!(1000.01), BookingDuration::Days(15))
            .with_printing_rate(dec!(0.01))
            .with_mounting_rate(dec!(0.01));

        let totals = calculate_line_item_totals(&pricing, &config());

        assert_eq!(totals.line_negotiation_rate, dec!(500.01));
        assert_eq!(totals.line_printing_charge, dec!(0.01));
        assert_eq!(totals.line_mounting_charge, dec!(0.01));
        assert_eq!(totals.line_subtotal, dec!(500.03));
    }

    #[test]
    fn test_repeating_factor_rounds_per_field() {
        let pricing = LineItemPricing::new(dec!(1000), BookingDuration::Days(10))
            .with_card_rate(dec!(1200))
            .with_base_rate(dec!(800));

        let totals = calculate_line_item_totals(&pricing, &config());

        assert_eq!(totals.line_negotiation_rate, dec!(333.33));
        assert_eq!(totals.line_card_rate, dec!(400.00));
        assert_eq!(totals.line_base_rate, dec!(266.67));
        assert_eq!(totals.discount_amount, dec!(66.67));
        assert_eq!(totals.discount_percent, dec!(16.67));
        assert_eq!(totals.profit_amount, dec!(66.66));
        assert_eq!(totals.profit_percent, dec!(25.00));
    }

    #[test]
    fn test_loss_is_not_clamped() {
        let pricing = LineItemPricing::new(dec!(20000), BookingDuration::Days(30))
            .with_base_rate(dec!(25000));

        let totals = calculate_line_item_totals(&pricing, &config());

        assert_eq!(totals.profit_amount, dec!(-5000));
        assert_eq!(totals.profit_percent, dec!(-20));
        assert!(totals.is_loss());
    }

    #[test]
    fn test_negotiated_above_card_has_no_discount() {
        let pricing = LineItemPricing::new(dec!(55000), BookingDuration::Days(30))
            .with_card_rate(dec!(50000));

        let totals = calculate_line_item_totals(&pricing, &config());
        assert_eq!(totals.discount_amount, Decimal::ZERO);
        assert_eq!(totals.discount_percent, Decimal::ZERO);
    }

    #[test]
    fn test_zero_card_and_base_rates() {
        let pricing = LineItemPricing::new(dec!(10000), BookingDuration::Days(30))
            .with_card_rate(Decimal::ZERO)
            .with_base_rate(Decimal::ZERO);

        let totals = calculate_line_item_totals(&pricing, &config());
        assert_eq!(totals.discount_percent, Decimal::ZERO);
        assert_eq!(totals.profit_percent, Decimal::ZERO);
        assert_eq!(totals.profit_amount, dec!(10000));
    }

    #[test]
    fn test_duration_serializes_with_mode_tag() {
        let json = serde_json::to_string(&BookingDuration::Month(dec!(1.5))).unwrap();
        assert_eq!(json, r#"{"mode":"MONTH","value":"1.5"}"#);

        let days: BookingDuration = serde_json::from_str(r#"{"mode":"DAYS","value":12}"#).unwrap();
        assert_eq!(days, BookingDuration::Days(12));
    }
}
