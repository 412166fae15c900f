//! Per-period invoice amounts
//!
//! Splits a campaign's display rent and manual discount across its billing
//! periods in proportion to each period's pro-rata factor. One-time printing
//! and mounting charges are added only where the caller asks for them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, Rate};
use crate::billing_period::BillingPeriod;
use crate::campaign::CampaignTotals;
use crate::error::BillingResult;

/// Invoice amounts for one billing period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodAmount {
    pub month_key: String,
    pub base_rent: Money,
    pub printing_charge: Money,
    pub mounting_charge: Money,
    pub discount_share: Money,
    /// Rent plus included one-time charges, less the discount share
    pub subtotal: Money,
    pub gst_amount: Money,
    pub total: Money,
}

/// Where one-time printing and mounting charges are invoiced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OneTimeChargePlacement {
    /// On the first period's invoice
    #[default]
    FirstPeriod,
    /// On the last period's invoice
    LastPeriod,
    /// On no period invoice; billed separately
    Excluded,
}

impl OneTimeChargePlacement {
    fn applies_to(&self, period: &BillingPeriod) -> bool {
        match self {
            OneTimeChargePlacement::FirstPeriod => period.is_first_month,
            OneTimeChargePlacement::LastPeriod => period.is_last_month,
            OneTimeChargePlacement::Excluded => false,
        }
    }
}

/// Invoice amounts for `period` derived from the campaign totals
///
/// With at most one billing month the period takes the full display cost
/// and the full discount. Otherwise both are shared by
/// `factor / sum(factors)`, each share rounded to 2 dp, and the last period
/// takes whatever the earlier rounded shares leave, so the shares always sum
/// to the campaign amounts exactly.
///
/// # Errors
///
/// Returns [`crate::BillingError::Money`] when the totals mix currencies.
pub fn calculate_period_amount_from_totals(
    period: &BillingPeriod,
    totals: &CampaignTotals,
    include_printing: bool,
    include_mounting: bool,
) -> BillingResult<PeriodAmount> {
    let currency = totals.currency;

    let (base_rent, discount_share) = if totals.total_months <= 1 {
        (totals.display_cost, totals.manual_discount_amount)
    } else {
        (
            period_share(&totals.display_cost, period, totals)?,
            period_share(&totals.manual_discount_amount, period, totals)?,
        )
    };

    let printing_charge = if include_printing {
        totals.printing_cost
    } else {
        Money::zero(currency)
    };
    let mounting_charge = if include_mounting {
        totals.mounting_cost
    } else {
        Money::zero(currency)
    };

    let subtotal = base_rent
        .checked_add(&printing_charge)?
        .checked_add(&mounting_charge)?
        .checked_sub(&discount_share)?;
    let gst_amount = Rate::from_percentage(totals.gst_rate).apply(&subtotal);
    let total = subtotal.checked_add(&gst_amount)?;

    Ok(PeriodAmount {
        month_key: period.month_key.clone(),
        base_rent,
        printing_charge,
        mounting_charge,
        discount_share,
        subtotal,
        gst_amount,
        total,
    })
}

/// Invoice amounts for every billing period of a campaign
///
/// # Errors
///
/// Returns [`crate::BillingError::Money`] when the totals mix currencies.
pub fn allocate_period_amounts(
    totals: &CampaignTotals,
    placement: OneTimeChargePlacement,
) -> BillingResult<Vec<PeriodAmount>> {
    totals
        .billing_periods
        .iter()
        .map(|period| {
            let include = placement.applies_to(period);
            calculate_period_amount_from_totals(period, totals, include, include)
        })
        .collect()
}

/// Share of `amount` billed in `period`
///
/// The last period carries the rounding remainder of the others.
fn period_share(amount: &Money, period: &BillingPeriod, totals: &CampaignTotals) -> BillingResult<Money> {
    if !period.is_last_month {
        return Ok(proportional_share(amount, period, totals));
    }

    let mut remainder = *amount;
    for other in totals.billing_periods.iter().filter(|p| !p.is_last_month) {
        remainder = remainder.checked_sub(&proportional_share(amount, other, totals))?;
    }
    Ok(remainder)
}

/// `amount * factor / sum(factors)` rounded to 2 dp, zero when every factor is zero
fn proportional_share(amount: &Money, period: &BillingPeriod, totals: &CampaignTotals) -> Money {
    let share = (amount.amount() * period.pro_rata_factor)
        .checked_div(totals.total_factor())
        .unwrap_or(Decimal::ZERO);
    Money::new(share, amount.currency())
}
