//! Campaign-level totals
//!
//! Sums every asset booking of a campaign into display, printing and
//! mounting costs, applies the manual discount and GST, and splits the
//! campaign span into billing periods.
//!
//! Asset day counts here use [`DayCountPolicy::SimpleInclusive`]: a full
//! calendar month is billed on its true length, unlike line-item pricing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use core_kernel::{AssetId, BookingId, BookingInterval, CampaignId, ClientId, Currency, Money, Rate};
use crate::billing_period::{calculate_billing_periods, BillingPeriod};
use crate::config::BillingConfig;
use crate::duration::{booking_interval, DayCountPolicy};
use crate::error::BillingResult;
use crate::pro_rata::daily_rate;

/// Campaign record as stored by the campaign table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Stored manual discount, used when no override is supplied
    #[serde(default)]
    pub discount_amount: Decimal,
    /// GST percentage; the configured default applies when absent
    #[serde(default)]
    pub gst_rate: Option<Decimal>,
}

impl Campaign {
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: CampaignId::new_v7(),
            client_id: None,
            name: name.into(),
            start_date,
            end_date,
            discount_amount: Decimal::ZERO,
            gst_rate: None,
        }
    }

    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_discount(mut self, amount: Decimal) -> Self {
        self.discount_amount = amount;
        self
    }

    pub fn with_gst_rate(mut self, percentage: Decimal) -> Self {
        self.gst_rate = Some(percentage);
        self
    }

    /// The campaign's own booking interval
    pub fn interval(&self) -> BillingResult<BookingInterval> {
        booking_interval(self.start_date, self.end_date)
    }
}

/// One asset booked within a campaign
///
/// Dates are optional at every level; see [`AssetBooking::effective_interval`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBooking {
    pub id: BookingId,
    pub asset_id: AssetId,
    pub asset_code: String,
    #[serde(default)]
    pub booking_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub booking_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub negotiated_rate: Option<Decimal>,
    #[serde(default)]
    pub card_rate: Option<Decimal>,
    /// One-time printing charge, never pro-rated
    #[serde(default)]
    pub printing_charges: Option<Decimal>,
    /// One-time mounting charge, never pro-rated
    #[serde(default)]
    pub mounting_charges: Option<Decimal>,
}

impl AssetBooking {
    pub fn new(asset_id: AssetId, asset_code: impl Into<String>) -> Self {
        Self {
            id: BookingId::new_v7(),
            asset_id,
            asset_code: asset_code.into(),
            booking_start_date: None,
            booking_end_date: None,
            start_date: None,
            end_date: None,
            negotiated_rate: None,
            card_rate: None,
            printing_charges: None,
            mounting_charges: None,
        }
    }

    /// Booking dates resolved against the campaign
    ///
    /// Each end resolves independently: the asset's booking date, then the
    /// asset's own date, then the campaign's date.
    pub fn effective_interval(&self, campaign: &Campaign) -> BillingResult<BookingInterval> {
        let start = self
            .booking_start_date
            .or(self.start_date)
            .unwrap_or(campaign.start_date);
        let end = self
            .booking_end_date
            .or(self.end_date)
            .unwrap_or(campaign.end_date);
        booking_interval(start, end)
    }

    /// Monthly rate used for display cost: negotiated, else card, else zero
    pub fn monthly_rate(&self) -> Decimal {
        self.negotiated_rate.or(self.card_rate).unwrap_or_default()
    }
}

/// Billing summary of one campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignTotals {
    pub currency: Currency,
    pub display_cost: Money,
    pub printing_cost: Money,
    pub mounting_cost: Money,
    pub gross_amount: Money,
    pub manual_discount_amount: Money,
    /// Set when the requested discount was outside `[0, gross_amount]`
    pub discount_clamped: bool,
    pub taxable_amount: Money,
    /// GST percentage
    pub gst_rate: Decimal,
    pub gst_amount: Money,
    pub grand_total: Money,
    /// Printing plus mounting
    pub one_time_charges: Money,
    pub campaign_period_start: NaiveDate,
    pub campaign_period_end: NaiveDate,
    pub duration_days: i64,
    pub total_months: usize,
    pub monthly_display_rent: Money,
    pub billing_periods: Vec<BillingPeriod>,
    /// Set when the period cap cut `billing_periods` short
    pub periods_truncated: bool,
}

impl CampaignTotals {
    /// Sum of every billing period's pro-rata factor
    pub fn total_factor(&self) -> Decimal {
        self.billing_periods.iter().map(|p| p.pro_rata_factor).sum()
    }
}

/// Computes a campaign's billing totals from its asset bookings
///
/// `manual_discount_override` replaces the campaign's stored discount when
/// given. Either way the discount is clamped to `[0, gross_amount]`.
/// `today` only drives the current-month flag of the billing periods.
///
/// # Errors
///
/// Returns [`crate::BillingError::InvalidRange`] when an asset's (or, with no
/// assets, the campaign's) resolved end date precedes its start date.
#[instrument(skip_all, fields(campaign_id = %campaign.id, assets = assets.len()))]
pub fn compute_campaign_totals(
    campaign: &Campaign,
    assets: &[AssetBooking],
    manual_discount_override: Option<Decimal>,
    today: NaiveDate,
    config: &BillingConfig,
) -> BillingResult<CampaignTotals> {
    let currency = config.currency;

    let mut display_cost = Decimal::ZERO;
    let mut printing_cost = Decimal::ZERO;
    let mut mounting_cost = Decimal::ZERO;
    let mut span: Option<BookingInterval> = None;

    for asset in assets {
        let interval = asset.effective_interval(campaign)?;
        let days = DayCountPolicy::SimpleInclusive.count_interval(&interval, config);

        display_cost += daily_rate(asset.monthly_rate(), config) * Decimal::from(days);
        printing_cost += asset.printing_charges.unwrap_or_default();
        mounting_cost += asset.mounting_charges.unwrap_or_default();

        span = Some(match span {
            Some(current) => current.span(&interval),
            None => interval,
        });
    }

    let period = match span {
        Some(period) => period,
        None => campaign.interval()?,
    };

    let display_cost = Money::new(display_cost, currency);
    let printing_cost = Money::new(printing_cost, currency);
    let mounting_cost = Money::new(mounting_cost, currency);
    let one_time_charges = printing_cost.checked_add(&mounting_cost)?;
    let gross_amount = display_cost.checked_add(&one_time_charges)?;

    let requested = Money::new(
        manual_discount_override.unwrap_or(campaign.discount_amount),
        currency,
    );
    let (manual_discount_amount, discount_clamped) =
        requested.clamp_between(&Money::zero(currency), &gross_amount)?;
    if discount_clamped {
        warn!(
            requested = %requested,
            applied = %manual_discount_amount,
            "Manual discount clamped to gross amount"
        );
    }

    let taxable_amount = gross_amount.checked_sub(&manual_discount_amount)?;
    let gst_rate = campaign.gst_rate.unwrap_or(config.default_gst_rate);
    let gst_amount = Rate::from_percentage(gst_rate).apply(&taxable_amount);
    let grand_total = taxable_amount.checked_add(&gst_amount)?;

    let schedule = calculate_billing_periods(&period, today, config);
    let total_months = schedule.len();
    let monthly_display_rent = if total_months > 0 {
        display_cost.divide(Decimal::from(total_months))?
    } else {
        display_cost
    };

    debug!(
        display_cost = %display_cost,
        gross_amount = %gross_amount,
        grand_total = %grand_total,
        total_months,
        "Computed campaign totals"
    );

    Ok(CampaignTotals {
        currency,
        display_cost,
        printing_cost,
        mounting_cost,
        gross_amount,
        manual_discount_amount,
        discount_clamped,
        taxable_amount,
        gst_rate,
        gst_amount,
        grand_total,
        one_time_charges,
        campaign_period_start: period.start(),
        campaign_period_end: period.end(),
        duration_days: DayCountPolicy::SimpleInclusive.count_interval(&period, config),
        total_months,
        monthly_display_rent,
        periods_truncated: schedule.truncated,
        billing_periods: schedule.into_periods(),
    })
}
