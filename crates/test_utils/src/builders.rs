//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else. Names and asset codes are generated with
//! `fake` so unrelated fields never look meaningful.

use chrono::NaiveDate;
use core_kernel::{AssetId, ClientId};
use domain_billing::{AssetBooking, BookingDuration, Campaign, LineItemPricing};
use fake::faker::company::en::CompanyName;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{DateFixtures, MoneyFixtures};

/// Generates an asset code such as `HRD-042`
pub fn fake_asset_code() -> String {
    let prefix = ["HRD", "UNI", "BQS", "GNT", "LED"][(0..5usize).fake::<usize>()];
    format!("{prefix}-{:03}", (1..1000u32).fake::<u32>())
}

/// Builder for constructing test campaigns
pub struct CampaignBuilder {
    name: String,
    client_id: Option<ClientId>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    discount_amount: Decimal,
    gst_rate: Option<Decimal>,
}

impl Default for CampaignBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CampaignBuilder {
    /// Creates a new builder covering July 2024
    pub fn new() -> Self {
        Self {
            name: CompanyName().fake(),
            client_id: None,
            start_date: DateFixtures::july_start(),
            end_date: DateFixtures::july_end(),
            discount_amount: Decimal::ZERO,
            gst_rate: None,
        }
    }

    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_discount(mut self, amount: Decimal) -> Self {
        self.discount_amount = amount;
        self
    }

    /// Sets the GST rate as a percentage
    pub fn with_gst_rate(mut self, percentage: Decimal) -> Self {
        self.gst_rate = Some(percentage);
        self
    }

    pub fn build(self) -> Campaign {
        let mut campaign = Campaign::new(self.name, self.start_date, self.end_date)
            .with_discount(self.discount_amount);
        if let Some(client_id) = self.client_id {
            campaign = campaign.with_client(client_id);
        }
        if let Some(rate) = self.gst_rate {
            campaign = campaign.with_gst_rate(rate);
        }
        campaign
    }
}

/// Builder for constructing test asset bookings
///
/// Dates default to unset, so the booking inherits the campaign dates.
pub struct AssetBookingBuilder {
    booking: AssetBooking,
}

impl Default for AssetBookingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetBookingBuilder {
    /// Creates a builder for a booking at the standard monthly rent
    pub fn new() -> Self {
        let mut booking = AssetBooking::new(AssetId::new(), fake_asset_code());
        booking.negotiated_rate = Some(MoneyFixtures::monthly_rent());
        Self { booking }
    }

    pub fn with_asset_code(mut self, code: impl Into<String>) -> Self {
        self.booking.asset_code = code.into();
        self
    }

    /// Sets the booking-level dates, which take precedence over all others
    pub fn with_booking_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.booking.booking_start_date = Some(start);
        self.booking.booking_end_date = Some(end);
        self
    }

    /// Sets the asset-level dates, used when booking-level dates are absent
    pub fn with_asset_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.booking.start_date = Some(start);
        self.booking.end_date = Some(end);
        self
    }

    pub fn with_negotiated_rate(mut self, rate: Decimal) -> Self {
        self.booking.negotiated_rate = Some(rate);
        self
    }

    /// Clears the negotiated rate so the card rate applies
    pub fn with_card_rate_only(mut self, rate: Decimal) -> Self {
        self.booking.negotiated_rate = None;
        self.booking.card_rate = Some(rate);
        self
    }

    pub fn with_printing(mut self, amount: Decimal) -> Self {
        self.booking.printing_charges = Some(amount);
        self
    }

    pub fn with_mounting(mut self, amount: Decimal) -> Self {
        self.booking.mounting_charges = Some(amount);
        self
    }

    pub fn build(self) -> AssetBooking {
        self.booking
    }
}

/// Builder for line item pricing
pub struct LineItemBuilder {
    pricing: LineItemPricing,
}

impl Default for LineItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineItemBuilder {
    /// Creates a builder for one month at the standard rent
    pub fn new() -> Self {
        Self {
            pricing: LineItemPricing::new(
                MoneyFixtures::monthly_rent(),
                BookingDuration::Month(dec!(1)),
            ),
        }
    }

    pub fn with_negotiated_rate(mut self, rate: Decimal) -> Self {
        self.pricing.negotiated_rate_month = rate;
        self
    }

    pub fn with_base_rate(mut self, rate: Decimal) -> Self {
        self.pricing = self.pricing.with_base_rate(rate);
        self
    }

    pub fn with_card_rate(mut self, rate: Decimal) -> Self {
        self.pricing = self.pricing.with_card_rate(rate);
        self
    }

    pub fn with_printing_rate(mut self, rate: Decimal) -> Self {
        self.pricing = self.pricing.with_printing_rate(rate);
        self
    }

    pub fn with_mounting_rate(mut self, rate: Decimal) -> Self {
        self.pricing = self.pricing.with_mounting_rate(rate);
        self
    }

    pub fn for_days(mut self, days: i64) -> Self {
        self.pricing.duration = BookingDuration::Days(days);
        self
    }

    pub fn for_months(mut self, months: Decimal) -> Self {
        self.pricing.duration = BookingDuration::Month(months);
        self
    }

    pub fn build(self) -> LineItemPricing {
        self.pricing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_builder_defaults() {
        let campaign = CampaignBuilder::new().build();
        assert!(!campaign.name.is_empty());
        assert_eq!(campaign.start_date, DateFixtures::july_start());
        assert_eq!(campaign.discount_amount, Decimal::ZERO);
        assert_eq!(campaign.gst_rate, None);
    }

    #[test]
    fn test_campaign_builder_carries_client_and_rates() {
        let client_id = ClientId::new();
        let campaign = CampaignBuilder::new()
            .with_client(client_id)
            .with_discount(dec!(500))
            .with_gst_rate(dec!(12))
            .build();

        assert_eq!(campaign.client_id, Some(client_id));
        assert_eq!(campaign.discount_amount, dec!(500));
        assert_eq!(campaign.gst_rate, Some(dec!(12)));
    }

    #[test]
    fn test_asset_builder_overrides() {
        let booking = AssetBookingBuilder::new()
            .with_asset_code("GNT-007")
            .with_printing(dec!(3000))
            .build();
        assert_eq!(booking.asset_code, "GNT-007");
        assert_eq!(booking.printing_charges, Some(dec!(3000)));
    }

    #[test]
    fn test_asset_code_shape() {
        let code = fake_asset_code();
        assert_eq!(code.len(), 7);
        assert_eq!(&code[3..4], "-");
    }

    #[test]
    fn test_asset_builder_card_rate_only() {
        let booking = AssetBookingBuilder::new().with_card_rate_only(dec!(12000)).build();
        assert_eq!(booking.negotiated_rate, None);
        assert_eq!(booking.monthly_rate(), dec!(12000));
    }
}
