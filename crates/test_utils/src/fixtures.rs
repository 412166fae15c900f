//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the billing engine. These fixtures are
//! designed to be consistent and predictable for unit tests.

use chrono::NaiveDate;
use core_kernel::{AssetId, Currency, Money};
use domain_billing::{AssetBooking, BillingConfig, Campaign};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builds a calendar date, panicking on an invalid one
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid fixture date {year}-{month:02}-{day:02}"))
}

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Standard monthly display rent
    pub fn monthly_rent() -> Decimal {
        dec!(30000)
    }

    /// Monthly rent as INR money
    pub fn inr_monthly_rent() -> Money {
        Money::new(Self::monthly_rent(), Currency::INR)
    }

    /// A USD amount for currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }
}

/// Fixture for dates used across billing scenarios
pub struct DateFixtures;

impl DateFixtures {
    pub fn july_start() -> NaiveDate {
        date(2024, 7, 1)
    }

    pub fn july_end() -> NaiveDate {
        date(2024, 7, 31)
    }

    /// Mid-July, used as the clock date
    pub fn today() -> NaiveDate {
        date(2024, 7, 15)
    }

    /// Start of a booking spanning three calendar months
    pub fn spanning_start() -> NaiveDate {
        date(2024, 7, 16)
    }

    pub fn spanning_end() -> NaiveDate {
        date(2024, 9, 15)
    }
}

/// Fixture for campaigns and asset bookings
pub struct CampaignFixtures;

impl CampaignFixtures {
    /// A campaign covering all of July 2024 with no discount
    pub fn july_campaign() -> Campaign {
        Campaign::new("Monsoon Sale", DateFixtures::july_start(), DateFixtures::july_end())
    }

    /// A campaign running from mid-July to mid-September 2024
    pub fn spanning_campaign() -> Campaign {
        Campaign::new(
            "Festive Launch",
            DateFixtures::spanning_start(),
            DateFixtures::spanning_end(),
        )
    }

    /// A hoarding booked at the standard monthly rent for the campaign dates
    pub fn hoarding() -> AssetBooking {
        let mut booking = AssetBooking::new(AssetId::new(), "HRD-001");
        booking.negotiated_rate = Some(MoneyFixtures::monthly_rent());
        booking
    }

    /// June 2024 at 100000/month with 10000 printing and 8000 mounting
    ///
    /// June has 30 days, so the gross is exactly 118000.
    pub fn june_premium_unipole() -> (Campaign, AssetBooking) {
        let campaign = Campaign::new("Premium Unipole", date(2024, 6, 1), date(2024, 6, 30));
        let mut booking = AssetBooking::new(AssetId::new(), "UNI-101");
        booking.negotiated_rate = Some(dec!(100000));
        booking.printing_charges = Some(dec!(10000));
        booking.mounting_charges = Some(dec!(8000));
        (campaign, booking)
    }
}

/// Fixture for engine configuration
pub struct ConfigFixtures;

impl ConfigFixtures {
    pub fn standard() -> BillingConfig {
        BillingConfig::default()
    }

    /// A config with a small period cap, for truncation tests
    pub fn capped(max_periods: usize) -> BillingConfig {
        BillingConfig::default().with_max_periods(max_periods)
    }
}
