//! Core Kernel - Foundational types for the ad-operations billing engine
//!
//! This crate provides the building blocks shared by the billing crates:
//! - Money types with precise decimal arithmetic and half-up rounding
//! - Calendar helpers and the inclusive booking interval
//! - Campaign, asset and booking identifiers

pub mod money;
pub mod temporal;
pub mod identifiers;

pub use money::{Money, Currency, MoneyError, Rate, round_amount, round_half_up};
pub use temporal::{BookingInterval, TemporalError};
pub use identifiers::{CampaignId, AssetId, BookingId, ClientId};
