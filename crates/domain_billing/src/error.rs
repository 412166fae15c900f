//! Billing domain errors

use chrono::NaiveDate;
use thiserror::Error;

use core_kernel::{MoneyError, TemporalError};

/// Errors that can occur in the billing engine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BillingError {
    /// Booking ends before it starts
    #[error("Invalid booking range: end {end} is before start {start}")]
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
    },

    /// Billing configuration is unusable
    #[error("Invalid billing configuration: {0}")]
    Configuration(String),

    /// Money arithmetic failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Interval construction failed
    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),
}

impl BillingError {
    /// Creates an invalid range error
    pub fn invalid_range(start: NaiveDate, end: NaiveDate) -> Self {
        BillingError::InvalidRange { start, end }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        BillingError::Configuration(message.into())
    }
}

/// Result alias for billing operations
pub type BillingResult<T> = Result<T, BillingError>;
