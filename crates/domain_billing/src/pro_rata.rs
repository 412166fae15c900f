//! Pro-rata pricing on the fixed billing cycle

use rust_decimal::Decimal;

use core_kernel::round_amount;
use crate::config::BillingConfig;

/// Unrounded daily rate for a monthly rate
pub fn daily_rate(monthly_rate: Decimal, config: &BillingConfig) -> Decimal {
    config.per_cycle(monthly_rate)
}

/// Amount billed for `days` at `monthly_rate`, rounded to 2 dp
///
/// A non-positive rate or day count bills nothing.
///
/// ```
/// use rust_decimal_macros::dec;
/// use domain_billing::{pro_rata, BillingConfig};
///
/// assert_eq!(pro_rata(dec!(30000), 15, &BillingConfig::default()), dec!(15000));
/// ```
pub fn pro_rata(monthly_rate: Decimal, days: i64, config: &BillingConfig) -> Decimal {
    if monthly_rate <= Decimal::ZERO || days <= 0 {
        return Decimal::ZERO;
    }
    round_amount(daily_rate(monthly_rate, config) * Decimal::from(days))
}
