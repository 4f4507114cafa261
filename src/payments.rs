//! Payment Methods

use rust_decimal::{Decimal, RoundingStrategy};
use slotmap::new_key_type;

new_key_type! {
    /// Payment Method Key
    pub struct PaymentMethodKey;
}

/// Decimal places kept when converting a percentage into a discount rate.
pub const DISCOUNT_RATE_SCALE: u32 = 4;

/// A payment instrument with its promotional discount and spending limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethod {
    id: String,
    discount_rate: Decimal,
    limit: Decimal,
}

impl PaymentMethod {
    /// Create a payment method from a discount rate (`0.1` for 10% off) and a spending limit.
    pub fn new(id: impl Into<String>, discount_rate: Decimal, limit: Decimal) -> Self {
        Self {
            id: id.into(),
            discount_rate,
            limit,
        }
    }

    /// Create a payment method from a whole percentage discount (`10` for 10% off).
    pub fn from_percent(id: impl Into<String>, percent: Decimal, limit: Decimal) -> Self {
        Self::new(id, discount_rate_from_percent(percent), limit)
    }

    /// Unique identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Discount rate as a fraction in `[0, 1)`
    pub fn discount_rate(&self) -> Decimal {
        self.discount_rate
    }

    /// Initial balance available for the whole batch
    pub fn limit(&self) -> Decimal {
        self.limit
    }
}

/// Convert a percentage into a discount rate, floored to [`DISCOUNT_RATE_SCALE`] places.
pub fn discount_rate_from_percent(percent: Decimal) -> Decimal {
    (percent / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(DISCOUNT_RATE_SCALE, RoundingStrategy::ToNegativeInfinity)
}
