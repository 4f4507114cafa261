//! Partial Points Payment
//!
//! Once the points balance covers a minimum share of the order value, a fixed
//! discount is granted. Points pay exactly the discount amount and one other
//! method pays the remainder.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::{
    config::EngineConfig,
    ledger::Ledger,
    offers::{Offer, OfferKind, Payment},
    orders::Order,
    strategies::DiscountStrategy,
};

/// Splits an order between points and one other payment method.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PartialPointsPayment {
    discount: Decimal,
    threshold: Decimal,
    ratio_scale: u32,
}

impl PartialPointsPayment {
    /// Create a partial points strategy.
    ///
    /// `discount` is both the price reduction and the share paid with points;
    /// `threshold` is the minimum `points / value` ratio, truncated to `ratio_scale` places.
    pub fn new(discount: Decimal, threshold: Decimal, ratio_scale: u32) -> Self {
        Self {
            discount,
            threshold,
            ratio_scale,
        }
    }

    /// Create a partial points strategy from engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.partial_points_discount,
            config.partial_points_threshold,
            config.threshold_ratio_scale,
        )
    }

    fn is_eligible(&self, points_balance: Decimal, value: Decimal) -> bool {
        points_balance
            .checked_div(value)
            .map(|ratio| ratio.round_dp_with_strategy(self.ratio_scale, RoundingStrategy::ToZero))
            .is_some_and(|ratio| ratio >= self.threshold)
    }
}

impl Default for PartialPointsPayment {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl DiscountStrategy for PartialPointsPayment {
    fn evaluate(&self, order: &Order, ledger: &Ledger) -> Option<Offer> {
        let points = ledger.points_key();
        let points_balance = ledger.balance_of(points);
        let value = order.value();

        if !self.is_eligible(points_balance, value) {
            debug!(order = order.id(), %points_balance, "points below partial payment threshold");

            return None;
        }

        let points_spent = value.checked_mul(self.discount)?;
        let discounted = value.checked_sub(points_spent)?;
        let remaining = discounted.checked_sub(points_spent)?;

        if points_balance < points_spent {
            return None;
        }

        let Some(card) = ledger.find_any_with_balance_at_least(remaining) else {
            debug!(order = order.id(), %remaining, "no method covers partial points remainder");

            return None;
        };

        Some(Offer::split(
            OfferKind::PartialPoints,
            [
                Payment {
                    method: points,
                    amount: points_spent,
                },
                Payment {
                    method: card,
                    amount: remaining,
                },
            ],
        ))
    }
}
