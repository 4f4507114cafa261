//! Full Card Payment
//!
//! The whole order is paid with a single non-points method. Orders with
//! promotions prefer the promoted method with the best discount that can
//! cover the order, and fall back to any method with enough balance.

use rust_decimal::Decimal;
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    ledger::Ledger,
    offers::{Offer, OfferKind},
    orders::Order,
    payments::PaymentMethodKey,
    strategies::DiscountStrategy,
};

/// Pays the whole order with one card.
#[derive(Debug, Copy, Clone, Default)]
pub struct FullCardPayment;

impl FullCardPayment {
    fn choose_method(order: &Order, ledger: &Ledger) -> Option<PaymentMethodKey> {
        let value = order.value();

        if order.promotions().is_empty() {
            return ledger.find_any_with_balance_at_least(value);
        }

        // Unknown promotion ids are ignored
        let promoted: SmallVec<[PaymentMethodKey; 4]> = order
            .promotions()
            .iter()
            .filter_map(|id| ledger.key_of(id))
            .collect();

        ledger
            .find_best_discount_with_balance_at_least(&promoted, value)
            .or_else(|| ledger.find_any_with_balance_at_least(value))
    }
}

impl DiscountStrategy for FullCardPayment {
    fn evaluate(&self, order: &Order, ledger: &Ledger) -> Option<Offer> {
        let Some(key) = Self::choose_method(order, ledger) else {
            debug!(order = order.id(), "no single method covers the order");

            return None;
        };

        let method = ledger.method(key)?;
        let discount = if order.has_promotion(method.id()) {
            method.discount_rate()
        } else {
            Decimal::ZERO
        };

        let value = order.value();
        let price = value.checked_sub(value.checked_mul(discount)?)?;

        Some(Offer::single(OfferKind::FullCard, key, price))
    }
}
