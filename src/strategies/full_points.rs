//! Full Points Payment
//!
//! The whole order is paid with loyalty points at the points method's discount.

use tracing::debug;

use crate::{
    ledger::Ledger,
    offers::{Offer, OfferKind},
    orders::Order,
    strategies::DiscountStrategy,
};

/// Pays the whole discounted order with points when the balance allows it.
#[derive(Debug, Copy, Clone, Default)]
pub struct FullPointsPayment;

impl DiscountStrategy for FullPointsPayment {
    fn evaluate(&self, order: &Order, ledger: &Ledger) -> Option<Offer> {
        let points = ledger.points_key();
        let rate = ledger.points().discount_rate();
        let value = order.value();
        let price = value.checked_sub(value.checked_mul(rate)?)?;
        let balance = ledger.balance_of(points);

        if balance < price {
            debug!(order = order.id(), %price, %balance, "points balance too low for full points payment");

            return None;
        }

        Some(Offer::single(OfferKind::FullPoints, points, price))
    }
}
