//! Discount Strategies
//!
//! Each strategy inspects one order against the current ledger balances and
//! proposes at most one [`Offer`]. Strategies never mutate the ledger; the
//! batch driver debits only the winning offer.

use crate::{config::EngineConfig, ledger::Ledger, offers::Offer, orders::Order};

pub mod full_card;
pub mod full_points;
pub mod partial_points;

#[cfg(test)]
pub(crate) mod test_support;

pub use full_card::FullCardPayment;
pub use full_points::FullPointsPayment;
pub use partial_points::PartialPointsPayment;

/// A rule that may produce an offer for an order.
pub trait DiscountStrategy {
    /// Evaluate the order against current balances.
    fn evaluate(&self, order: &Order, ledger: &Ledger) -> Option<Offer>;
}

/// Built-in discount strategies
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Pay the whole order with points
    FullPoints(FullPointsPayment),

    /// Pay part of the order with points and the rest with one other method
    PartialPoints(PartialPointsPayment),

    /// Pay the whole order with a single non-points method
    FullCard(FullCardPayment),
}

impl Strategy {
    /// Every built-in strategy, configured from `config`.
    pub fn all(config: &EngineConfig) -> Vec<Strategy> {
        vec![
            Strategy::FullPoints(FullPointsPayment),
            Strategy::PartialPoints(PartialPointsPayment::from_config(config)),
            Strategy::FullCard(FullCardPayment),
        ]
    }
}

impl DiscountStrategy for Strategy {
    fn evaluate(&self, order: &Order, ledger: &Ledger) -> Option<Offer> {
        match self {
            Strategy::FullPoints(full_points) => full_points.evaluate(order, ledger),
            Strategy::PartialPoints(partial_points) => partial_points.evaluate(order, ledger),
            Strategy::FullCard(full_card) => full_card.evaluate(order, ledger),
        }
    }
}
