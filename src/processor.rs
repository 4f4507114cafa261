//! Discount Processor

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    config::EngineConfig,
    ledger::Ledger,
    offers::{Offer, OfferComparator},
    orders::Order,
    strategies::{DiscountStrategy, Strategy},
};

/// No strategy could produce an offer for an order.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no applicable discount for order {order_id}")]
pub struct NoApplicableDiscount {
    /// Identifier of the order that could not be paid
    pub order_id: String,
}

/// Runs every strategy against an order and keeps the best offer.
#[derive(Debug, Clone)]
pub struct DiscountProcessor<S: DiscountStrategy = Strategy> {
    strategies: Vec<S>,
}

impl DiscountProcessor<Strategy> {
    /// Create a processor with every built-in strategy.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(Strategy::all(config))
    }
}

impl<S: DiscountStrategy> DiscountProcessor<S> {
    /// Create a processor from an ordered list of strategies.
    pub fn new(strategies: Vec<S>) -> Self {
        Self { strategies }
    }

    /// Strategies evaluated for each order
    pub fn strategies(&self) -> &[S] {
        &self.strategies
    }

    /// Select the best offer for `order` under current ledger balances.
    ///
    /// # Errors
    ///
    /// Returns [`NoApplicableDiscount`] if no strategy produced an offer.
    pub fn process(&self, order: &Order, ledger: &Ledger) -> Result<Offer, NoApplicableDiscount> {
        let comparator = OfferComparator::new(ledger.points_key());

        let offers = self.strategies.iter().filter_map(|strategy| {
            let offer = strategy.evaluate(order, ledger);

            if let Some(offer) = &offer {
                debug!(order = order.id(), kind = %offer.kind(), price = %offer.price(), "candidate offer");
            }

            offer
        });

        comparator.best(offers).ok_or_else(|| {
            warn!(order = order.id(), value = %order.value(), "no strategy produced an offer");

            NoApplicableDiscount {
                order_id: order.id().to_string(),
            }
        })
    }
}
