//! Batch Driver
//!
//! Orders are processed one at a time in ascending value. Each winning offer
//! is debited from the ledger before the next order is evaluated, since later
//! eligibility depends on balances already consumed.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    config::EngineConfig,
    ledger::{Ledger, LedgerError},
    orders::Order,
    payments::PaymentMethod,
    processor::{DiscountProcessor, NoApplicableDiscount},
    report::SpendingReport,
    strategies::{DiscountStrategy, Strategy},
};

/// Errors that abort a batch run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    /// An order could not be paid by any strategy.
    #[error(transparent)]
    NoApplicableDiscount(#[from] NoApplicableDiscount),

    /// An order value was zero or negative.
    #[error("order {order_id} has non-positive value {value}")]
    InvalidOrderValue {
        /// Order identifier
        order_id: String,

        /// Offending value
        value: Decimal,
    },

    /// Ledger configuration or invariant error.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Allocates a batch of orders across payment methods.
#[derive(Debug, Clone)]
pub struct BatchDriver<S: DiscountStrategy = Strategy> {
    config: EngineConfig,
    processor: DiscountProcessor<S>,
}

impl BatchDriver<Strategy> {
    /// Create a driver with every built-in strategy.
    pub fn new(config: EngineConfig) -> Self {
        let processor = DiscountProcessor::from_config(&config);

        Self { config, processor }
    }
}

impl Default for BatchDriver<Strategy> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<S: DiscountStrategy> BatchDriver<S> {
    /// Create a driver with a custom processor.
    pub fn with_processor(config: EngineConfig, processor: DiscountProcessor<S>) -> Self {
        Self { config, processor }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run a batch against a fresh ledger built from `methods`.
    ///
    /// # Errors
    ///
    /// - [`BatchError::Ledger`]: the payment methods are misconfigured.
    /// - [`BatchError::InvalidOrderValue`]: an order value is not positive.
    /// - [`BatchError::NoApplicableDiscount`]: an order could not be paid.
    pub fn run(
        &self,
        orders: &[Order],
        methods: impl IntoIterator<Item = PaymentMethod>,
    ) -> Result<SpendingReport, BatchError> {
        let ledger = Ledger::new(methods, &self.config.points_method_id)?;

        self.run_with_ledger(orders, ledger)
    }

    /// Run a batch against a prepared ledger.
    ///
    /// The ledger is consumed by the run. No report is produced if any order fails.
    ///
    /// # Errors
    ///
    /// - [`BatchError::InvalidOrderValue`]: an order value is not positive.
    /// - [`BatchError::NoApplicableDiscount`]: an order could not be paid.
    /// - [`BatchError::Ledger`]: a debit violated a ledger invariant (this is a bug).
    pub fn run_with_ledger(
        &self,
        orders: &[Order],
        mut ledger: Ledger,
    ) -> Result<SpendingReport, BatchError> {
        if let Some(order) = orders.iter().find(|order| !order.has_positive_value()) {
            return Err(BatchError::InvalidOrderValue {
                order_id: order.id().to_string(),
                value: order.value(),
            });
        }

        info!(orders = orders.len(), methods = ledger.len(), "allocating batch");

        for order in sorted_by_value(orders) {
            let offer = self.processor.process(order, &ledger)?;

            debug!(
                order = order.id(),
                kind = %offer.kind(),
                price = %offer.price(),
                "applying offer"
            );

            for payment in offer.payments() {
                ledger.debit(payment.method, payment.amount)?;
            }
        }

        let report = ledger.report();

        info!(total_spent = %report.total_spent(), "batch allocated");

        Ok(report)
    }
}

/// Orders by ascending value; equal values keep their input order.
pub fn sorted_by_value(orders: &[Order]) -> Vec<&Order> {
    let mut sorted: Vec<&Order> = orders.iter().collect();
    sorted.sort_by_key(|order| order.value());

    sorted
}
