//! Shared helpers for strategy tests

use rust_decimal::Decimal;

use crate::{
    config::DEFAULT_POINTS_METHOD_ID,
    ledger::{Ledger, LedgerError},
    payments::{PaymentMethod, PaymentMethodKey},
};

/// Build a ledger from `(id, discount rate, limit)` triples using the default points id.
pub(crate) fn ledger(methods: &[(&str, Decimal, Decimal)]) -> Result<Ledger, LedgerError> {
    Ledger::new(
        methods
            .iter()
            .map(|&(id, rate, limit)| PaymentMethod::new(id, rate, limit)),
        DEFAULT_POINTS_METHOD_ID,
    )
}

/// Look up a key that the test knows is configured.
pub(crate) fn key(ledger: &Ledger, id: &str) -> Result<PaymentMethodKey, String> {
    ledger
        .key_of(id)
        .ok_or_else(|| format!("payment method {id} not configured"))
}
