//! Tender prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    batch::{BatchDriver, BatchError},
    config::{DEFAULT_POINTS_METHOD_ID, EngineConfig},
    ledger::{Ledger, LedgerError},
    loader::{Format, LoaderError, load_orders, load_payment_methods},
    offers::{Offer, OfferComparator, OfferKind, Payment},
    orders::Order,
    payments::{PaymentMethod, PaymentMethodKey},
    processor::{DiscountProcessor, NoApplicableDiscount},
    report::{ReportError, SpendingEntry, SpendingReport},
    strategies::{
        DiscountStrategy, FullCardPayment, FullPointsPayment, PartialPointsPayment, Strategy,
    },
};
