//! Tender
//!
//! Tender allocates a batch of orders across a customer's payment methods,
//! choosing for each order the combination of loyalty points and cards that
//! pays the lowest price while respecting every method's spending limit.

pub mod batch;
pub mod config;
pub mod ledger;
pub mod loader;
pub mod offers;
pub mod orders;
pub mod payments;
pub mod prelude;
pub mod processor;
pub mod report;
pub mod strategies;
