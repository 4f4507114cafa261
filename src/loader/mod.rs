//! Loader
//!
//! Reads orders and payment methods from JSON or YAML files. The format is
//! chosen from the file extension: `.yml` and `.yaml` are YAML, anything else
//! is JSON.

use std::{fs, path::Path};

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::{
    loader::records::{OrderRecord, PaymentMethodRecord},
    orders::Order,
    payments::PaymentMethod,
};

pub mod records;

/// Input Loading Errors
#[derive(Debug, Error)]
pub enum LoaderError {
    /// IO error reading an input file
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Discount is not a whole percentage between 0 and 100
    #[error("Invalid discount for payment method {method}: {discount}")]
    InvalidDiscount {
        /// Payment method identifier
        method: String,

        /// Discount as read from the input
        discount: Decimal,
    },

    /// Payment method limit below zero
    #[error("Negative limit for payment method {method}: {limit}")]
    NegativeLimit {
        /// Payment method identifier
        method: String,

        /// Limit as read from the input
        limit: Decimal,
    },

    /// Order value of zero or less
    #[error("Non-positive value for order {order}: {value}")]
    NonPositiveOrderValue {
        /// Order identifier
        order: String,

        /// Value as read from the input
        value: Decimal,
    },
}

/// Input file format
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Format {
    /// JSON array
    #[default]
    Json,

    /// YAML sequence
    Yaml,
}

impl Format {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }

    fn parse<T: DeserializeOwned>(self, contents: &str) -> Result<T, LoaderError> {
        Ok(match self {
            Format::Json => serde_json::from_str(contents)?,
            Format::Yaml => serde_norway::from_str(contents)?,
        })
    }
}

/// Load orders from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or an order value is not positive.
pub fn load_orders(path: impl AsRef<Path>) -> Result<Vec<Order>, LoaderError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let orders = parse_orders(&contents, Format::from_path(path))?;

    debug!(path = %path.display(), count = orders.len(), "loaded orders");

    Ok(orders)
}

/// Load payment methods from a file, keeping their file order.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or a method is invalid.
pub fn load_payment_methods(path: impl AsRef<Path>) -> Result<Vec<PaymentMethod>, LoaderError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let methods = parse_payment_methods(&contents, Format::from_path(path))?;

    debug!(path = %path.display(), count = methods.len(), "loaded payment methods");

    Ok(methods)
}

/// Parse orders from a string.
///
/// # Errors
///
/// Returns an error if parsing fails or an order value is not positive.
pub fn parse_orders(contents: &str, format: Format) -> Result<Vec<Order>, LoaderError> {
    let records: Vec<OrderRecord> = format.parse(contents)?;

    records.into_iter().map(Order::try_from).collect()
}

/// Parse payment methods from a string.
///
/// # Errors
///
/// Returns an error if parsing fails, a discount is not a whole percentage
/// between 0 and 100, or a limit is negative.
pub fn parse_payment_methods(
    contents: &str,
    format: Format,
) -> Result<Vec<PaymentMethod>, LoaderError> {
    let records: Vec<PaymentMethodRecord> = format.parse(contents)?;

    records.into_iter().map(PaymentMethod::try_from).collect()
}
