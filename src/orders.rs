//! Orders

use rust_decimal::Decimal;
use smallvec::SmallVec;

/// A purchase order awaiting payment allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: String,
    value: Decimal,
    promotions: SmallVec<[String; 2]>,
}

impl Order {
    /// Create an order with no promotions.
    pub fn new(id: impl Into<String>, value: Decimal) -> Self {
        Self {
            id: id.into(),
            value,
            promotions: SmallVec::new(),
        }
    }

    /// Create an order eligible for promotions with the given payment method ids.
    pub fn with_promotions<I, S>(id: impl Into<String>, value: Decimal, promotions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            value,
            promotions: promotions.into_iter().map(Into::into).collect(),
        }
    }

    /// Order identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Order value before any discount
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Payment method ids this order has a promotion with
    pub fn promotions(&self) -> &[String] {
        &self.promotions
    }

    /// Whether the order has a promotion with the given payment method id.
    pub fn has_promotion(&self, method_id: &str) -> bool {
        self.promotions.iter().any(|id| id == method_id)
    }

    /// Whether the order value is strictly positive.
    pub fn has_positive_value(&self) -> bool {
        self.value > Decimal::ZERO
    }
}
