//! Input Records

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    loader::LoaderError,
    orders::Order,
    payments::PaymentMethod,
};

/// Payment method as it appears in an input file.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentMethodRecord {
    /// Payment method identifier
    pub id: String,

    /// Whole percentage discount, `0..=100`
    pub discount: Decimal,

    /// Spending limit
    pub limit: Decimal,
}

impl TryFrom<PaymentMethodRecord> for PaymentMethod {
    type Error = LoaderError;

    fn try_from(record: PaymentMethodRecord) -> Result<Self, Self::Error> {
        let PaymentMethodRecord {
            id,
            discount,
            limit,
        } = record;

        if !discount.fract().is_zero()
            || discount < Decimal::ZERO
            || discount > Decimal::ONE_HUNDRED
        {
            return Err(LoaderError::InvalidDiscount {
                method: id,
                discount,
            });
        }

        if limit < Decimal::ZERO {
            return Err(LoaderError::NegativeLimit { method: id, limit });
        }

        Ok(PaymentMethod::from_percent(id, discount, limit))
    }
}

/// Order as it appears in an input file.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    /// Order identifier
    pub id: String,

    /// Order value
    pub value: Decimal,

    /// Promoted payment method ids; absent and `null` both mean none
    #[serde(default)]
    pub promotions: Option<Vec<String>>,
}

impl TryFrom<OrderRecord> for Order {
    type Error = LoaderError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        let order = Order::with_promotions(
            record.id,
            record.value,
            record.promotions.unwrap_or_default(),
        );

        if !order.has_positive_value() {
            return Err(LoaderError::NonPositiveOrderValue {
                order: order.id().to_string(),
                value: order.value(),
            });
        }

        Ok(order)
    }
}
