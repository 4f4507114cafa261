//! Offers
//!
//! An [`Offer`] is a fully priced payment allocation for a single order,
//! produced by one discount strategy and discarded once applied.

use std::{cmp::Ordering, fmt};

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::payments::PaymentMethodKey;

/// The strategy that produced an offer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OfferKind {
    /// The whole order is paid with points
    FullPoints,

    /// Part of the order is paid with points, the rest with one other method
    PartialPoints,

    /// The whole order is paid with one non-points method
    FullCard,
}

impl fmt::Display for OfferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OfferKind::FullPoints => "FULL_POINTS",
            OfferKind::PartialPoints => "PARTIAL_POINTS",
            OfferKind::FullCard => "FULL_CARD",
        })
    }
}

/// Amount to take from one payment method.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Payment {
    /// Payment method to debit
    pub method: PaymentMethodKey,

    /// Amount to debit
    pub amount: Decimal,
}

/// A priced payment allocation for one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    kind: OfferKind,
    price: Decimal,
    payments: SmallVec<[Payment; 2]>,
}

impl Offer {
    /// Create an offer paid entirely by one method.
    pub fn single(kind: OfferKind, method: PaymentMethodKey, price: Decimal) -> Self {
        Self::split(kind, [Payment {
            method,
            amount: price,
        }])
    }

    /// Create an offer from its payment breakdown; the price is the sum of the payments.
    ///
    /// Zero amounts are dropped so every remaining payment is positive.
    pub fn split(kind: OfferKind, payments: impl IntoIterator<Item = Payment>) -> Self {
        let payments: SmallVec<[Payment; 2]> = payments
            .into_iter()
            .filter(|payment| !payment.amount.is_zero())
            .collect();
        let price = payments.iter().map(|payment| payment.amount).sum();

        Self {
            kind,
            price,
            payments,
        }
    }

    /// Strategy that produced this offer
    pub fn kind(&self) -> OfferKind {
        self.kind
    }

    /// Final amount payable for the order
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Payment breakdown
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// Amount paid with the given method, if it takes part in this offer.
    pub fn amount_for(&self, method: PaymentMethodKey) -> Option<Decimal> {
        self.payments
            .iter()
            .find(|payment| payment.method == method)
            .map(|payment| payment.amount)
    }
}

/// Orders offers from best to worst.
///
/// A lower price wins. On equal prices the offer paying more with points
/// wins, and any points usage beats none. Offers that tie on both are equal.
#[derive(Debug, Copy, Clone)]
pub struct OfferComparator {
    points: PaymentMethodKey,
}

impl OfferComparator {
    /// Create a comparator for the given points method.
    pub fn new(points: PaymentMethodKey) -> Self {
        Self { points }
    }

    /// Compare two offers; [`Ordering::Less`] means `a` is the better offer.
    pub fn compare(&self, a: &Offer, b: &Offer) -> Ordering {
        a.price().cmp(&b.price()).then_with(|| {
            match (a.amount_for(self.points), b.amount_for(self.points)) {
                (Some(a_points), Some(b_points)) => b_points.cmp(&a_points),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        })
    }

    /// The best offer; among equal offers the first one wins.
    pub fn best<I>(&self, offers: I) -> Option<Offer>
    where
        I: IntoIterator<Item = Offer>,
    {
        offers.into_iter().min_by(|a, b| self.compare(a, b))
    }
}
