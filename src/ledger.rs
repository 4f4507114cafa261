//! Balance Ledger
//!
//! The ledger owns the remaining balance of every payment method for the
//! duration of one batch run. Strategies only read it; the batch driver is
//! the only caller of [`Ledger::debit`].

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use slotmap::{SecondaryMap, SlotMap};
use thiserror::Error;
use tracing::debug;

use crate::{
    payments::{PaymentMethod, PaymentMethodKey},
    report::{SpendingEntry, SpendingReport},
};

/// Errors raised while building or mutating a ledger.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The reserved points method was not among the configured payment methods.
    #[error("points payment method {0:?} is not configured")]
    MissingPointsMethod(String),

    /// Two payment methods share the same identifier.
    #[error("payment method {0:?} is configured more than once")]
    DuplicateMethod(String),

    /// The key does not belong to this ledger.
    #[error("payment method is not managed by this ledger")]
    UnknownMethod,

    /// A debit was requested for a negative amount (this is a bug).
    #[error("cannot debit negative amount {amount} from {method}")]
    NegativeDebit {
        /// Payment method identifier
        method: String,

        /// Requested amount
        amount: Decimal,
    },

    /// A debit exceeded the remaining balance (this is a bug).
    #[error("cannot debit {requested} from {method}, only {available} remaining")]
    InsufficientBalance {
        /// Payment method identifier
        method: String,

        /// Requested amount
        requested: Decimal,

        /// Balance at the time of the request
        available: Decimal,
    },
}

/// Remaining balance per payment method for one batch run.
#[derive(Debug, Clone)]
pub struct Ledger {
    methods: SlotMap<PaymentMethodKey, PaymentMethod>,
    balances: SecondaryMap<PaymentMethodKey, Decimal>,

    /// Keys in the order the methods were supplied
    load_order: Vec<PaymentMethodKey>,

    ids: FxHashMap<String, PaymentMethodKey>,
    points: PaymentMethodKey,
    points_method: PaymentMethod,
}

impl Ledger {
    /// Build a ledger with every balance set to its method's limit.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::DuplicateMethod`]: two methods share an identifier.
    /// - [`LedgerError::MissingPointsMethod`]: no method has `points_method_id`.
    pub fn new(
        methods: impl IntoIterator<Item = PaymentMethod>,
        points_method_id: &str,
    ) -> Result<Self, LedgerError> {
        let mut slots = SlotMap::with_key();
        let mut balances = SecondaryMap::new();
        let mut load_order = Vec::new();
        let mut ids = FxHashMap::default();

        for method in methods {
            if ids.contains_key(method.id()) {
                return Err(LedgerError::DuplicateMethod(method.id().to_string()));
            }

            let id = method.id().to_string();
            let limit = method.limit();
            let key = slots.insert(method);

            balances.insert(key, limit);
            load_order.push(key);
            ids.insert(id, key);
        }

        let (points, points_method) = ids
            .get(points_method_id)
            .and_then(|&key| slots.get(key).map(|method| (key, method.clone())))
            .ok_or_else(|| LedgerError::MissingPointsMethod(points_method_id.to_string()))?;

        Ok(Self {
            methods: slots,
            balances,
            load_order,
            ids,
            points,
            points_method,
        })
    }

    /// Look up a payment method key by identifier.
    pub fn key_of(&self, id: &str) -> Option<PaymentMethodKey> {
        self.ids.get(id).copied()
    }

    /// Look up a payment method by identifier.
    pub fn by_id(&self, id: &str) -> Option<&PaymentMethod> {
        self.key_of(id).and_then(|key| self.methods.get(key))
    }

    /// Return the payment method for a key.
    pub fn method(&self, key: PaymentMethodKey) -> Option<&PaymentMethod> {
        self.methods.get(key)
    }

    /// Key of the points payment method.
    pub fn points_key(&self) -> PaymentMethodKey {
        self.points
    }

    /// The points payment method.
    pub fn points(&self) -> &PaymentMethod {
        &self.points_method
    }

    /// Remaining balance of a payment method; zero for keys this ledger does not own.
    pub fn balance_of(&self, key: PaymentMethodKey) -> Decimal {
        self.balances.get(key).copied().unwrap_or(Decimal::ZERO)
    }

    /// Amount consumed so far from a payment method.
    pub fn spent(&self, key: PaymentMethodKey) -> Decimal {
        self.methods
            .get(key)
            .map_or(Decimal::ZERO, |method| method.limit() - self.balance_of(key))
    }

    /// Reduce a payment method's balance.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::UnknownMethod`]: the key does not belong to this ledger.
    /// - [`LedgerError::NegativeDebit`]: `amount` is negative.
    /// - [`LedgerError::InsufficientBalance`]: `amount` exceeds the remaining balance.
    pub fn debit(&mut self, key: PaymentMethodKey, amount: Decimal) -> Result<(), LedgerError> {
        let method = self.methods.get(key).ok_or(LedgerError::UnknownMethod)?;
        let balance = self
            .balances
            .get_mut(key)
            .ok_or(LedgerError::UnknownMethod)?;

        if amount < Decimal::ZERO {
            return Err(LedgerError::NegativeDebit {
                method: method.id().to_string(),
                amount,
            });
        }

        if amount > *balance {
            return Err(LedgerError::InsufficientBalance {
                method: method.id().to_string(),
                requested: amount,
                available: *balance,
            });
        }

        *balance -= amount;

        debug!(method = method.id(), %amount, remaining = %balance, "debited");

        Ok(())
    }

    /// First non-points method, in load order, whose balance covers `value`.
    pub fn find_any_with_balance_at_least(&self, value: Decimal) -> Option<PaymentMethodKey> {
        self.load_order
            .iter()
            .copied()
            .find(|&key| key != self.points && self.balance_of(key) >= value)
    }

    /// Non-points candidate with the highest discount whose balance covers `value`.
    ///
    /// Ties keep the candidate listed first.
    pub fn find_best_discount_with_balance_at_least(
        &self,
        candidates: &[PaymentMethodKey],
        value: Decimal,
    ) -> Option<PaymentMethodKey> {
        candidates
            .iter()
            .copied()
            .filter(|&key| key != self.points && self.balance_of(key) >= value)
            .filter_map(|key| self.methods.get(key).map(|method| (key, method.discount_rate())))
            .fold(None, |best, (key, rate)| match best {
                Some((_, best_rate)) if best_rate >= rate => best,
                _ => Some((key, rate)),
            })
            .map(|(key, _)| key)
    }

    /// Payment methods in load order.
    pub fn methods(&self) -> impl Iterator<Item = (PaymentMethodKey, &PaymentMethod)> + '_ {
        self.load_order
            .iter()
            .filter_map(|&key| self.methods.get(key).map(|method| (key, method)))
    }

    /// Number of configured payment methods.
    pub fn len(&self) -> usize {
        self.load_order.len()
    }

    /// Whether the ledger has no payment methods. Always `false` for a constructed ledger.
    pub fn is_empty(&self) -> bool {
        self.load_order.is_empty()
    }

    /// Amount spent per payment method, in load order.
    pub fn report(&self) -> SpendingReport {
        self.methods()
            .map(|(key, method)| SpendingEntry {
                method: method.id().to_string(),
                limit: method.limit(),
                spent: self.spent(key),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    fn methods() -> Vec<PaymentMethod> {
        vec![
            PaymentMethod::new("PUNKTY", dec!(0.15), dec!(100.00)),
            PaymentMethod::new("mZysk", dec!(0.10), dec!(180.00)),
            PaymentMethod::new("BosBankrut", dec!(0.05), dec!(200.00)),
        ]
    }

    #[test]
    fn new_requires_points_method() {
        let result = Ledger::new(
            [PaymentMethod::new("VISA", dec!(0.1), dec!(10))],
            "PUNKTY",
        );

        assert_eq!(
            result.err(),
            Some(LedgerError::MissingPointsMethod("PUNKTY".to_string()))
        );
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let result = Ledger::new(
            [
                PaymentMethod::new("PUNKTY", dec!(0.1), dec!(10)),
                PaymentMethod::new("VISA", dec!(0.1), dec!(10)),
                PaymentMethod::new("VISA", dec!(0.2), dec!(20)),
            ],
            "PUNKTY",
        );

        assert_eq!(
            result.err(),
            Some(LedgerError::DuplicateMethod("VISA".to_string()))
        );
    }

    #[test]
    fn constructed_ledger_is_never_empty() -> TestResult {
        let ledger = Ledger::new(methods(), "PUNKTY")?;

        assert_eq!(ledger.len(), 3);
        assert!(!ledger.is_empty());

        Ok(())
    }

    #[test]
    fn balances_start_at_limits() -> TestResult {
        let ledger = Ledger::new(methods(), "PUNKTY")?;

        for (key, method) in ledger.methods() {
            assert_eq!(ledger.balance_of(key), method.limit());
            assert_eq!(ledger.spent(key), Decimal::ZERO);
        }

        Ok(())
    }

    #[test]
    fn lookups_by_id_and_points() -> TestResult {
        let ledger = Ledger::new(methods(), "PUNKTY")?;

        assert_eq!(ledger.by_id("mZysk").map(PaymentMethod::id), Some("mZysk"));
        assert!(ledger.by_id("MysteryBank").is_none());
        assert_eq!(ledger.points().id(), "PUNKTY");
        assert_eq!(ledger.points().discount_rate(), dec!(0.15));
        assert_eq!(ledger.key_of("PUNKTY"), Some(ledger.points_key()));

        Ok(())
    }

    #[test]
    fn debit_reduces_balance() -> TestResult {
        let mut ledger = Ledger::new(methods(), "PUNKTY")?;
        let key = ledger.key_of("mZysk").ok_or("missing mZysk")?;

        ledger.debit(key, dec!(30.50))?;

        assert_eq!(ledger.balance_of(key), dec!(149.50));
        assert_eq!(ledger.spent(key), dec!(30.50));

        Ok(())
    }

    #[test]
    fn debit_of_entire_balance_is_allowed() -> TestResult {
        let mut ledger = Ledger::new(methods(), "PUNKTY")?;
        let key = ledger.points_key();

        ledger.debit(key, dec!(100))?;

        assert_eq!(ledger.balance_of(key), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn debit_rejects_overdraft_and_keeps_balance() -> TestResult {
        let mut ledger = Ledger::new(methods(), "PUNKTY")?;
        let key = ledger.points_key();

        let result = ledger.debit(key, dec!(100.01));

        assert_eq!(
            result,
            Err(LedgerError::InsufficientBalance {
                method: "PUNKTY".to_string(),
                requested: dec!(100.01),
                available: dec!(100.00),
            })
        );
        assert_eq!(ledger.balance_of(key), dec!(100.00));

        Ok(())
    }

    #[test]
    fn debit_rejects_negative_amounts() -> TestResult {
        let mut ledger = Ledger::new(methods(), "PUNKTY")?;
        let key = ledger.points_key();

        assert!(matches!(
            ledger.debit(key, dec!(-1)),
            Err(LedgerError::NegativeDebit { .. })
        ));

        Ok(())
    }

    #[test]
    fn debit_rejects_foreign_keys() -> TestResult {
        let mut ledger = Ledger::new(methods(), "PUNKTY")?;
        let other = Ledger::new(
            [
                PaymentMethod::new("A", dec!(0), dec!(1)),
                PaymentMethod::new("B", dec!(0), dec!(1)),
                PaymentMethod::new("C", dec!(0), dec!(1)),
                PaymentMethod::new("PUNKTY", dec!(0), dec!(1)),
            ],
            "PUNKTY",
        )?;

        assert_eq!(
            ledger.debit(other.points_key(), dec!(1)),
            Err(LedgerError::UnknownMethod)
        );

        Ok(())
    }

    #[test]
    fn find_any_skips_points_and_respects_load_order() -> TestResult {
        let ledger = Ledger::new(methods(), "PUNKTY")?;

        assert_eq!(
            ledger.find_any_with_balance_at_least(dec!(50)),
            ledger.key_of("mZysk")
        );
        assert_eq!(
            ledger.find_any_with_balance_at_least(dec!(190)),
            ledger.key_of("BosBankrut")
        );
        assert_eq!(ledger.find_any_with_balance_at_least(dec!(200.01)), None);

        Ok(())
    }

    #[test]
    fn find_any_ignores_points_even_when_it_is_the_only_match() -> TestResult {
        let ledger = Ledger::new(
            [
                PaymentMethod::new("PUNKTY", dec!(0.15), dec!(1000)),
                PaymentMethod::new("VISA", dec!(0.1), dec!(1)),
            ],
            "PUNKTY",
        )?;

        assert_eq!(ledger.find_any_with_balance_at_least(dec!(500)), None);

        Ok(())
    }

    #[test]
    fn find_best_discount_prefers_highest_rate_with_balance() -> TestResult {
        let ledger = Ledger::new(methods(), "PUNKTY")?;
        let candidates = [
            ledger.key_of("BosBankrut").ok_or("missing")?,
            ledger.key_of("mZysk").ok_or("missing")?,
            ledger.points_key(),
        ];

        assert_eq!(
            ledger.find_best_discount_with_balance_at_least(&candidates, dec!(100)),
            ledger.key_of("mZysk")
        );
        assert_eq!(
            ledger.find_best_discount_with_balance_at_least(&candidates, dec!(190)),
            ledger.key_of("BosBankrut")
        );
        assert_eq!(
            ledger.find_best_discount_with_balance_at_least(&candidates, dec!(250)),
            None
        );

        Ok(())
    }

    #[test]
    fn find_best_discount_keeps_first_on_ties() -> TestResult {
        let ledger = Ledger::new(
            [
                PaymentMethod::new("PUNKTY", dec!(0.15), dec!(10)),
                PaymentMethod::new("VISA", dec!(0.1), dec!(10)),
                PaymentMethod::new("MASTERCARD", dec!(0.1), dec!(10)),
            ],
            "PUNKTY",
        )?;
        let visa = ledger.key_of("VISA").ok_or("missing")?;
        let mastercard = ledger.key_of("MASTERCARD").ok_or("missing")?;

        assert_eq!(
            ledger.find_best_discount_with_balance_at_least(&[mastercard, visa], dec!(5)),
            Some(mastercard)
        );
        assert_eq!(
            ledger.find_best_discount_with_balance_at_least(&[visa, mastercard], dec!(5)),
            Some(visa)
        );

        Ok(())
    }

    #[test]
    fn report_lists_methods_in_load_order() -> TestResult {
        let mut ledger = Ledger::new(methods(), "PUNKTY")?;
        let key = ledger.key_of("BosBankrut").ok_or("missing")?;
        ledger.debit(key, dec!(12.5))?;

        let report = ledger.report();
        let ids: Vec<&str> = report.iter().map(|entry| entry.method.as_str()).collect();

        assert_eq!(ids, ["PUNKTY", "mZysk", "BosBankrut"]);
        assert_eq!(report.spent("BosBankrut"), Some(dec!(12.5)));
        assert_eq!(report.spent("mZysk"), Some(Decimal::ZERO));

        Ok(())
    }
}
