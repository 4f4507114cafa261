//! Integration tests for single-order allocation scenarios

use rust_decimal_macros::dec;
use testresult::TestResult;

use tender::{
    batch::{BatchDriver, BatchError},
    config::EngineConfig,
    ledger::Ledger,
    offers::OfferKind,
    orders::Order,
    payments::PaymentMethod,
    processor::{DiscountProcessor, NoApplicableDiscount},
};

fn processor() -> DiscountProcessor {
    DiscountProcessor::from_config(&EngineConfig::default())
}

#[test]
fn order_fully_paid_with_points() -> TestResult {
    let ledger = Ledger::new(
        [
            PaymentMethod::new("PUNKTY", dec!(0.15), dec!(10)),
            PaymentMethod::new("VISA", dec!(0.1), dec!(10)),
        ],
        "PUNKTY",
    )?;

    let offer = processor().process(&Order::new("1", dec!(10)), &ledger)?;

    assert_eq!(offer.kind(), OfferKind::FullPoints);
    assert_eq!(offer.price(), dec!(8.5));
    assert_eq!(offer.payments().len(), 1);
    assert_eq!(offer.amount_for(ledger.points_key()), Some(dec!(8.5)));

    Ok(())
}

#[test]
fn order_split_between_points_and_card() -> TestResult {
    let ledger = Ledger::new(
        [
            PaymentMethod::new("PUNKTY", dec!(0.15), dec!(1)),
            PaymentMethod::new("VISA", dec!(0.2), dec!(10)),
        ],
        "PUNKTY",
    )?;
    let visa = ledger.key_of("VISA").ok_or("VISA not loaded")?;

    let offer = processor().process(&Order::new("1", dec!(10)), &ledger)?;

    assert_eq!(offer.kind(), OfferKind::PartialPoints);
    assert_eq!(offer.price(), dec!(9));
    assert_eq!(offer.amount_for(ledger.points_key()), Some(dec!(1)));
    assert_eq!(offer.amount_for(visa), Some(dec!(8)));

    Ok(())
}

#[test]
fn best_promoted_card_wins() -> TestResult {
    let ledger = Ledger::new(
        [
            PaymentMethod::new("PUNKTY", dec!(0.15), dec!(0)),
            PaymentMethod::new("VISA", dec!(0.1), dec!(1)),
            PaymentMethod::new("MASTERCARD", dec!(0.25), dec!(1)),
        ],
        "PUNKTY",
    )?;
    let mastercard = ledger.key_of("MASTERCARD").ok_or("MASTERCARD not loaded")?;

    let offer = processor().process(
        &Order::with_promotions("1", dec!(1), ["MASTERCARD", "VISA"]),
        &ledger,
    )?;

    assert_eq!(offer.kind(), OfferKind::FullCard);
    assert_eq!(offer.price(), dec!(0.75));
    assert_eq!(offer.amount_for(mastercard), Some(dec!(0.75)));

    Ok(())
}

#[test]
fn unpayable_order_fails_the_whole_batch() {
    let methods = [
        PaymentMethod::new("PUNKTY", dec!(0.15), dec!(0)),
        PaymentMethod::new("VISA", dec!(0.1), dec!(5)),
    ];
    let orders = [Order::new("small", dec!(1)), Order::new("large", dec!(10))];

    let result = BatchDriver::default().run(&orders, methods);

    assert_eq!(
        result,
        Err(BatchError::NoApplicableDiscount(NoApplicableDiscount {
            order_id: "large".to_string()
        }))
    );
}
