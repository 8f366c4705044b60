//! Properties of the cross-rate converter

use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use price_scraper::fx::{round_price, CurrencyConverter, RateTable};
use price_scraper::types::ProductRecord;
use proptest::prelude::*;

const CODES: [&str; 8] = ["USD", "KES", "EUR", "GBP", "JPY", "CAD", "AUD", "INR"];

fn converter() -> CurrencyConverter {
    CurrencyConverter::new(RateTable::reference())
}

#[test]
fn test_scenario_gbp_to_kes() {
    let table = RateTable::from_entries(vec![("USD", 1.0), ("KES", 150.0), ("GBP", 0.73)]).unwrap();
    let converter = CurrencyConverter::new(table);
    let book = ProductRecord::new("A Light in the Attic", 51.77, "GBP", "Three", "In stock");

    let converted = converter.convert(&[book], "KES");

    assert_relative_eq!(converter.get_rate("GBP", "KES"), 205.4795, epsilon = 1e-4);
    assert_eq!(converted[0].exchange_rate, 205.4795);
    assert_eq!(converted[0].converted_price, 10637.67);
}

#[test]
fn test_every_reference_pair_inverts() {
    let c = converter();
    for a in CODES {
        for b in CODES {
            assert_relative_eq!(c.get_rate(a, b) * c.get_rate(b, a), 1.0, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_unparsable_price_is_omitted_not_zeroed() {
    let ts = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let records = vec![
        ProductRecord::new("ok", 10.0, "GBP", "One", "In stock"),
        ProductRecord::new("bad", f64::INFINITY, "GBP", "One", "In stock"),
    ];

    let converted = converter().convert_at(&records, "USD", ts);

    assert_eq!(converted.len(), 1);
    assert_eq!(converted[0].name, "ok");
}

proptest! {
    #[test]
    fn prop_same_code_is_exactly_one(code in "[A-Z]{3}") {
        prop_assert_eq!(converter().get_rate(&code, &code), 1.0);
    }

    #[test]
    fn prop_rate_inverse(a in 0usize..8, b in 0usize..8) {
        let c = converter();
        let product = c.get_rate(CODES[a], CODES[b]) * c.get_rate(CODES[b], CODES[a]);
        prop_assert!((product - 1.0).abs() < 1e-12);
    }

    #[test]
    fn prop_converted_price_matches_formula(
        price in 0.0f64..10_000.0,
        from in 0usize..8,
        to in 0usize..8,
    ) {
        let c = converter();
        let record = ProductRecord::new("p", price, CODES[from], "One", "In stock");
        let converted = c.convert(&[record], CODES[to]);

        prop_assert_eq!(converted.len(), 1);
        let expected = round_price(price * c.get_rate(CODES[from], CODES[to]));
        prop_assert_eq!(converted[0].converted_price, expected);
    }

    #[test]
    fn prop_batch_shares_timestamp(prices in proptest::collection::vec(0.0f64..500.0, 0..20)) {
        let records: Vec<ProductRecord> = prices
            .iter()
            .map(|p| ProductRecord::new("p", *p, "GBP", "One", "In stock"))
            .collect();

        let converted = converter().convert(&records, "EUR");

        prop_assert_eq!(converted.len(), records.len());
        if let Some(first) = converted.first() {
            prop_assert!(converted.iter().all(|r| r.conversion_timestamp == first.conversion_timestamp));
        }
    }
}
