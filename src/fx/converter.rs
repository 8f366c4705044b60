//! Cross-rate currency conversion over a [`RateTable`]

use super::rate_table::{normalize_code, RateTable};
use super::utils::{round_price, round_rate};
use crate::error::{Result, ScraperError};
use crate::types::{ConvertedRecord, Price, ProductRecord, Timestamp};
use chrono::Utc;

/// Converts prices between any two codes through the table's base currency
///
/// # Example
/// ```
/// use price_scraper::fx::{CurrencyConverter, RateTable};
///
/// let converter = CurrencyConverter::new(RateTable::reference());
/// let rate = converter.get_rate("GBP", "KES");
/// assert!((rate - 150.0 / 0.73).abs() < 1e-9);
/// assert_eq!(converter.get_rate("XYZ", "XYZ"), 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CurrencyConverter {
    table: RateTable,
}

impl CurrencyConverter {
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    /// Exchange rate for converting one unit of `from` into `to`
    ///
    /// Identical codes return exactly 1.0. Codes missing from the table are
    /// treated as worth one base unit, so this never fails.
    pub fn get_rate(&self, from: &str, to: &str) -> f64 {
        let from = normalize_code(from);
        let to = normalize_code(to);
        if from == to {
            return 1.0;
        }

        let rate_from = self.lookup_or_base(&from);
        let rate_to = self.lookup_or_base(&to);
        rate_to / rate_from
    }

    fn lookup_or_base(&self, code: &str) -> f64 {
        self.table.rate(code).unwrap_or_else(|| {
            log::debug!("No rate for {}, treating it as {}", code, self.table.base());
            1.0
        })
    }

    /// Convert a single amount, rounded to cents
    pub fn convert_amount(&self, amount: Price, from: &str, to: &str) -> Result<Price> {
        let converted = amount * self.get_rate(from, to);
        if !converted.is_finite() {
            return Err(ScraperError::Conversion(format!(
                "{} {} does not convert to a finite {} amount",
                amount, from, to
            )));
        }
        Ok(round_price(converted))
    }

    /// Convert a batch of records into `target`, stamped with the current time
    pub fn convert(&self, records: &[ProductRecord], target: &str) -> Vec<ConvertedRecord> {
        self.convert_at(records, target, Utc::now())
    }

    /// Convert a batch of records into `target`, stamped with `timestamp`
    ///
    /// Records that cannot be converted are logged and left out; the order of
    /// the remaining records is preserved.
    pub fn convert_at(
        &self,
        records: &[ProductRecord],
        target: &str,
        timestamp: Timestamp,
    ) -> Vec<ConvertedRecord> {
        let target = normalize_code(target);
        log::info!("Converting {} prices to {}", records.len(), target);

        let converted: Vec<ConvertedRecord> = records
            .iter()
            .filter_map(|record| match self.convert_record(record, &target, timestamp) {
                Ok(converted) => Some(converted),
                Err(e) => {
                    log::warn!("Skipping '{}': {}", record.name, e);
                    None
                }
            })
            .collect();

        if converted.len() < records.len() {
            log::warn!(
                "{} of {} records could not be converted",
                records.len() - converted.len(),
                records.len()
            );
        }
        converted
    }

    fn convert_record(
        &self,
        record: &ProductRecord,
        target: &str,
        timestamp: Timestamp,
    ) -> Result<ConvertedRecord> {
        let price = record.original_price;
        if !price.is_finite() || price < 0.0 {
            return Err(ScraperError::Conversion(format!("malformed price {}", price)));
        }

        let rate = self.get_rate(&record.original_currency, target);
        let converted = price * rate;
        if !converted.is_finite() {
            return Err(ScraperError::Conversion(format!(
                "price {} overflows at rate {}",
                price, rate
            )));
        }

        Ok(ConvertedRecord::from_product(
            record.clone(),
            round_price(converted),
            target,
            round_rate(rate),
            timestamp,
        ))
    }
}
