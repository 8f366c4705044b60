//! Fixed exchange rate table
//!
//! Every entry is "units of this currency per 1 unit of the base currency".
//! The table is built once and never mutated afterwards.

use crate::currency::Currency;
use crate::error::{Result, ScraperError};
use std::collections::BTreeMap;

/// Base currency all rates are quoted against
pub const BASE_CURRENCY: &str = "USD";

/// Immutable code -> rate mapping quoted against [`BASE_CURRENCY`]
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    rates: BTreeMap<String, f64>,
}

impl RateTable {
    /// The reference table: USD, KES, EUR, GBP, JPY, CAD, AUD, INR
    pub fn reference() -> Self {
        let rates = Currency::all()
            .into_iter()
            .map(|c| (c.code().to_string(), c.reference_rate()))
            .collect();
        Self { rates }
    }

    /// Build a table from `(code, rate)` entries
    ///
    /// Codes are upper-cased. Rates must be finite and positive, and the base
    /// currency, if given, must be exactly 1.0. The base is added when absent.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut rates = BTreeMap::new();

        for (code, rate) in entries {
            let code = normalize_code(code.as_ref());
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ScraperError::InvalidRate { code, rate });
            }
            if code == BASE_CURRENCY && rate != 1.0 {
                return Err(ScraperError::InvalidRate { code, rate });
            }
            rates.insert(code, rate);
        }

        rates.entry(BASE_CURRENCY.to_string()).or_insert(1.0);
        Ok(Self { rates })
    }

    /// Reference table with `overrides` layered on top
    pub fn reference_with<I, S>(overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut entries: Vec<(String, f64)> = Self::reference().rates.into_iter().collect();
        entries.extend(
            overrides
                .into_iter()
                .map(|(code, rate)| (code.as_ref().to_string(), rate)),
        );
        Self::from_entries(entries)
    }

    /// Rate for `code`, or `None` when the table has no entry
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&normalize_code(code)).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(&normalize_code(code))
    }

    /// All codes in the table, sorted
    pub fn codes(&self) -> Vec<&str> {
        self.rates.keys().map(String::as_str).collect()
    }

    pub fn base(&self) -> &'static str {
        BASE_CURRENCY
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::reference()
    }
}

pub(crate) fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_table() {
        let table = RateTable::reference();
        assert_eq!(table.len(), 8);
        assert_eq!(table.rate("USD"), Some(1.0));
        assert_eq!(table.rate("KES"), Some(150.0));
        assert_eq!(table.rate("gbp"), Some(0.73));
        assert_eq!(table.rate("XYZ"), None);
    }

    #[test]
    fn test_codes_sorted() {
        let table = RateTable::reference();
        assert_eq!(
            table.codes(),
            vec!["AUD", "CAD", "EUR", "GBP", "INR", "JPY", "KES", "USD"]
        );
    }

    #[test]
    fn test_from_entries_adds_base() {
        let table = RateTable::from_entries(vec![("kes", 150.0), ("GBP", 0.73)]).unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.contains("USD"));
        assert!(table.contains("KES"));
    }

    #[test]
    fn test_from_entries_rejects_bad_rates() {
        assert!(RateTable::from_entries(vec![("EUR", 0.0)]).is_err());
        assert!(RateTable::from_entries(vec![("EUR", -1.0)]).is_err());
        assert!(RateTable::from_entries(vec![("EUR", f64::NAN)]).is_err());
        assert!(RateTable::from_entries(vec![("USD", 2.0)]).is_err());
    }

    #[test]
    fn test_reference_with_overrides() {
        let table = RateTable::reference_with(vec![("EUR", 0.92), ("NGN", 1500.0)]).unwrap();
        assert_eq!(table.rate("EUR"), Some(0.92));
        assert_eq!(table.rate("NGN"), Some(1500.0));
        assert_eq!(table.rate("KES"), Some(150.0));
    }
}
