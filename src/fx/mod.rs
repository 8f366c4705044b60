//! Foreign exchange: the fixed rate table and the converter built on it
//!
//! # Components
//!
//! - **rate_table**: immutable code -> rate mapping quoted against USD
//! - **converter**: cross-rate lookup and batch record conversion
//! - **utils**: rounding of converted prices and reported rates
//!
//! # Example
//!
//! ```rust
//! use price_scraper::fx::{CurrencyConverter, RateTable};
//! use price_scraper::types::ProductRecord;
//!
//! let converter = CurrencyConverter::new(RateTable::reference());
//! let books = vec![ProductRecord::new("Sharp Objects", 47.82, "GBP", "Four", "In stock")];
//!
//! let converted = converter.convert(&books, "USD");
//! assert_eq!(converted[0].converted_price, 65.51);
//! ```

pub mod converter;
pub mod rate_table;
pub mod utils;

pub use converter::CurrencyConverter;
pub use rate_table::{RateTable, BASE_CURRENCY};
pub use utils::{round_price, round_rate, round_to};
