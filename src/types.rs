//! Core record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp type used throughout the library
pub type Timestamp = DateTime<Utc>;

/// Monetary amount
pub type Price = f64;

/// Placeholder names used when a field cannot be read from the page
pub mod sentinel {
    pub const NAME: &str = "Unknown Product";
    pub const RATING: &str = "No rating";
    pub const AVAILABILITY: &str = "Unknown";
}

/// One product as it appears on the listing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub original_price: Price,
    pub original_currency: String,
    pub rating: String,
    pub availability: String,
}

impl ProductRecord {
    /// Create a new product record
    pub fn new(
        name: impl Into<String>,
        original_price: Price,
        original_currency: impl Into<String>,
        rating: impl Into<String>,
        availability: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            original_price,
            original_currency: original_currency.into(),
            rating: rating.into(),
            availability: availability.into(),
        }
    }
}

/// A product record with its price expressed in a target currency
///
/// Field order matches the exported schema; CSV columns follow it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedRecord {
    pub name: String,
    pub original_price: Price,
    pub original_currency: String,
    pub rating: String,
    pub availability: String,
    pub converted_price: Price,
    pub target_currency: String,
    pub exchange_rate: f64,
    pub conversion_timestamp: Timestamp,
}

impl ConvertedRecord {
    /// Build the converted view of `product`
    ///
    /// `converted_price` and `exchange_rate` are stored as given; rounding
    /// is the converter's job.
    pub fn from_product(
        product: ProductRecord,
        converted_price: Price,
        target_currency: impl Into<String>,
        exchange_rate: f64,
        conversion_timestamp: Timestamp,
    ) -> Self {
        let ProductRecord {
            name,
            original_price,
            original_currency,
            rating,
            availability,
        } = product;

        Self {
            name,
            original_price,
            original_currency,
            rating,
            availability,
            converted_price,
            target_currency: target_currency.into(),
            exchange_rate,
            conversion_timestamp,
        }
    }

    /// The product fields without conversion metadata
    pub fn product(&self) -> ProductRecord {
        ProductRecord {
            name: self.name.clone(),
            original_price: self.original_price,
            original_currency: self.original_currency.clone(),
            rating: self.rating.clone(),
            availability: self.availability.clone(),
        }
    }
}
