//! Currency types for the reference rate table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies known to the reference configuration (ISO 4217 codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// US Dollar (base)
    USD,
    /// Kenyan Shilling
    KES,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// Japanese Yen
    JPY,
    /// Canadian Dollar
    CAD,
    /// Australian Dollar
    AUD,
    /// Indian Rupee
    INR,
}

impl Currency {
    /// Get ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::KES => "KES",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::INR => "INR",
        }
    }

    /// Get currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::KES => "KSh",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::CAD => "C$",
            Currency::AUD => "A$",
            Currency::INR => "₹",
        }
    }

    /// Units of this currency per 1 USD in the reference table
    pub fn reference_rate(&self) -> f64 {
        match self {
            Currency::USD => 1.0,
            Currency::KES => 150.0,
            Currency::EUR => 0.85,
            Currency::GBP => 0.73,
            Currency::JPY => 110.0,
            Currency::CAD => 1.25,
            Currency::AUD => 1.35,
            Currency::INR => 75.0,
        }
    }

    /// Parse from ISO code
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "KES" => Some(Currency::KES),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
            "INR" => Some(Currency::INR),
            _ => None,
        }
    }

    /// Get all supported currencies
    pub fn all() -> Vec<Currency> {
        vec![
            Currency::USD,
            Currency::KES,
            Currency::EUR,
            Currency::GBP,
            Currency::JPY,
            Currency::CAD,
            Currency::AUD,
            Currency::INR,
        ]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Currency glyphs that may prefix a scraped price, longest first so that
/// `C$` is removed before `$`
pub fn price_glyphs() -> Vec<&'static str> {
    let mut glyphs: Vec<&'static str> = Currency::all().iter().map(|c| c.symbol()).collect();
    glyphs.push("₦");
    // Mis-decoded "£" shows up as "Â£"
    glyphs.push("Â");
    glyphs.sort_by(|a, b| b.len().cmp(&a.len()));
    glyphs.dedup();
    glyphs
}
