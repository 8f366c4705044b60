//! Price text normalization

use crate::currency::price_glyphs;
use crate::types::Price;

/// Parse a scraped price such as `£51.77` or `KSh 1,250.00`
///
/// Currency glyphs, thousands separators and whitespace are stripped first.
/// Anything that still is not a finite, non-negative number becomes 0.0.
pub fn normalize_price(text: &str) -> Price {
    let mut cleaned = text.to_string();
    for glyph in price_glyphs() {
        cleaned = cleaned.replace(glyph, "");
    }
    let cleaned: String = cleaned
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        Ok(value) => {
            log::debug!("Price '{}' parsed to unusable value {}", text, value);
            0.0
        }
        Err(_) => {
            log::debug!("Price '{}' is not numeric", text);
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_symbols() {
        assert_eq!(normalize_price("£51.77"), 51.77);
        assert_eq!(normalize_price("Â£53.74"), 53.74);
        assert_eq!(normalize_price("$9.99"), 9.99);
        assert_eq!(normalize_price("€ 12.50"), 12.5);
        assert_eq!(normalize_price("C$20"), 20.0);
        assert_eq!(normalize_price("₦500"), 500.0);
    }

    #[test]
    fn test_strips_thousands_separators() {
        assert_eq!(normalize_price("KSh 1,250.00"), 1250.0);
        assert_eq!(normalize_price("¥1,000,000"), 1_000_000.0);
    }

    #[test]
    fn test_garbage_defaults_to_zero() {
        assert_eq!(normalize_price(""), 0.0);
        assert_eq!(normalize_price("Call for price"), 0.0);
        assert_eq!(normalize_price("£-4.00"), 0.0);
        assert_eq!(normalize_price("inf"), 0.0);
    }
}
