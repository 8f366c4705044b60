//! Rounding helpers for converted amounts and rates
//!
//! Rounding is half away from zero (`f64::round` on the scaled value).

/// Decimal places kept on converted prices
pub const PRICE_DECIMALS: u32 = 2;

/// Decimal places kept on reported exchange rates
pub const RATE_DECIMALS: u32 = 4;

/// Round `value` to `decimals` places, half away from zero
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Round a monetary amount to cents
pub fn round_price(value: f64) -> f64 {
    round_to(value, PRICE_DECIMALS)
}

/// Round an exchange rate for reporting
pub fn round_rate(value: f64) -> f64 {
    round_to(value, RATE_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_price() {
        assert_eq!(round_price(10637.671232), 10637.67);
        assert_eq!(round_price(0.125), 0.13);
        assert_eq!(round_price(0.0), 0.0);
    }

    #[test]
    fn test_round_rate() {
        assert_eq!(round_rate(150.0 / 0.73), 205.4795);
        assert_eq!(round_rate(1.0), 1.0);
    }

    #[test]
    fn test_round_to_zero_places() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
    }
}
