use alloy::primitives::{utils::format_units, U256};

/// Trait for formatting numbers with locale-specific formatting.
///
/// This trait adds methods to format numbers in a more human-readable way,
/// such as adding thousands separators.
pub trait ToLocaleString {
    /// Formats a number with locale-specific formatting.
    ///
    /// For numbers, this adds commas as thousand separators.
    fn to_locale_string(&self) -> String;
}

impl ToLocaleString for u64 {
    /// Add commas every 3 digits, e.g. 1000000 -> 1,000,000.
    ///
    /// ```
    /// use slot20_common::utils::integers::ToLocaleString;
    ///
    /// assert_eq!(1000000u64.to_locale_string(), "1,000,000");
    /// ```
    fn to_locale_string(&self) -> String {
        let num_str = self.to_string();
        let mut result = String::new();

        for (count, c) in num_str.chars().rev().enumerate() {
            if count != 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }
}

/// Render a raw token amount using the token's decimals, e.g. `1500000` with 6 decimals becomes
/// `1.500000`. Falls back to the raw integer if the decimals are out of range.
///
/// ```
/// use alloy::primitives::U256;
/// use slot20_common::utils::integers::format_token_amount;
///
/// assert_eq!(format_token_amount(U256::from(1_500_000u64), 6), "1.500000");
/// ```
pub fn format_token_amount(amount: U256, decimals: u8) -> String {
    format_units(amount, decimals).unwrap_or_else(|_| amount.to_string())
}

#[cfg(test)]
mod tests {
    use crate::utils::integers::*;

    #[test]
    fn test_to_locale_string() {
        // Test case: Single-digit number
        assert_eq!(5u64.to_locale_string(), "5");

        // Test case: Three-digit number
        assert_eq!(123u64.to_locale_string(), "123");

        // Test case: Four-digit number
        assert_eq!(1234u64.to_locale_string(), "1,234");

        // Test case: Seven-digit number
        assert_eq!(1234567u64.to_locale_string(), "1,234,567");
    }

    #[test]
    fn test_format_token_amount() {
        let one_ether = U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(format_token_amount(one_ether, 18), "1.000000000000000000");
        assert_eq!(format_token_amount(U256::from(1234u64), 2), "12.34");
    }
}
