use alloy::primitives::{Address, FixedBytes, U256};

/// A convenience function which encodes a given EVM type into a sized, lowercase hex string.
pub trait ToLowerHex {
    /// Encodes the value as a `0x`-prefixed, zero-padded, lowercase hex string.
    fn to_lower_hex(&self) -> String;
}

impl ToLowerHex for U256 {
    fn to_lower_hex(&self) -> String {
        format!("{:#066x}", self)
    }
}

impl ToLowerHex for FixedBytes<32> {
    fn to_lower_hex(&self) -> String {
        format!("{:#x}", self)
    }
}

impl ToLowerHex for Address {
    fn to_lower_hex(&self) -> String {
        format!("{:#x}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u256_to_lower_hex_is_padded() {
        assert_eq!(
            U256::from(1000).to_lower_hex(),
            "0x00000000000000000000000000000000000000000000000000000000000003e8"
        );
    }

    #[test]
    fn test_b256_to_lower_hex() {
        assert_eq!(
            FixedBytes::<32>::ZERO.to_lower_hex(),
            "0x0000000000000000000000000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_address_to_lower_hex() {
        let address: Address =
            "0xF977814e90dA44bFA03b6295A0616a897441aceC".parse().expect("address");
        assert_eq!(address.to_lower_hex(), "0xf977814e90da44bfa03b6295a0616a897441acec");
    }
}
