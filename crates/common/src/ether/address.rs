//! Address validation and canonical formatting.

use alloy::primitives::Address;
use std::str::FromStr;

use crate::error::Error;

/// Parse a user supplied address.
///
/// Accepts 40 hex characters with or without a `0x` prefix. All-lowercase and all-uppercase
/// input is taken as-is; mixed-case input must carry a valid EIP-55 checksum.
///
/// ```
/// use slot20_common::ether::address::parse_address;
///
/// assert!(parse_address("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2").is_ok());
/// assert!(parse_address("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2").is_ok());
/// assert!(parse_address("0xC02AAA39b223FE8D0A0e5C4F27eAD9083C756Cc2").is_err());
/// ```
pub fn parse_address(input: &str) -> Result<Address, Error> {
    let trimmed = input.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::ParseError(format!("invalid address '{input}'")));
    }

    let address = Address::from_str(hex)
        .map_err(|e| Error::ParseError(format!("invalid address '{input}': {e}")))?;

    let mixed_case = hex.chars().any(|c| c.is_ascii_lowercase()) &&
        hex.chars().any(|c| c.is_ascii_uppercase());
    if mixed_case && to_checksum(&address)[2..] != *hex {
        return Err(Error::ParseError(format!("bad address checksum '{input}'")));
    }

    Ok(address)
}

/// Format an address with its EIP-55 checksum casing.
///
/// ```
/// use slot20_common::ether::address::{parse_address, to_checksum};
///
/// let address = parse_address("0xf977814e90da44bfa03b6295a0616a897441acec").unwrap();
/// assert_eq!(to_checksum(&address), "0xF977814e90dA44bFA03b6295A0616a897441aceC");
/// ```
pub fn to_checksum(address: &Address) -> String {
    address.to_checksum(None)
}
