use std::fmt::{self, Display};

use alloy::primitives::{Address, U256};
use serde_json::{json, Value};
use slot20_common::{
    ether::{address::to_checksum, erc20::TokenMetadata},
    utils::integers::format_token_amount,
};

use crate::{
    core::{convention::LayoutConvention, search::SlotIndex},
    error::Error,
};

/// Why a search ended without finding a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    /// The holder has no balance, so there is nothing to look for.
    ZeroBalance,
    /// Every candidate slot was checked under every convention.
    Exhausted,
}

impl MissReason {
    /// A short, stable identifier for machine readable output.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MissReason::ZeroBalance => "zero-balance",
            MissReason::Exhausted => "exhausted",
        }
    }
}

/// The outcome of a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchResult {
    /// The balance mapping lives at `slot`, laid out according to `convention`.
    Found {
        /// The mapping's base slot
        slot: SlotIndex,
        /// The layout the stored word was found under
        convention: LayoutConvention,
    },
    /// No candidate matched.
    NotFound(MissReason),
}

impl SearchResult {
    /// The found slot index, or `-1` when no slot matched.
    pub fn as_output(&self) -> i128 {
        match self {
            SearchResult::Found { slot, .. } => i128::from(*slot),
            SearchResult::NotFound(_) => -1,
        }
    }

    /// Whether a slot was found.
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found { .. })
    }
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchResult::Found { slot, convention } => {
                write!(f, "slot {slot} ({})", convention.describe())
            }
            SearchResult::NotFound(reason) => write!(f, "not found ({})", reason.as_str()),
        }
    }
}

/// Everything learned by a `balanceOf` run.
#[derive(Debug, Clone)]
pub struct BalanceOfResult {
    /// The token contract
    pub token: Address,
    /// The holder whose balance was searched for
    pub holder: Address,
    /// The block every read was pinned to
    pub block_number: u64,
    /// The holder's balance, as returned by `balanceOf`
    pub balance: U256,
    /// The token's display metadata
    pub metadata: TokenMetadata,
    /// The outcome of the search
    pub result: SearchResult,
}

impl BalanceOfResult {
    /// The line printed to stdout: the slot index, or `-1`.
    pub fn output(&self) -> String {
        self.result.as_output().to_string()
    }

    /// Serialize the result into a JSON object.
    ///
    /// The balance is rendered as a decimal string, since it routinely exceeds what JSON numbers
    /// can carry without loss.
    pub fn to_value(&self) -> Value {
        let (slot, convention, reason) = match &self.result {
            SearchResult::Found { slot, convention } => {
                (Value::from(*slot), Value::from(convention.as_str()), Value::Null)
            }
            SearchResult::NotFound(reason) => {
                (Value::from(-1), Value::Null, Value::from(reason.as_str()))
            }
        };

        json!({
            "token": to_checksum(&self.token),
            "holder": to_checksum(&self.holder),
            "symbol": self.metadata.symbol,
            "decimals": self.metadata.decimals,
            "block": self.block_number,
            "balance": self.balance.to_string(),
            "formattedBalance": format_token_amount(self.balance, self.metadata.decimals),
            "slot": slot,
            "convention": convention,
            "reason": reason,
        })
    }

    /// Serialize the result into a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(&self.to_value())
            .map_err(|e| Error::Eyre(eyre::eyre!("failed to serialize result: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn result(result: SearchResult, balance: u64) -> BalanceOfResult {
        BalanceOfResult {
            token: address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
            holder: address!("F977814e90dA44bFA03b6295A0616a897441aceC"),
            block_number: 19_000_000,
            balance: U256::from(balance),
            metadata: TokenMetadata { symbol: "WETH".to_string(), decimals: 18 },
            result,
        }
    }

    #[test]
    fn test_output_found() {
        let found = result(
            SearchResult::Found { slot: 3, convention: LayoutConvention::KeyThenSlot },
            1000,
        );
        assert_eq!(found.output(), "3");
        assert!(found.result.is_found());
    }

    #[test]
    fn test_output_not_found() {
        assert_eq!(result(SearchResult::NotFound(MissReason::ZeroBalance), 0).output(), "-1");
        assert_eq!(result(SearchResult::NotFound(MissReason::Exhausted), 5).output(), "-1");
    }

    #[test]
    fn test_output_large_slot() {
        let found = result(
            SearchResult::Found { slot: u64::MAX, convention: LayoutConvention::SlotThenKey },
            1,
        );
        assert_eq!(found.output(), u64::MAX.to_string());
    }

    #[test]
    fn test_json_found() {
        let value = result(
            SearchResult::Found { slot: 3, convention: LayoutConvention::SlotThenKey },
            1000,
        )
        .to_value();

        assert_eq!(value["slot"], 3);
        assert_eq!(value["convention"], "slot-then-key");
        assert_eq!(value["reason"], Value::Null);
        assert_eq!(value["balance"], "1000");
        assert_eq!(value["symbol"], "WETH");
        assert_eq!(value["block"], 19_000_000);
        assert_eq!(value["token"], "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
    }

    #[test]
    fn test_to_json_round_trips_value() {
        let found = result(
            SearchResult::Found { slot: 3, convention: LayoutConvention::KeyThenSlot },
            1000,
        );
        let rendered = found.to_json().expect("failed to serialize");

        assert_eq!(serde_json::from_str::<Value>(&rendered).expect("invalid json"), found.to_value());
    }

    #[test]
    fn test_json_not_found() {
        let value = result(SearchResult::NotFound(MissReason::Exhausted), 5).to_value();

        assert_eq!(value["slot"], -1);
        assert_eq!(value["convention"], Value::Null);
        assert_eq!(value["reason"], "exhausted");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SearchResult::Found { slot: 3, convention: LayoutConvention::KeyThenSlot }.to_string(),
            "slot 3 (solidity mapping format (key, slot))"
        );
        assert_eq!(
            SearchResult::NotFound(MissReason::ZeroBalance).to_string(),
            "not found (zero-balance)"
        );
    }
}
