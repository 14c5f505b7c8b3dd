use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use slot20_common::ether::erc20::TokenMetadata;

use crate::error::Error;

/// What a single storage read produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The node returned a 256-bit word.
    Value(U256),
    /// The node answered, but the answer was not a decodable word.
    Unreadable,
}

impl ProbeOutcome {
    /// Whether this read is proof that the probed key holds `balance`.
    ///
    /// An unreadable word never matches, not even a zero balance.
    pub fn matches(&self, balance: &U256) -> bool {
        match self {
            ProbeOutcome::Value(word) => word == balance,
            ProbeOutcome::Unreadable => false,
        }
    }
}

/// Reads raw storage words of a contract.
///
/// Implementations are expected to answer every read against the same chain state, so that all
/// probes of a single search are consistent with each other.
#[async_trait]
pub trait StorageReader: Send + Sync {
    /// Read the word stored at `key` in `contract`'s storage.
    ///
    /// Errors are reserved for transport failures. A response that cannot be decoded is reported
    /// as [`ProbeOutcome::Unreadable`].
    async fn read_storage(&self, contract: Address, key: B256) -> Result<ProbeOutcome, Error>;
}

/// Answers questions through a token's public ERC20 interface.
#[async_trait]
pub trait BalanceOracle: Send + Sync {
    /// The token balance of `holder`, as returned by `balanceOf(holder)`.
    async fn balance_of(&self, token: Address, holder: Address) -> Result<U256, Error>;

    /// Display metadata of `token`. Never fails; falls back to [`TokenMetadata::fallback`].
    async fn token_metadata(&self, token: Address) -> TokenMetadata;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_matches_equal_balance() {
        assert!(ProbeOutcome::Value(U256::from(1000)).matches(&U256::from(1000)));
        assert!(!ProbeOutcome::Value(U256::from(999)).matches(&U256::from(1000)));
    }

    #[test]
    fn test_unreadable_never_matches() {
        assert!(!ProbeOutcome::Unreadable.matches(&U256::ZERO));
        assert!(!ProbeOutcome::Unreadable.matches(&U256::from(1)));
        assert!(!ProbeOutcome::Unreadable.matches(&U256::MAX));
    }
}
