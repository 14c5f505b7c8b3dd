use alloy::{
    eips::BlockId,
    primitives::{Address, B256, U256},
};
use async_trait::async_trait;
use eyre::eyre;
use slot20_common::{
    error::Error as CommonError,
    ether::{
        erc20::{self, TokenMetadata},
        provider::MultiTransportProvider,
        rpc::get_storage_at,
    },
};

use crate::{
    core::probe::{BalanceOracle, ProbeOutcome, StorageReader},
    error::Error,
};

/// A node-backed [`StorageReader`] and [`BalanceOracle`] pinned to a single block.
///
/// Every read issued through a [`NodeClient`] targets the same block, so the balance and every
/// storage word it is compared against describe the same chain state.
#[derive(Debug, Clone)]
pub struct NodeClient {
    provider: MultiTransportProvider,
    block: BlockId,
}

impl NodeClient {
    /// Create a client that reads state as of `block_number`.
    pub fn new(provider: MultiTransportProvider, block_number: u64) -> Self {
        Self { provider, block: BlockId::number(block_number) }
    }
}

fn transport_error(e: CommonError) -> Error {
    match e {
        CommonError::RpcError(msg) => Error::Transport(msg),
        other => Error::Eyre(eyre!(other)),
    }
}

/// A `balanceOf` call that reverts or returns garbage means the target is not a token, which no
/// amount of retrying will change.
fn balance_error(token: &Address, e: CommonError) -> Error {
    match e {
        CommonError::ParseError(msg) | CommonError::Reverted(msg) => {
            Error::Eyre(eyre!("{token} does not look like an ERC20 token: {msg}"))
        }
        other => transport_error(other),
    }
}

#[async_trait]
impl StorageReader for NodeClient {
    async fn read_storage(&self, contract: Address, key: B256) -> Result<ProbeOutcome, Error> {
        match get_storage_at(&self.provider, contract, key, self.block).await {
            Ok(Some(word)) => Ok(ProbeOutcome::Value(word)),
            Ok(None) => Ok(ProbeOutcome::Unreadable),
            Err(e) => Err(transport_error(e)),
        }
    }
}

#[async_trait]
impl BalanceOracle for NodeClient {
    async fn balance_of(&self, token: Address, holder: Address) -> Result<U256, Error> {
        erc20::balance_of(&self.provider, token, holder, self.block)
            .await
            .map_err(|e| balance_error(&token, e))
    }

    async fn token_metadata(&self, token: Address) -> TokenMetadata {
        erc20::token_metadata(&self.provider, token, self.block).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    use crate::core::{convention::LayoutConvention, key::derive_key};

    const WETH: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
    const HOLDER: Address = address!("F977814e90dA44bFA03b6295A0616a897441aceC");

    #[test]
    fn test_transport_error_mapping() {
        assert!(matches!(
            transport_error(CommonError::RpcError("connection refused".to_string())),
            Error::Transport(msg) if msg == "connection refused"
        ));
        assert!(matches!(transport_error(CommonError::Generic("x".to_string())), Error::Eyre(_)));
    }

    #[test]
    fn test_reverted_balance_of_is_not_a_transport_error() {
        let error = balance_error(
            &WETH,
            CommonError::Reverted("calling contract: error code 3: execution reverted".to_string()),
        );

        assert!(matches!(error, Error::Eyre(_)));
        assert!(error.to_string().contains("does not look like an ERC20 token"));
        assert!(matches!(
            balance_error(&WETH, CommonError::RpcError("connection refused".to_string())),
            Error::Transport(_)
        ));
    }

    #[tokio::test]
    async fn test_weth_balance_matches_storage() {
        let Ok(rpc_url) = std::env::var("RPC_URL") else {
            println!("RPC_URL not set, skipping test");
            return;
        };

        let provider = MultiTransportProvider::connect(&rpc_url)
            .await
            .expect("failed to connect to provider");
        let block_number = slot20_common::ether::rpc::latest_block_number(&provider)
            .await
            .expect("failed to fetch latest block number");
        let client = NodeClient::new(provider, block_number);

        let balance = client.balance_of(WETH, HOLDER).await.expect("balanceOf() failed");
        let word = client
            .read_storage(WETH, derive_key(&HOLDER, 3, LayoutConvention::KeyThenSlot))
            .await
            .expect("eth_getStorageAt failed");

        assert!(word.matches(&balance));
    }
}
