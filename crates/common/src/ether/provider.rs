//! Create a custom data transport to use with a Provider.
use alloy::{
    eips::BlockId,
    network::Ethereum,
    primitives::{Address, Bytes, B256, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::TransactionRequest,
    transports::TransportResult,
};
use eyre::Result;

/// [`MultiTransportProvider`] is a convenience wrapper around the different transport types
/// supported by the [`Provider`].
///
/// A single instance is created per run and handed to every component that talks to the node.
#[derive(Clone, Debug)]
pub struct MultiTransportProvider {
    provider: RootProvider<Ethereum>,
}

// We implement a convenience "constructor" method, to easily initialize the transport.
// This will connect to [`Http`] if the rpc_url contains 'http', to [`Ws`] if it contains 'ws',
// otherwise it'll default to [`Ipc`].
impl MultiTransportProvider {
    /// Connect to a provider using the given rpc_url.
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        if rpc_url.is_empty() {
            return Err(eyre::eyre!("No RPC URL provided"));
        }

        let provider = ProviderBuilder::new()
            .connect(rpc_url)
            .await
            .map_err(|e| eyre::eyre!("failed to connect to provider '{rpc_url}': {e}"))?
            .root()
            .clone();
        Ok(Self { provider })
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> TransportResult<u64> {
        self.provider.get_block_number().await
    }

    /// Read the raw 32-byte word stored under `key` in the storage of `address`.
    ///
    /// Errors are returned untouched so that callers can tell a transport failure apart from a
    /// response that could not be decoded.
    pub async fn get_storage_at(
        &self,
        address: Address,
        key: B256,
        block: BlockId,
    ) -> TransportResult<U256> {
        self.provider.get_storage_at(address, U256::from_be_bytes(key.0)).block_id(block).await
    }

    /// Execute a read-only call against `to` with the given calldata.
    pub async fn call(&self, to: Address, calldata: Bytes, block: BlockId) -> TransportResult<Bytes> {
        let tx = TransactionRequest::default().to(to).input(calldata.into());
        self.provider.call(tx).block(block).await
    }
}
