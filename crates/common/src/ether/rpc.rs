use crate::{error::Error, ether::provider::MultiTransportProvider};
use alloy::{
    eips::BlockId,
    primitives::{Address, Bytes, B256, U256},
    transports::{RpcError, TransportError},
};
use backoff::ExponentialBackoff;
use std::time::Duration;
use tracing::{trace, warn};

/// The backoff policy shared by every node request.
fn request_backoff() -> ExponentialBackoff {
    ExponentialBackoff {
        max_elapsed_time: Some(Duration::from_secs(10)),
        ..ExponentialBackoff::default()
    }
}

/// Sort a failed request into a retryable or a permanent failure.
///
/// Transport hiccups and error responses from the node (rate limits, overloaded backends) are
/// retried. A reverted call and anything else will fail the same way on every attempt.
fn classify(err: TransportError, what: &str) -> backoff::Error<Error> {
    match err {
        RpcError::ErrorResp(payload)
            if payload.code == 3 ||
                payload.message.contains("revert") ||
                payload.as_revert_data().is_some() =>
        {
            trace!("call reverted while {what}: {payload}");
            backoff::Error::permanent(Error::Reverted(format!("{what}: {payload}")))
        }
        RpcError::Transport(kind) => {
            warn!("transport failure while {what}: {kind}. retrying...");
            backoff::Error::transient(Error::RpcError(format!("{what}: {kind}")))
        }
        RpcError::ErrorResp(payload) => {
            warn!("node returned an error while {what}: {payload}. retrying...");
            backoff::Error::transient(Error::RpcError(format!("{what}: {payload}")))
        }
        other => backoff::Error::permanent(Error::RpcError(format!("{what}: {other}"))),
    }
}

/// Get the latest block number known to the node
///
/// ```no_run
/// use slot20_common::ether::{provider::MultiTransportProvider, rpc::latest_block_number};
///
/// // let provider = MultiTransportProvider::connect("https://eth.llamarpc.com").await?;
/// // let block_number = latest_block_number(&provider).await?;
/// // assert!(block_number > 0);
/// ```
pub async fn latest_block_number(provider: &MultiTransportProvider) -> Result<u64, Error> {
    backoff::future::retry(request_backoff(), || async {
        trace!("fetching latest block number from node");
        provider.get_block_number().await.map_err(|e| classify(e, "fetching block number"))
    })
    .await
}

/// Read a single storage word of `contract` at `key`.
///
/// Returns `Ok(None)` when the node answered but the answer could not be decoded into a 256-bit
/// word. Transport failures are retried and surface as [`Error::RpcError`] once the backoff
/// policy gives up.
///
/// ```no_run
/// use slot20_common::ether::{provider::MultiTransportProvider, rpc::get_storage_at};
///
/// // let provider = MultiTransportProvider::connect("https://eth.llamarpc.com").await?;
/// // let word = get_storage_at(&provider, contract, key, BlockId::latest()).await?;
/// ```
pub async fn get_storage_at(
    provider: &MultiTransportProvider,
    contract: Address,
    key: B256,
    block: BlockId,
) -> Result<Option<U256>, Error> {
    backoff::future::retry(request_backoff(), || async {
        trace!("fetching storage from node for contract: '{}' key: '{}' .", contract, key);

        match provider.get_storage_at(contract, key, block).await {
            Ok(word) => Ok(Some(word)),
            Err(RpcError::DeserError { text, .. }) => {
                trace!("undecodable storage response for key '{}': {}", key, text);
                Ok(None)
            }
            Err(RpcError::NullResp) => {
                trace!("empty storage response for key '{}'", key);
                Ok(None)
            }
            Err(e) => Err(classify(e, "reading storage")),
        }
    })
    .await
}

/// Execute a read-only call against `to`, returning the raw return data.
///
/// ```no_run
/// use slot20_common::ether::{provider::MultiTransportProvider, rpc::call};
///
/// // let provider = MultiTransportProvider::connect("https://eth.llamarpc.com").await?;
/// // let output = call(&provider, token, calldata, BlockId::latest()).await?;
/// ```
pub async fn call(
    provider: &MultiTransportProvider,
    to: Address,
    calldata: Bytes,
    block: BlockId,
) -> Result<Bytes, Error> {
    backoff::future::retry(request_backoff(), || async {
        trace!("calling contract '{}' with calldata '{}' .", to, calldata);
        provider.call(to, calldata.clone(), block).await.map_err(|e| classify(e, "calling contract"))
    })
    .await
}
