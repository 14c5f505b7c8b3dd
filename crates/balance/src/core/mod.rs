pub(crate) mod convention;
pub(crate) mod key;
pub(crate) mod node;
pub(crate) mod probe;
pub(crate) mod search;

use std::time::{Duration, Instant};

use alloy::primitives::Address;
use slot20_common::{
    constants::{DEFAULT_CONCURRENCY, DEFAULT_SLOT_LIMIT},
    ether::{
        address::parse_address,
        provider::MultiTransportProvider,
        rpc::latest_block_number,
    },
    utils::integers::format_token_amount,
};
use tracing::debug;

use crate::{
    core::{
        node::NodeClient,
        probe::{BalanceOracle, StorageReader},
        search::{find_slot, SearchOptions},
    },
    error::Error,
    interfaces::{BalanceOfArgs, BalanceOfResult, Reporter},
};

/// Find the storage slot of the `balanceOf` mapping of the token described by `args`.
///
/// All reads of a run, including the balance itself, are pinned to a single block: the one given
/// in `args.block`, or the node's latest block at the time the run starts. Progress is narrated
/// through `reporter`.
pub async fn balance_of(
    args: BalanceOfArgs,
    reporter: &dyn Reporter,
) -> Result<BalanceOfResult, Error> {
    let start_time = Instant::now();

    let token = parse_address(&args.token)
        .map_err(|e| Error::InvalidAddress(format!("token '{}': {}", args.token, e)))?;
    let holder = parse_address(&args.holder)
        .map_err(|e| Error::InvalidAddress(format!("holder '{}': {}", args.holder, e)))?;
    let options = SearchOptions::new(
        args.limit.unwrap_or(DEFAULT_SLOT_LIMIT),
        args.concurrency.unwrap_or(DEFAULT_CONCURRENCY),
    );

    let provider = MultiTransportProvider::connect(&args.rpc_url)
        .await
        .map_err(|e| Error::Transport(e.to_string()))?;
    let block_number = match args.block {
        Some(block_number) => block_number,
        None => latest_block_number(&provider)
            .await
            .map_err(|e| Error::Transport(format!("failed to fetch latest block: {e}")))?,
    };
    debug!("pinning all reads to block {}", block_number);

    let client = NodeClient::new(provider, block_number);
    let lookup = locate_balance_slot(&client, token, holder, block_number, &options, reporter);
    let result = if args.timeout > 0 {
        tokio::time::timeout(Duration::from_secs(args.timeout), lookup)
            .await
            .map_err(|_| Error::Timeout(args.timeout))??
    } else {
        lookup.await?
    };

    debug!("balance slot search took {:?}", start_time.elapsed());
    Ok(result)
}

/// Run a full lookup against any client that can answer both ERC20 calls and storage reads.
///
/// The token metadata and the holder's balance are fetched once, then [`find_slot`] searches for
/// a storage word equal to that balance. `block_number` is only recorded in the result; pinning
/// reads to it is the client's job.
pub async fn locate_balance_slot<C>(
    client: &C,
    token: Address,
    holder: Address,
    block_number: u64,
    options: &SearchOptions,
    reporter: &dyn Reporter,
) -> Result<BalanceOfResult, Error>
where
    C: StorageReader + BalanceOracle + ?Sized,
{
    let metadata = client.token_metadata(token).await;
    reporter.checking_balance(&holder, &metadata);

    let balance = client.balance_of(token, holder).await?;
    reporter.balance_checked(&holder, balance, &metadata);
    debug!(
        "holder {} holds {} {}",
        holder,
        format_token_amount(balance, metadata.decimals),
        metadata.symbol
    );

    let result = find_slot(client, token, holder, balance, options, reporter).await?;
    debug!("search for {} balance slot finished: {}", metadata.symbol, result);

    Ok(BalanceOfResult { token, holder, block_number, balance, metadata, result })
}
