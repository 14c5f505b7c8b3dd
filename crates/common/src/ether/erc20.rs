//! Bindings and helpers for the standard ERC20 read interface.

use alloy::{
    eips::BlockId,
    primitives::{Address, U256},
    sol,
    sol_types::SolCall,
};
use tracing::debug;

use crate::{
    constants::DEFAULT_TOKEN_DECIMALS,
    error::Error,
    ether::{address::to_checksum, provider::MultiTransportProvider, rpc::call},
};

sol! {
    /// The subset of the ERC20 interface used to read balances and display metadata.
    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256);
        function decimals() external view returns (uint8);
        function symbol() external view returns (string);
    }
}

/// Display metadata of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    /// The token symbol, or the checksummed token address when `symbol()` is unavailable.
    pub symbol: String,
    /// The token decimals, or 18 when `decimals()` is unavailable.
    pub decimals: u8,
}

impl TokenMetadata {
    /// The metadata used when the token exposes neither `symbol()` nor `decimals()`.
    pub fn fallback(token: &Address) -> Self {
        Self { symbol: to_checksum(token), decimals: DEFAULT_TOKEN_DECIMALS }
    }
}

/// Call `balanceOf(holder)` on `token`.
pub async fn balance_of(
    provider: &MultiTransportProvider,
    token: Address,
    holder: Address,
    block: BlockId,
) -> Result<U256, Error> {
    let calldata = IERC20::balanceOfCall { owner: holder }.abi_encode();
    let output = call(provider, token, calldata.into(), block).await?;

    IERC20::balanceOfCall::abi_decode_returns(&output)
        .map_err(|e| Error::ParseError(format!("invalid balanceOf() return data: {e}")))
}

/// Fetch the token's symbol and decimals.
///
/// Metadata is only used for display, so any failure falls back to [`TokenMetadata::fallback`]
/// field by field instead of being propagated.
pub async fn token_metadata(
    provider: &MultiTransportProvider,
    token: Address,
    block: BlockId,
) -> TokenMetadata {
    let mut metadata = TokenMetadata::fallback(&token);

    match call(provider, token, IERC20::decimalsCall {}.abi_encode().into(), block)
        .await
        .and_then(|output| {
            IERC20::decimalsCall::abi_decode_returns(&output)
                .map_err(|e| Error::ParseError(e.to_string()))
        }) {
        Ok(decimals) => metadata.decimals = decimals,
        Err(e) => debug!("failed to fetch decimals for {}: {}", token, e),
    }

    match call(provider, token, IERC20::symbolCall {}.abi_encode().into(), block)
        .await
        .and_then(|output| {
            IERC20::symbolCall::abi_decode_returns(&output)
                .map_err(|e| Error::ParseError(e.to_string()))
        }) {
        Ok(symbol) if !symbol.trim().is_empty() => metadata.symbol = symbol,
        Ok(_) => debug!("token {} has an empty symbol", token),
        Err(e) => debug!("failed to fetch symbol for {}: {}", token, e),
    }

    metadata
}
