pub mod address;
pub mod erc20;
pub mod provider;
/// Node requests with retry.
pub mod rpc;
