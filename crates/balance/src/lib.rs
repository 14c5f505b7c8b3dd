//! The balance module finds the storage slot that backs an ERC20 token's `balanceOf` mapping.
//!
//! It reads a holder's balance through the token's public interface, then derives the storage
//! key of that holder under every candidate mapping slot, for both the `(key, slot)` layout used
//! by Solidity and the `(slot, key)` layout used by Vyper, until a stored word equals the balance.

/// Error types for the balance module
pub mod error;

mod core;
mod interfaces;

// re-export the public interface
pub use core::{
    balance_of,
    convention::LayoutConvention,
    key::derive_key,
    locate_balance_slot,
    node::NodeClient,
    probe::{BalanceOracle, ProbeOutcome, StorageReader},
    search::{candidates, find_slot, SearchOptions, SlotIndex},
};
pub use error::Error;
pub use interfaces::{
    BalanceOfArgs, BalanceOfArgsBuilder, BalanceOfResult, LogReporter, MissReason, Reporter,
    SearchResult, SilentReporter, SpinnerReporter,
};
pub use slot20_common::ether::erc20::TokenMetadata;
