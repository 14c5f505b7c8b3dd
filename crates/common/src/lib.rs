//! Common utilities, constants, and resources used across the slot20 codebase.
//!
//! This crate provides shared functionality for the slot20 toolkit, including
//! node access, ERC20 bindings, and general utility functions.

/// Constants used throughout the slot20 codebase.
pub mod constants;

/// Error types shared by the common utilities.
pub mod error;

/// Utilities for interacting with Ethereum, including addresses, ERC20 calls,
/// and RPC functionality.
pub mod ether;

/// General utility functions and types for common tasks.
pub mod utils;
