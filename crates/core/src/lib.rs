//! The Core module serves as the central integration point for all of slot20's functionality.
//!
//! This module re-exports the public interfaces of the tool-specific crates, making it easier to
//! use slot20's capabilities in other projects.

// Re-export all tool-specific modules
pub use slot20_balance;
