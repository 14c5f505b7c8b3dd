/// The node endpoint used when neither the command line nor the configuration names one.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The highest slot index probed by default, inclusive.
pub const DEFAULT_SLOT_LIMIT: u64 = 100;

/// The number of storage probes kept in flight by default.
pub const DEFAULT_CONCURRENCY: usize = 1;

/// The decimal count assumed when a token does not expose `decimals()`.
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;
