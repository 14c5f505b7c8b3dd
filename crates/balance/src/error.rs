/// Error type for the balance module
///
/// A search that runs to completion never produces an error, even when no slot matches. Errors
/// are reserved for bad input and for a node that cannot be talked to.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A token or holder argument that is not a valid address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The node could not be reached, or kept failing after retries
    #[error("Transport error: {0}")]
    Transport(String),

    /// The search did not finish within the requested time
    #[error("Search timed out after {0}s")]
    Timeout(u64),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}
