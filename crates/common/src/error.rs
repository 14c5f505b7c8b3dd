/// Errors produced by the common utilities
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A generic error with a message
    #[error("Error: {0}")]
    Generic(String),

    /// The node could not be reached, or answered with an error
    #[error("RPC error: {0}")]
    RpcError(String),

    /// The node executed a call and it reverted
    #[error("Execution reverted: {0}")]
    Reverted(String),

    /// Input that could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}
