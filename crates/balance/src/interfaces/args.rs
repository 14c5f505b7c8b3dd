use clap::Parser;
use derive_builder::Builder;
use slot20_config::parse_url_arg;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Find the storage slot that holds the balances of an ERC20 token",
    after_help = "For more information, read the README.md",
    override_usage = "slot20 balanceOf <TOKEN> <HOLDER> [OPTIONS]"
)]
/// Arguments for the balanceOf subcommand
pub struct BalanceOfArgs {
    /// The address of the ERC20 token.
    #[clap(required = true, value_name = "TOKEN")]
    pub token: String,

    /// An address holding a non-zero amount of the token.
    #[clap(required = true, value_name = "HOLDER")]
    pub holder: String,

    /// The RPC provider to use for fetching balances and storage.
    /// This can be an explicit URL or a reference to a MESC endpoint.
    #[clap(
        long = "rpc",
        value_name = "URL",
        value_parser = parse_url_arg,
        default_value = "",
        hide_default_value = true
    )]
    pub rpc_url: String,

    /// The highest storage slot to check, inclusive. Defaults to the configured limit.
    #[clap(long, short)]
    pub limit: Option<u64>,

    /// The number of storage reads to keep in flight at once.
    #[clap(long, short, value_parser = parse_concurrency)]
    pub concurrency: Option<usize>,

    /// The block number to read state at. Defaults to the latest block.
    #[clap(long, short)]
    pub block: Option<u64>,

    /// Give up after this many seconds. 0 disables the timeout.
    #[clap(long, default_value = "0", hide_default_value = true)]
    pub timeout: u64,

    /// Print the result as JSON instead of a bare slot number.
    #[clap(long)]
    pub json: bool,
}

impl BalanceOfArgsBuilder {
    /// Create a new instance of the [`BalanceOfArgsBuilder`] struct with default values
    pub fn new() -> Self {
        Self {
            token: Some(String::new()),
            holder: Some(String::new()),
            rpc_url: Some(String::new()),
            limit: Some(None),
            concurrency: Some(None),
            block: Some(None),
            timeout: Some(0),
            json: Some(false),
        }
    }
}

fn parse_concurrency(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("concurrency must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid concurrency '{value}': {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_concurrency() {
        assert_eq!(parse_concurrency("8"), Ok(8));
        assert!(parse_concurrency("0").is_err());
        assert!(parse_concurrency("-1").is_err());
        assert!(parse_concurrency("many").is_err());
    }

    #[test]
    fn test_parse_positional_args() {
        let args = BalanceOfArgs::try_parse_from([
            "balanceOf",
            "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
            "0xF977814e90dA44bFA03b6295A0616a897441aceC",
            "--rpc",
            "http://localhost:8545",
            "-l",
            "50",
            "-c",
            "4",
        ])
        .expect("failed to parse args");

        assert_eq!(args.token, "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
        assert_eq!(args.holder, "0xF977814e90dA44bFA03b6295A0616a897441aceC");
        assert_eq!(args.rpc_url, "http://localhost:8545");
        assert_eq!(args.limit, Some(50));
        assert_eq!(args.concurrency, Some(4));
        assert_eq!(args.block, None);
        assert_eq!(args.timeout, 0);
        assert!(!args.json);
    }

    #[test]
    fn test_missing_holder_is_rejected() {
        assert!(BalanceOfArgs::try_parse_from([
            "balanceOf",
            "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"
        ])
        .is_err());
    }

    #[test]
    fn test_builder_defaults() {
        let args = BalanceOfArgsBuilder::new()
            .token("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2".to_string())
            .holder("0xF977814e90dA44bFA03b6295A0616a897441aceC".to_string())
            .build()
            .expect("failed to build args");

        assert_eq!(args.limit, None);
        assert_eq!(args.concurrency, None);
        assert_eq!(args.timeout, 0);
        assert!(args.rpc_url.is_empty());
    }
}
