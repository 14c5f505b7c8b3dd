use clap::{Parser, Subcommand};

use slot20_config::ConfigArgs;
use slot20_core::slot20_balance::BalanceOfArgs;

use crate::log_args::LogArgs;

#[derive(Debug, Parser)]
#[clap(name = "slot20", version)]
pub(crate) struct Arguments {
    #[clap(subcommand)]
    pub sub: Subcommands,

    #[clap(flatten)]
    pub logs: LogArgs,
}

#[derive(Debug, Subcommand)]
#[clap(
    about = "slot20 finds the storage slot that holds the balances of an ERC20 token.",
    after_help = "For more information, read the README.md"
)]
#[allow(clippy::large_enum_variant)]
pub(crate) enum Subcommands {
    #[clap(
        name = "balanceOf",
        alias = "balance-of",
        about = "Find the slot that is responsible for the balance state of an ERC20 token"
    )]
    BalanceOf(BalanceOfArgs),

    #[clap(name = "config", about = "Display and edit the current configuration")]
    Config(ConfigArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    const TOKEN: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";
    const HOLDER: &str = "0xF977814e90dA44bFA03b6295A0616a897441aceC";

    #[test]
    fn test_balance_of_subcommand() {
        let args = Arguments::try_parse_from(["slot20", "balanceOf", TOKEN, HOLDER, "--json"])
            .expect("failed to parse args");

        match args.sub {
            Subcommands::BalanceOf(cmd) => {
                assert_eq!(cmd.token, TOKEN);
                assert_eq!(cmd.holder, HOLDER);
                assert!(cmd.json);
                assert!(cmd.rpc_url.is_empty());
                assert_eq!(cmd.limit, None);
            }
            _ => panic!("expected the balanceOf subcommand"),
        }
        assert_eq!(args.logs.verbosity.level(), Some(Level::WARN));
    }

    #[test]
    fn test_balance_of_alias() {
        let args = Arguments::try_parse_from(["slot20", "balance-of", TOKEN, HOLDER])
            .expect("failed to parse args");
        assert!(matches!(args.sub, Subcommands::BalanceOf(_)));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Arguments::try_parse_from([
            "slot20",
            "balanceOf",
            TOKEN,
            HOLDER,
            "-vv",
            "--log.stderr.format",
            "json",
        ])
        .expect("failed to parse args");

        assert_eq!(args.logs.verbosity.level(), Some(Level::DEBUG));
        assert_eq!(args.logs.log_stderr_format.to_string(), "json");
    }

    #[test]
    fn test_invalid_limit_is_rejected() {
        assert!(Arguments::try_parse_from([
            "slot20",
            "balanceOf",
            TOKEN,
            HOLDER,
            "--limit",
            "lots"
        ])
        .is_err());
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        assert!(Arguments::try_parse_from(["slot20", "balanceOf", TOKEN, HOLDER, "-c", "0"])
            .is_err());
    }

    #[test]
    fn test_config_subcommand() {
        let args = Arguments::try_parse_from(["slot20", "config", "limit", "200"])
            .expect("failed to parse args");

        match args.sub {
            Subcommands::Config(cmd) => {
                assert_eq!(cmd.key, "limit");
                assert_eq!(cmd.value, "200");
            }
            _ => panic!("expected the config subcommand"),
        }
    }
}
