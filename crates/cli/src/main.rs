pub(crate) mod args;
pub(crate) mod error;
pub(crate) mod log_args;
pub(crate) mod output;

use args::{Arguments, Subcommands};
use clap::Parser;
use error::Error;
use output::{print_result, select_reporter};
use tracing::debug;

use slot20_config::{config, Configuration};
use slot20_core::slot20_balance::balance_of;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Arguments::parse();

    // setup logging. the guard flushes file logs on drop, so it must live until we return
    let _guard = args
        .logs
        .init_tracing()
        .map_err(|e| Error::Generic(format!("failed to initialize logging: {}", e)))?;

    let configuration = Configuration::load()
        .map_err(|e| Error::Generic(format!("failed to load configuration: {}", e)))?;
    match args.sub {
        Subcommands::BalanceOf(mut cmd) => {
            // if the user has not specified a rpc url, use the default
            if cmd.rpc_url.as_str() == "" {
                cmd.rpc_url = configuration.rpc_url;
            }

            // fall back to the configured search bounds
            cmd.limit.get_or_insert(configuration.limit);
            cmd.concurrency.get_or_insert(configuration.concurrency);
            debug!(
                "searching up to slot {:?} with concurrency {:?}",
                cmd.limit, cmd.concurrency
            );

            let json = cmd.json;
            let reporter = select_reporter(&args.logs);
            let result = balance_of(cmd, reporter.as_ref())
                .await
                .map_err(|e| Error::Generic(format!("failed to find balance slot: {}", e)))?;

            print_result(&result, json)?;
        }

        Subcommands::Config(cmd) => {
            config(cmd).map_err(|e| Error::Generic(format!("failed to configure: {}", e)))?;
        }
    }

    Ok(())
}
