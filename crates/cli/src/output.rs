use std::io::Write;

use slot20_core::slot20_balance::{
    BalanceOfResult, LogReporter, Reporter, SilentReporter, SpinnerReporter,
};
use slot20_tracing::LogFormat;
use tracing::Level;

use crate::{error::Error, log_args::LogArgs};

/// Pick how a run narrates its progress on stderr.
///
/// Narration starts at `-v`. Human readable logs get spinners, while structured log formats get
/// the progress as log events.
pub(crate) fn select_reporter(logs: &LogArgs) -> Box<dyn Reporter> {
    match logs.verbosity.level() {
        Some(level) if level >= Level::INFO => match logs.log_stderr_format {
            LogFormat::Terminal => Box::new(SpinnerReporter::new()),
            LogFormat::Json | LogFormat::LogFmt => Box::new(LogReporter::new()),
        },
        _ => Box::new(SilentReporter),
    }
}

/// Render the result the way it is printed to stdout.
pub(crate) fn render_result(result: &BalanceOfResult, json: bool) -> Result<String, Error> {
    if json {
        return result.to_json().map_err(|e| Error::Generic(e.to_string()));
    }

    Ok(result.output())
}

/// Print the result to stdout, which carries nothing else.
pub(crate) fn print_result(result: &BalanceOfResult, json: bool) -> Result<(), Error> {
    let rendered = render_result(result, json)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    stdout.flush()?;
    Ok(())
}
