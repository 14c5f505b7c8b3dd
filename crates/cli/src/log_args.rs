//! clap [Args](clap::Args) for logging configuration.
// Mostly taken from [reth](https://github.com/paradigmxyz/reth)

use clap::{ArgAction, Args, ValueEnum};
use slot20_tracing::{
    tracing_subscriber::filter::Directive, FileInfo, FileWorkerGuard, LayerInfo, LogFormat,
    Slot20Tracer, Tracer,
};
use std::{
    fmt::{self, Display},
    path::PathBuf,
    str::FromStr,
};
use tracing::{level_filters::LevelFilter, Level};

/// The log configuration.
#[derive(Debug, Args)]
#[clap(next_help_heading = "LOGGING")]
pub(crate) struct LogArgs {
    /// The format to use for logs written to stderr.
    #[clap(long = "log.stderr.format", value_name = "FORMAT", global = true, default_value_t = LogFormat::Terminal)]
    pub log_stderr_format: LogFormat,

    /// The filter to use for logs written to stderr.
    #[clap(long = "log.stderr.filter", value_name = "FILTER", global = true, default_value = "")]
    pub log_stderr_filter: String,

    /// Write logs to journald.
    #[clap(long = "log.journald", global = true)]
    pub journald: bool,

    /// The filter to use for logs written to journald.
    #[clap(
        long = "log.journald.filter",
        value_name = "FILTER",
        global = true,
        default_value = "error"
    )]
    pub journald_filter: String,

    /// Also write logs to `slot20.log` inside this directory.
    #[clap(long = "log.file.directory", value_name = "PATH", global = true)]
    pub log_file_directory: Option<PathBuf>,

    /// The format to use for logs written to the log file.
    #[clap(long = "log.file.format", value_name = "FORMAT", global = true, default_value_t = LogFormat::Terminal)]
    pub log_file_format: LogFormat,

    /// The filter to use for logs written to the log file.
    #[clap(long = "log.file.filter", value_name = "FILTER", global = true, default_value = "debug")]
    pub log_file_filter: String,

    /// Sets whether or not the formatter emits ANSI terminal escape codes for colors and other
    /// text formatting.
    #[clap(
        long,
        value_name = "COLOR",
        global = true,
        default_value_t = ColorMode::Always
    )]
    pub color: ColorMode,

    /// The verbosity settings for the tracer.
    #[clap(flatten)]
    pub verbosity: Verbosity,
}

impl LogArgs {
    /// Creates a [LayerInfo] instance.
    fn layer(&self, format: LogFormat, filter: String, use_color: bool) -> LayerInfo {
        LayerInfo::new(
            format,
            self.verbosity.directive().to_string(),
            filter,
            if use_color { Some(self.color.to_string()) } else { None },
        )
    }

    /// Initializes tracing with the configured options from cli args.
    pub(crate) fn init_tracing(&self) -> eyre::Result<Option<FileWorkerGuard>> {
        let mut tracer = Slot20Tracer::new();

        let stderr = self.layer(self.log_stderr_format, self.log_stderr_filter.clone(), true);
        tracer = tracer.with_stderr(stderr);

        if self.journald {
            tracer = tracer.with_journald(self.journald_filter.clone());
        }

        if let Some(directory) = &self.log_file_directory {
            let file = self.layer(self.log_file_format, self.log_file_filter.clone(), false);
            tracer = tracer.with_file(file, FileInfo::new(directory.clone()));
        }

        let guard = tracer.init()?;
        Ok(guard)
    }
}

/// The color mode for the cli.
#[derive(Debug, Copy, Clone, ValueEnum, Eq, PartialEq)]
pub(crate) enum ColorMode {
    /// Colors on
    Always,
    /// Colors on
    Auto,
    /// Colors off
    Never,
}

impl Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Always => write!(f, "always"),
            ColorMode::Auto => write!(f, "auto"),
            ColorMode::Never => write!(f, "never"),
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(ColorMode::Always),
            "auto" => Ok(ColorMode::Auto),
            "never" => Ok(ColorMode::Never),
            _ => Err(format!("Invalid color mode: {}", s)),
        }
    }
}

/// The verbosity settings for the cli.
#[derive(Debug, Copy, Clone, Args)]
#[clap(next_help_heading = "DISPLAY")]
pub(crate) struct Verbosity {
    /// Set the minimum log level. Warnings and errors are always shown.
    ///
    /// -v     Info, and narrate the search as it runs
    /// -vv    Debug
    /// -vvv   Traces (warning: very verbose!)
    #[clap(short, long = "verbose", action = ArgAction::Count, global = true, verbatim_doc_comment, help_heading = "DISPLAY")]
    verbosity: u8,

    /// Silence all log output.
    #[clap(long, alias = "silent", short = 'q', global = true, help_heading = "DISPLAY")]
    quiet: bool,
}

impl Verbosity {
    /// The most verbose level that will be logged, or `None` when silenced.
    pub(crate) fn level(&self) -> Option<Level> {
        if self.quiet {
            return None;
        }

        Some(match self.verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        })
    }

    /// Get the corresponding [Directive] for the given verbosity, or none if the verbosity
    /// corresponds to silent.
    pub(crate) fn directive(&self) -> Directive {
        match self.level() {
            Some(level) => level.into(),
            None => LevelFilter::OFF.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verbosity(verbosity: u8, quiet: bool) -> Verbosity {
        Verbosity { verbosity, quiet }
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(verbosity(0, false).level(), Some(Level::WARN));
        assert_eq!(verbosity(1, false).level(), Some(Level::INFO));
        assert_eq!(verbosity(2, false).level(), Some(Level::DEBUG));
        assert_eq!(verbosity(3, false).level(), Some(Level::TRACE));
        assert_eq!(verbosity(9, false).level(), Some(Level::TRACE));
    }

    #[test]
    fn test_quiet_overrides_verbosity() {
        assert_eq!(verbosity(3, true).level(), None);
        assert_eq!(verbosity(3, true).directive().to_string(), "off");
    }

    #[test]
    fn test_directive() {
        assert_eq!(verbosity(0, false).directive().to_string(), "warn");
        assert_eq!(verbosity(2, false).directive().to_string(), "debug");
    }

    #[test]
    fn test_color_mode_round_trip() {
        for mode in [ColorMode::Always, ColorMode::Auto, ColorMode::Never] {
            assert_eq!(<ColorMode as FromStr>::from_str(&mode.to_string()), Ok(mode));
        }
        assert!(<ColorMode as FromStr>::from_str("rainbow").is_err());
    }
}
