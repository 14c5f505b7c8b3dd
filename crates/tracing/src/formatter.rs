use crate::layers::BoxedLayer;
use clap::ValueEnum;
use std::fmt::{self, Display};
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Represents the logging format.
#[derive(Debug, Copy, Clone, ValueEnum, Eq, PartialEq)]
pub enum LogFormat {
    /// Newline delimited JSON objects, one per event.
    Json,

    /// `key=value` pairs, as understood by most log shippers.
    LogFmt,

    /// Human readable output with optional colors.
    Terminal,
}

impl LogFormat {
    /// Builds a boxed layer in this format, writing to `file_writer` if given and to stderr
    /// otherwise.
    pub(crate) fn apply(
        &self,
        filter: EnvFilter,
        color: Option<String>,
        file_writer: Option<NonBlocking>,
    ) -> BoxedLayer<Registry> {
        let ansi = match color {
            Some(color) => std::env::var("RUST_LOG_STYLE")
                .map(|val| val != "never")
                .unwrap_or(color != "never"),
            None => false,
        };
        let target = std::env::var("RUST_LOG_TARGET").map(|val| val != "0").unwrap_or(false);

        match self {
            Self::Json => {
                let layer =
                    tracing_subscriber::fmt::layer().json().with_ansi(ansi).with_target(target);
                match file_writer {
                    Some(writer) => layer.with_writer(writer).with_filter(filter).boxed(),
                    None => layer.with_writer(std::io::stderr).with_filter(filter).boxed(),
                }
            }
            Self::LogFmt => {
                let layer = tracing_logfmt::builder().layer();
                match file_writer {
                    Some(writer) => layer.with_writer(writer).with_filter(filter).boxed(),
                    None => layer.with_writer(std::io::stderr).with_filter(filter).boxed(),
                }
            }
            Self::Terminal => {
                let layer = tracing_subscriber::fmt::layer().with_ansi(ansi).with_target(target);
                match file_writer {
                    Some(writer) => layer.with_writer(writer).with_filter(filter).boxed(),
                    None => layer.with_writer(std::io::stderr).with_filter(filter).boxed(),
                }
            }
        }
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::LogFmt => write!(f, "log-fmt"),
            Self::Terminal => write!(f, "terminal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_value_names() {
        for format in LogFormat::value_variants() {
            let value = format.to_possible_value().expect("no skipped variants");
            assert_eq!(value.get_name(), format.to_string());
        }
    }
}
