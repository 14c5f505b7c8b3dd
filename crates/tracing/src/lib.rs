//! Assembles the `tracing` subscriber used by the slot20 binary.
//!
//! Logs are written to stderr so that stdout only ever carries the command's result. Optional
//! journald and file layers can be stacked on top, each with its own filter.
// Mostly taken from [reth](https://github.com/paradigmxyz/reth)

pub use tracing_subscriber;

mod formatter;
mod layers;

pub use formatter::LogFormat;
pub use layers::{FileInfo, FileWorkerGuard};

use layers::Layers;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::Directive, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration of a single output layer.
#[derive(Debug, Clone)]
pub struct LayerInfo {
    format: LogFormat,
    default_directive: String,
    filters: String,
    color: Option<String>,
}

impl LayerInfo {
    /// Creates a new [`LayerInfo`].
    ///
    /// `default_directive` applies to every target not matched by `filters`, a comma separated
    /// list of [`Directive`]s. `color` is one of `always`, `auto`, `never`, or `None` to disable
    /// ANSI escapes entirely.
    pub const fn new(
        format: LogFormat,
        default_directive: String,
        filters: String,
        color: Option<String>,
    ) -> Self {
        Self { format, default_directive, filters, color }
    }
}

impl Default for LayerInfo {
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            default_directive: LevelFilter::WARN.to_string(),
            filters: String::new(),
            color: Some("always".to_string()),
        }
    }
}

/// Something that can install itself as the global `tracing` subscriber.
pub trait Tracer {
    /// Installs the subscriber. The returned guard, if any, must be held for as long as file
    /// logs should keep being flushed.
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>>;
}

/// The tracer used by the slot20 binary.
#[derive(Debug, Clone, Default)]
pub struct Slot20Tracer {
    stderr: LayerInfo,
    journald: Option<String>,
    file: Option<(LayerInfo, FileInfo)>,
}

impl Slot20Tracer {
    /// Creates a tracer that only logs warnings and errors to stderr.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stderr layer configuration.
    pub fn with_stderr(mut self, config: LayerInfo) -> Self {
        self.stderr = config;
        self
    }

    /// Adds a journald layer with the given filter.
    pub fn with_journald(mut self, filter: String) -> Self {
        self.journald = Some(filter);
        self
    }

    /// Adds a file layer.
    pub fn with_file(mut self, config: LayerInfo, file_info: FileInfo) -> Self {
        self.file = Some((config, file_info));
        self
    }
}

impl Tracer for Slot20Tracer {
    fn init(self) -> eyre::Result<Option<FileWorkerGuard>> {
        let mut layers = Layers::new();

        layers.stderr(
            self.stderr.format,
            self.stderr.default_directive.parse::<Directive>()?,
            &self.stderr.filters,
            self.stderr.color,
        )?;

        if let Some(filter) = self.journald {
            layers.journald(&filter)?;
        }

        let file_guard = match self.file {
            Some((config, file_info)) => {
                Some(layers.file(config.format, &config.filters, file_info)?)
            }
            None => None,
        };

        tracing_subscriber::registry().with(layers.into_inner()).try_init()?;
        Ok(file_guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layer_info() {
        let info = LayerInfo::default();
        assert_eq!(info.format, LogFormat::Terminal);
        assert_eq!(info.default_directive, "warn");
        assert!(info.filters.is_empty());
    }

    #[test]
    fn test_default_tracer_has_no_extra_layers() {
        let tracer = Slot20Tracer::new();
        assert!(tracer.journald.is_none());
        assert!(tracer.file.is_none());
    }

    #[test]
    fn test_builder_adds_layers() {
        let tracer = Slot20Tracer::new()
            .with_journald("error".to_string())
            .with_file(LayerInfo::default(), FileInfo::new("/tmp/slot20-logs".into()));
        assert_eq!(tracer.journald.as_deref(), Some("error"));
        assert!(tracer.file.is_some());
    }
}
