use std::path::PathBuf;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{filter::Directive, EnvFilter, Layer, Registry};

use crate::formatter::LogFormat;

/// A worker guard returned by the file layer.
///
/// When this guard is dropped, buffered logs are flushed to the file.
pub type FileWorkerGuard = WorkerGuard;

/// A boxed tracing [Layer].
pub(crate) type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// The layers that make up the global subscriber.
pub(crate) struct Layers {
    inner: Vec<BoxedLayer<Registry>>,
}

impl Layers {
    pub(crate) fn new() -> Self {
        Self { inner: vec![] }
    }

    pub(crate) fn into_inner(self) -> Vec<BoxedLayer<Registry>> {
        self.inner
    }

    pub(crate) fn journald(&mut self, filter: &str) -> eyre::Result<()> {
        let journald_filter = build_env_filter(None, filter)?;
        let layer = tracing_journald::layer()?.with_filter(journald_filter).boxed();
        self.inner.push(layer);
        Ok(())
    }

    pub(crate) fn stderr(
        &mut self,
        format: LogFormat,
        default_directive: Directive,
        filters: &str,
        color: Option<String>,
    ) -> eyre::Result<()> {
        let filter = build_env_filter(Some(default_directive), filters)?;
        let layer = format.apply(filter, color, None);
        self.inner.push(layer);
        Ok(())
    }

    pub(crate) fn file(
        &mut self,
        format: LogFormat,
        filter: &str,
        file_info: FileInfo,
    ) -> eyre::Result<FileWorkerGuard> {
        let (writer, guard) = file_info.create_log_writer()?;
        let file_filter = build_env_filter(None, filter)?;
        let layer = format.apply(file_filter, None, Some(writer));
        self.inner.push(layer);
        Ok(guard)
    }
}

/// Where file logs are written.
#[derive(Debug, Clone)]
pub struct FileInfo {
    dir: PathBuf,
    file_name: String,
}

impl FileInfo {
    /// Log to `slot20.log` inside `dir`.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir, file_name: "slot20.log".to_string() }
    }

    fn create_log_writer(&self) -> eyre::Result<(NonBlocking, WorkerGuard)> {
        std::fs::create_dir_all(&self.dir)?;
        let appender = tracing_appender::rolling::never(&self.dir, &self.file_name);
        Ok(tracing_appender::non_blocking(appender))
    }
}

/// Builds an [EnvFilter] from `RUST_LOG`, an optional default directive, and a comma separated
/// list of extra directives.
fn build_env_filter(
    default_directive: Option<Directive>,
    directives: &str,
) -> eyre::Result<EnvFilter> {
    let env_filter = match default_directive {
        Some(default_directive) => {
            EnvFilter::builder().with_default_directive(default_directive).from_env_lossy()
        }
        None => EnvFilter::builder().from_env_lossy(),
    };

    directives
        .split(',')
        .filter(|directive| !directive.is_empty())
        .try_fold(env_filter, |env_filter, directive| {
            Ok(env_filter.add_directive(directive.parse()?))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_env_filter_with_directives() {
        let filter = build_env_filter(
            Some(tracing::Level::WARN.into()),
            "slot20_balance=trace,slot20_common=debug",
        );
        assert!(filter.is_ok());
    }

    #[test]
    fn test_build_env_filter_empty() {
        assert!(build_env_filter(None, "").is_ok());
    }

    #[test]
    fn test_every_format_builds_stderr_and_file_layers() {
        use clap::ValueEnum;

        let dir = std::env::temp_dir().join(format!("slot20-layers-{}", std::process::id()));
        let mut layers = Layers::new();
        let mut guards = vec![];

        for format in LogFormat::value_variants() {
            layers
                .stderr(*format, tracing::Level::INFO.into(), "slot20_balance=debug", None)
                .expect("failed to build stderr layer");
            guards.push(
                layers
                    .file(*format, "debug", FileInfo::new(dir.clone()))
                    .expect("failed to build file layer"),
            );
        }

        assert_eq!(layers.into_inner().len(), LogFormat::value_variants().len() * 2);
        assert!(dir.join("slot20.log").exists());

        drop(guards);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
