//! # Logger
//!
//! Logging for the `nf-content` binary.
//!
//! Console lines go to stderr so command output on stdout stays machine-readable.
//! With a directory set, events are also written to a daily-rotated file
//! (`<name>.<date>.log`), as JSON lines when requested.
//!
//! Filtering: explicit directives (`logging.filter`) win, otherwise `RUST_LOG`,
//! otherwise the configured level.
//!
//! ```rust,no_run
//! use nf_logger::{LevelFilter, Logger};
//!
//! let _log = Logger::builder("nf-content").level(LevelFilter::DEBUG).init()?;
//! tracing::info!("ready");
//! # Ok::<(), nf_logger::LoggerError>(())
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Days of log files kept in the directory.
const KEPT_FILES: usize = 7;

/// Collects logging settings; [`LoggerBuilder::init`] installs the global subscriber.
#[derive(Debug, Clone)]
#[must_use = "call `init` to install the logger"]
pub struct LoggerBuilder {
    name: String,
    level: LevelFilter,
    filter: Option<String>,
    directory: Option<PathBuf>,
    json: bool,
}

impl LoggerBuilder {
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Shows at least `DEBUG` events when set; a `TRACE` level is kept.
    pub fn verbose(mut self, enabled: bool) -> Self {
        if enabled {
            self.level = self.level.max(LevelFilter::DEBUG);
        }
        self
    }

    /// Directives such as `nf_content=trace,reqwest=warn`.
    pub fn filter(mut self, directives: impl Into<String>) -> Self {
        self.filter = Some(directives.into());
        self
    }

    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// JSON lines in the log file. The console stays human-readable.
    pub const fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Installs the subscriber for the rest of the process.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for a malformed filter.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] when the log file cannot be set up.
    /// * [`LoggerError::Subscriber`] when logging is already initialized.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let filter = self.env_filter()?;
        let console = layer().compact().with_writer(std::io::stderr).boxed();

        let (file, guard) = match &self.directory {
            Some(dir) => {
                fs::create_dir_all(dir).context(dir.display().to_string())?;
                let appender = RollingFileAppender::builder()
                    .rotation(Rotation::DAILY)
                    .filename_prefix(&self.name)
                    .filename_suffix("log")
                    .max_log_files(KEPT_FILES)
                    .build(dir)?;
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file = layer().with_writer(writer).with_ansi(false);
                let file = if self.json { file.json().boxed() } else { file.boxed() };
                (Some(file), Some(guard))
            },
            None => (None, None),
        };

        tracing_subscriber::registry().with(filter).with(console).with(file).try_init()?;

        Ok(Logger { _guard: guard })
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.filter {
            Some(directives) => builder.parse(directives).map_err(|e| {
                LoggerError::InvalidConfiguration {
                    message: format!("'{directives}': {e}").into(),
                    context: Some("logging.filter".into()),
                }
            }),
            None => Ok(builder.from_env_lossy()),
        }
    }
}

/// Keeps the file writer alive; buffered lines are flushed when it is dropped.
#[derive(Debug)]
#[must_use = "dropping the logger stops file logging"]
pub struct Logger {
    _guard: Option<WorkerGuard>,
}

impl Logger {
    /// `name` prefixes the log files.
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            level: LevelFilter::INFO,
            filter: None,
            directory: None,
            json: false,
        }
    }
}

/// Parses a level name from a config file (`"info"`, `"DEBUG"`, `"off"`, ...).
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for unknown names.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    level.trim().parse::<LevelFilter>().map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("'{level}': {e}").into(),
        context: Some("logging.level".into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_from_config() {
        assert_eq!(parse_level("info").ok(), Some(LevelFilter::INFO));
        assert_eq!(parse_level(" WARN ").ok(), Some(LevelFilter::WARN));
        assert_eq!(parse_level("off").ok(), Some(LevelFilter::OFF));

        let err = parse_level("chatty").expect_err("unknown level");
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn verbose_lowers_to_debug_but_keeps_trace() {
        let builder = Logger::builder("nf-content").level(LevelFilter::WARN).verbose(true);
        assert_eq!(builder.level, LevelFilter::DEBUG);

        let builder = Logger::builder("nf-content").level(LevelFilter::TRACE).verbose(true);
        assert_eq!(builder.level, LevelFilter::TRACE);

        let builder = Logger::builder("nf-content").level(LevelFilter::WARN).verbose(false);
        assert_eq!(builder.level, LevelFilter::WARN);
    }

    #[test]
    fn malformed_filter_is_rejected_before_install() {
        let err = Logger::builder("nf-content")
            .filter("nf_content=loudest")
            .init()
            .expect_err("bad directive");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn filter_directives_parse() {
        let builder = Logger::builder("nf-content").filter("nf_content=trace,reqwest=warn");
        assert!(builder.env_filter().is_ok());
    }
}
