//! Diagnostic log sink shared by the reader, filter and pipeline.
//!
//! Components never touch the process-wide logger directly. They receive a
//! [`LogSink`] wrapping whatever `log::Log` implementation the caller chose:
//! the binary installs an `env_logger` logger writing to stderr or a file,
//! tests inject a capturing logger.
use crate::config::LoggingConfig;
use crate::error::{Result as RowsiftResult, RowsiftError};
use env_logger::{Builder, Env, Target};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

const LOG_TARGET: &str = "rowsift";

/// Cheaply clonable handle to an injected logger
#[derive(Clone)]
pub struct LogSink {
    logger: Arc<dyn Log>,
}

impl LogSink {
    pub fn new(logger: impl Log + 'static) -> Self {
        Self {
            logger: Arc::new(logger),
        }
    }

    /// Forward to whatever logger is installed through `log::set_logger`.
    pub fn global() -> Self {
        Self::new(GlobalLogger)
    }

    /// Drop every record.
    pub fn discard() -> Self {
        Self::new(DiscardLogger)
    }

    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        let metadata = Metadata::builder().level(level).target(LOG_TARGET).build();
        if !self.logger.enabled(&metadata) {
            return;
        }
        self.logger.log(
            &Record::builder()
                .level(level)
                .target(LOG_TARGET)
                .args(args)
                .build(),
        );
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    pub fn flush(&self) {
        self.logger.flush();
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSink").finish_non_exhaustive()
    }
}

struct GlobalLogger;

impl Log for GlobalLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record) {
        log::logger().log(record);
    }

    fn flush(&self) {
        log::logger().flush();
    }
}

struct DiscardLogger;

impl Log for DiscardLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        false
    }

    fn log(&self, _: &Record) {}

    fn flush(&self) {}
}

/// Parse a configured level name. Empty means "not configured".
pub fn parse_level(level: &str) -> RowsiftResult<Option<LevelFilter>> {
    let level = level.trim();
    if level.is_empty() {
        return Ok(None);
    }
    LevelFilter::from_str(level)
        .map(Some)
        .map_err(|_| RowsiftError::Config(format!("unknown log level '{level}'")))
}

/// Build the process logger from configuration and wrap it in a sink.
///
/// Lines look like `2024-05-01 12:00:00 [INFO] message`. With no configured
/// level, `RUST_LOG` decides and falls back to `info`.
pub fn init_logging(config: &LoggingConfig) -> RowsiftResult<LogSink> {
    let mut builder = match parse_level(&config.level)? {
        Some(level) => {
            let mut builder = Builder::new();
            builder.filter_level(level);
            builder
        }
        None => Builder::from_env(Env::default().default_filter_or("info")),
    };

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.args()
        )
    });

    if config.file.is_empty() {
        builder.target(Target::Stderr);
    } else {
        let log_path = Path::new(&config.file);
        if let Some(parent_dir) = log_path.parent() {
            if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                fs::create_dir_all(parent_dir)?;
            }
        }
        let log_file = fs::File::create(log_path)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    }

    Ok(LogSink::new(builder.build()))
}
