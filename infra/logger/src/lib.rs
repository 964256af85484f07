//! # Logger
//!
//! Logging setup for command-line tools built on `tracing`.
//!
//! * Console output goes to **stderr**, so stdout stays free for the tool's own
//!   report.
//! * An optional log file (plain text or JSON) is written through a
//!   non-blocking worker; keep the returned [`Logger`] alive until exit so the
//!   worker can flush.
//! * [`Verbosity`] turns `-v`/`-q` style flags into a level. `RUST_LOG` still
//!   wins over the programmatic default.
//!
//! ## Example
//!
//! ```rust
//! # use plugkit_logger::{Logger, Verbosity};
//!
//! let _logger = Logger::builder("my-tool")
//!     .level(Verbosity::new(1, false).level())
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::LoggerError;
pub use tracing::level_filters::LevelFilter;

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Console verbosity requested on the command line.
///
/// `quiet` wins over any number of `verbose` flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verbosity {
    verbose: u8,
    quiet: bool,
}

impl Verbosity {
    #[must_use]
    pub const fn new(verbose: u8, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    #[must_use]
    pub const fn level(self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug)]
struct FileOutput {
    path: PathBuf,
    json: bool,
}

/// Configures and installs the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    level: LevelFilter,
    env_filter: Option<String>,
    console: bool,
    file: Option<FileOutput>,
}

impl LoggerBuilder {
    /// Minimum level emitted when neither `RUST_LOG` nor an env filter says otherwise.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Adds an explicit filter (e.g. `plugkit_scaffold=debug`).
    ///
    /// Invalid filters make [`LoggerBuilder::init`] fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Also writes every event to the file at `path`, appending if it exists.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(FileOutput { path: path.into(), json: false });
        self
    }

    /// Switches the log file to one JSON object per line. No effect without [`Self::file`].
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn json(mut self) -> Self {
        if let Some(file) = &mut self.file {
            file.json = true;
        }
        self
    }

    /// Consumes the builder and installs the global subscriber.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for an empty name, an
    /// invalid filter or when no output is enabled, [`LoggerError::Appender`]
    /// if the log file cannot be opened and [`LoggerError::Subscriber`] if a
    /// global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }
        if !self.console && self.file.is_none() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging output enabled. Enable the console or a log file.".into(),
                context: Some(self.name.into()),
            });
        }

        let env_filter = build_env_filter(self.level, self.env_filter.as_deref())?;
        let mut layers = Vec::new();

        if self.console {
            let ansi = std::io::stderr().is_terminal();
            layers.push(layer().compact().with_writer(std::io::stderr).with_ansi(ansi).boxed());
        }

        let guard = if let Some(file) = self.file {
            let (dir, file_name) = split_log_path(&file.path)?;
            fs::create_dir_all(&dir).map_err(|e| LoggerError::Internal {
                message: e.to_string().into(),
                context: Some(format!("Failed to create path: {}", dir.display()).into()),
            })?;

            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(file_name)
                .build(&dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);

            let file_layer = layer().with_writer(non_blocking).with_ansi(false);
            layers.push(if file.json { file_layer.json().boxed() } else { file_layer.boxed() });
            Some(guard)
        } else {
            None
        };

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;
        tracing::debug!(name = %self.name, "Logger initialized");

        Ok(Logger { guard })
    }
}

/// Handle to the installed logging system.
///
/// Holds the file worker guard, if any. Dropping it flushes and stops the
/// background writer.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a builder. `name` identifies the tool in diagnostics.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            level: LevelFilter::WARN,
            env_filter: None,
            console: true,
            file: None,
        }
    }

    /// Whether a log file is being written.
    #[must_use]
    pub const fn has_file(&self) -> bool {
        self.guard.is_some()
    }
}

fn build_env_filter(level: LevelFilter, filter: Option<&str>) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(level.into());
    filter.map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: None,
            })
        },
    )
}

fn split_log_path(path: &Path) -> Result<(PathBuf, String), LoggerError> {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return Err(LoggerError::InvalidConfiguration {
            message: "Log file path must end in a file name".into(),
            context: Some(path.display().to_string().into()),
        });
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name.to_owned()))
}
