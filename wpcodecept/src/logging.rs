//! Console logging for the wpcodecept tool.
//!
//! Diagnostics go to stderr with a colored level header. The configuration
//! error report is the primary output of a failed command and goes to stdout.

use std::env;
use std::fmt;
use std::path::Path;

use crate::error::ConfigErrors;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const YELLOW: &str = "\x1b[33m";
const NC: &str = "\x1b[0m";

/// Logging level for controlling output verbosity.
///
/// # Examples
///
/// ```
/// use wpcodecept::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Suppress all non-essential output.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Errors, warnings, info and debug messages.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use wpcodecept::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("loud").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }
}

/// Console logger with level filtering and optional ANSI colors.
///
/// # Examples
///
/// ```
/// use wpcodecept::{Logger, LogLevel};
///
/// let logger = Logger::new(LogLevel::Normal).with_color(false);
/// logger.warn("no \"namespace\" field provided");
/// logger.info("not printed at Normal level");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LogLevel,
    color: bool,
}

impl Logger {
    /// Creates a new logger with the specified level and colors enabled.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level, color: true }
    }

    /// Enables or disables ANSI colors.
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Returns whether colors are enabled.
    #[must_use]
    pub const fn color(&self) -> bool {
        self.color
    }

    /// Logs a fatal error. Suppressed only at Quiet.
    pub fn error(&self, message: &str) {
        if self.level >= LogLevel::Normal {
            eprintln!("{}", self.line(RED, "[FATAL]", message));
        }
    }

    /// Logs a warning. Displayed at Normal and Verbose.
    pub fn warn(&self, message: &str) {
        if self.level >= LogLevel::Normal {
            eprintln!("{}", self.line(YELLOW, "[WARNING]", message));
        }
    }

    /// Logs an informational message. Displayed only at Verbose.
    pub fn info(&self, message: &str) {
        if self.level >= LogLevel::Verbose {
            eprintln!("{}", self.line(CYAN, "[INFO]", message));
        }
    }

    /// Logs a debug message. Displayed only at Verbose.
    pub fn debug(&self, message: &str) {
        if self.level >= LogLevel::Verbose {
            eprintln!("[DEBUG] {message}");
        }
    }

    /// Prints a success message to stdout unless Quiet.
    pub fn success(&self, message: &str) {
        if self.level >= LogLevel::Normal {
            println!("{}", paint(self.color, GREEN, message));
        }
    }

    /// Prints the configuration error report to stdout.
    ///
    /// The report is always printed, even at Quiet: it is the reason the
    /// command is about to exit non-zero.
    pub fn config_error(&self, path: &Path, errors: &ConfigErrors) {
        print!("{}", render_config_errors(path, errors, self.color));
    }

    fn line(&self, color: &str, header: &str, message: &str) -> String {
        format!("{} {message}", paint(self.color, color, header))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

fn paint(enabled: bool, color: &str, text: &str) -> String {
    if enabled {
        format!("{color}{text}{NC}")
    } else {
        text.to_string()
    }
}

/// Renders a configuration error report.
///
/// The first line names the offending file; every `(field, message)` pair
/// follows on its own line in insertion order.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use wpcodecept::{render_config_errors, ConfigErrors};
///
/// let mut errors = ConfigErrors::new();
/// errors.add("projectType", "projectType is required");
///
/// let report = render_config_errors(Path::new("codecept-docker.json"), &errors, false);
/// assert_eq!(
///     report,
///     "[FATAL] codecept-docker.json is invalid (1 error)\n\
///      [key: \"projectType\"]: projectType is required\n"
/// );
/// ```
#[must_use]
pub fn render_config_errors(path: &Path, errors: &ConfigErrors, color: bool) -> String {
    let count = errors.message_count();
    let noun = if count == 1 { "error" } else { "errors" };
    let mut report = format!(
        "{} {} is invalid ({count} {noun})\n",
        paint(color, RED, "[FATAL]"),
        path.display()
    );
    for (field, message) in errors.messages() {
        let key = paint(color, YELLOW, &format!("\"{field}\""));
        report.push_str(&format!("[key: {key}]: {message}\n"));
    }
    report
}

/// Initializes a logger from CLI flags and environment variables.
///
/// Priority:
/// 1. CLI flags (`verbose` wins over `quiet`)
/// 2. `WPCODECEPT_LOG_MODE`
/// 3. Normal
///
/// Colors are disabled by `no_color` or when `NO_COLOR` is set.
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) -> Logger {
    let color = !no_color && env::var_os("NO_COLOR").is_none();

    if verbose {
        return Logger::new(LogLevel::Verbose).with_color(color);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet).with_color(color);
    }

    if let Ok(env_value) = env::var("WPCODECEPT_LOG_MODE") {
        if let Ok(level) = LogLevel::parse(&env_value) {
            return Logger::new(level).with_color(color);
        }
    }

    Logger::new(LogLevel::Normal).with_color(color)
}
