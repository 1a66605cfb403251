//! Logging for the layout cache and its device backends
//!
//! Every message goes through one process-wide `Logger`. The default one
//! prints colored lines (stdout up to INFO, stderr for WARN and ERROR);
//! applications route messages into their own logging by installing a
//! `Logger` with `set_logger`.
//!
//! The `layout_*!` macros check the global threshold before formatting, so a
//! disabled trace on the per-draw lookup path costs one relaxed atomic load.

use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use colored::{ColoredString, Colorize};

/// Sink for log entries
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_layout_cache::galaxy3d::log::{set_logger, LogEntry, LogSeverity, Logger};
///
/// struct ErrorsOnly;
///
/// impl Logger for ErrorsOnly {
///     fn log(&self, entry: &LogEntry) {
///         if entry.severity == LogSeverity::Error {
///             eprintln!("{}: {}", entry.source, entry.message);
///         }
///     }
/// }
///
/// set_logger(ErrorsOnly);
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

/// One log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,
    pub timestamp: SystemTime,
    /// Emitting component, e.g. "galaxy3d::LayoutCache"
    pub source: &'static str,
    pub message: String,
    /// Call site, recorded for ERROR entries only
    pub file: Option<&'static str>,
    pub line: Option<u32>,
}

/// Log severity, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-lookup detail (cache hits)
    Trace,
    /// Misses, evictions, device events
    Debug,
    Info,
    Warn,
    Error,
}

impl LogSeverity {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogSeverity::Trace,
            1 => LogSeverity::Debug,
            2 => LogSeverity::Info,
            3 => LogSeverity::Warn,
            _ => LogSeverity::Error,
        }
    }

    fn label(self) -> ColoredString {
        match self {
            LogSeverity::Trace => "TRACE".dimmed(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => " INFO".green(),
            LogSeverity::Warn => " WARN".yellow().bold(),
            LogSeverity::Error => "ERROR".red().bold(),
        }
    }
}

/// Console logger
///
/// Line format: `HH:MM:SS.mmm LEVEL source: message [file:line]`
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let time: DateTime<Local> = entry.timestamp.into();
        let mut line = format!(
            "{} {} {}: {}",
            time.format("%H:%M:%S%.3f").to_string().dimmed(),
            entry.severity.label(),
            entry.source.bright_blue(),
            entry.message,
        );
        if let (Some(file), Some(number)) = (entry.file, entry.line) {
            line.push_str(&format!(" [{}:{}]", file, number).dimmed().to_string());
        }

        // Write errors (closed pipe) are ignored
        let _ = if entry.severity >= LogSeverity::Warn {
            writeln!(std::io::stderr().lock(), "{}", line)
        } else {
            writeln!(std::io::stdout().lock(), "{}", line)
        };
    }
}

// ===== GLOBAL STATE =====

static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Least severe level forwarded to the logger (Info by default)
static MIN_SEVERITY: AtomicU8 = AtomicU8::new(LogSeverity::Info as u8);

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

/// Install a custom logger for the whole process
pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
    if let Ok(mut slot) = logger().write() {
        *slot = Box::new(logger_impl);
    }
}

/// Go back to `DefaultLogger`
pub fn reset_logger() {
    set_logger(DefaultLogger);
}

/// Set the least severe level forwarded to the logger
pub fn set_min_severity(severity: LogSeverity) {
    MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
}

/// Current threshold set by `set_min_severity`
pub fn min_severity() -> LogSeverity {
    LogSeverity::from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
}

/// Whether a message of this severity would reach the logger
#[inline]
pub fn enabled(severity: LogSeverity) -> bool {
    severity as u8 >= MIN_SEVERITY.load(Ordering::Relaxed)
}

/// Hand a message to the logger (target of the `layout_*!` macros)
pub fn emit(severity: LogSeverity, source: &'static str, message: String) {
    dispatch(severity, source, message, None);
}

/// Like `emit`, recording the call site
pub fn emit_detailed(
    severity: LogSeverity,
    source: &'static str,
    message: String,
    file: &'static str,
    line: u32,
) {
    dispatch(severity, source, message, Some((file, line)));
}

fn dispatch(
    severity: LogSeverity,
    source: &'static str,
    message: String,
    site: Option<(&'static str, u32)>,
) {
    if !enabled(severity) {
        return;
    }
    let Ok(slot) = logger().read() else {
        return;
    };
    slot.log(&LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source,
        message,
        file: site.map(|(file, _)| file),
        line: site.map(|(_, line)| line),
    });
}

// ===== MACROS =====

#[doc(hidden)]
#[macro_export]
macro_rules! __layout_log {
    ($severity:ident, $source:expr, $($arg:tt)*) => {
        if $crate::log::enabled($crate::log::LogSeverity::$severity) {
            $crate::log::emit($crate::log::LogSeverity::$severity, $source, format!($($arg)*));
        }
    };
}

/// Log at TRACE (off unless the threshold is lowered)
///
/// ```ignore
/// layout_trace!("galaxy3d::LayoutCache", "[{}] Hit (stamp {})", label, stamp);
/// ```
#[macro_export]
macro_rules! layout_trace {
    ($source:expr, $($arg:tt)*) => { $crate::__layout_log!(Trace, $source, $($arg)*) };
}

/// Log at DEBUG
#[macro_export]
macro_rules! layout_debug {
    ($source:expr, $($arg:tt)*) => { $crate::__layout_log!(Debug, $source, $($arg)*) };
}

/// Log at INFO
#[macro_export]
macro_rules! layout_info {
    ($source:expr, $($arg:tt)*) => { $crate::__layout_log!(Info, $source, $($arg)*) };
}

/// Log at WARN
#[macro_export]
macro_rules! layout_warn {
    ($source:expr, $($arg:tt)*) => { $crate::__layout_log!(Warn, $source, $($arg)*) };
}

/// Log at ERROR, with the call site's file and line
#[macro_export]
macro_rules! layout_error {
    ($source:expr, $($arg:tt)*) => {
        if $crate::log::enabled($crate::log::LogSeverity::Error) {
            $crate::log::emit_detailed(
                $crate::log::LogSeverity::Error,
                $source,
                format!($($arg)*),
                file!(),
                line!(),
            );
        }
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
