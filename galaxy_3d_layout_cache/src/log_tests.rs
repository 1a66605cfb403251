//! Unit tests for log.rs
//!
//! Covers the severity threshold, call-site capture, DefaultLogger and
//! logger replacement. Tests touching global state are #[serial].

use crate::log::{self, DefaultLogger, LogEntry, LogSeverity, Logger};
use serial_test::serial;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures entries from the "galaxy3d::LogTest" source
struct TestLogger {
    entries: Arc<Mutex<Vec<(LogSeverity, String)>>>,
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        if entry.source == "galaxy3d::LogTest" {
            self.entries.lock().unwrap().push((entry.severity, entry.message.clone()));
        }
    }
}

fn install_test_logger() -> Arc<Mutex<Vec<(LogSeverity, String)>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    log::set_logger(TestLogger { entries: entries.clone() });
    entries
}

// ============================================================================
// THRESHOLD TESTS
// ============================================================================

#[test]
fn test_severity_order_drives_threshold() {
    let levels = [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ];
    assert!(levels.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
#[serial]
fn test_min_severity_round_trips_every_level() {
    for level in [LogSeverity::Trace, LogSeverity::Debug, LogSeverity::Warn, LogSeverity::Error] {
        log::set_min_severity(level);
        assert_eq!(log::min_severity(), level);
    }
    log::set_min_severity(LogSeverity::Info);
}

#[test]
#[serial]
fn test_enabled_follows_threshold() {
    log::set_min_severity(LogSeverity::Warn);
    assert!(!log::enabled(LogSeverity::Info));
    assert!(log::enabled(LogSeverity::Warn));
    assert!(log::enabled(LogSeverity::Error));
    log::set_min_severity(LogSeverity::Info);
}

// ============================================================================
// ENTRY AND DEFAULT LOGGER TESTS
// ============================================================================

#[test]
#[serial]
fn test_error_macro_records_call_site() {
    let entries = Arc::new(Mutex::new(Vec::new()));
    struct SiteLogger(Arc<Mutex<Vec<LogEntry>>>);
    impl Logger for SiteLogger {
        fn log(&self, entry: &LogEntry) {
            if entry.source == "galaxy3d::LogTest" {
                self.0.lock().unwrap().push(entry.clone());
            }
        }
    }
    log::set_logger(SiteLogger(entries.clone()));

    crate::layout_warn!("galaxy3d::LogTest", "no site");
    crate::layout_error!("galaxy3d::LogTest", "with site");

    let captured = entries.lock().unwrap().clone();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].file, None);
    assert_eq!(captured[1].file, Some(file!()));
    assert!(captured[1].line.is_some());

    log::reset_logger();
}

#[test]
fn test_default_logger_does_not_panic() {
    let logger = DefaultLogger;
    logger.log(&LogEntry {
        severity: LogSeverity::Warn,
        timestamp: SystemTime::now(),
        source: "galaxy3d::LogTest",
        message: "plain".to_string(),
        file: None,
        line: None,
    });
    logger.log(&LogEntry {
        severity: LogSeverity::Error,
        timestamp: SystemTime::now(),
        source: "galaxy3d::LogTest",
        message: "detailed".to_string(),
        file: Some(file!()),
        line: Some(line!()),
    });
}

// ============================================================================
// GLOBAL LOGGER TESTS
// ============================================================================

#[test]
#[serial]
fn test_macros_reach_custom_logger() {
    let entries = install_test_logger();

    crate::layout_info!("galaxy3d::LogTest", "cache ready ({} slots)", 1024);
    crate::layout_warn!("galaxy3d::LogTest", "slow create");
    crate::layout_error!("galaxy3d::LogTest", "create failed");

    let entries_guard = entries.lock().unwrap();
    assert_eq!(entries_guard.len(), 3);
    assert_eq!(entries_guard[0], (LogSeverity::Info, "cache ready (1024 slots)".to_string()));
    assert_eq!(entries_guard[1].0, LogSeverity::Warn);
    assert_eq!(entries_guard[2].0, LogSeverity::Error);
    drop(entries_guard);

    log::reset_logger();
}

#[test]
#[serial]
fn test_min_severity_filters_messages() {
    let entries = install_test_logger();
    assert_eq!(log::min_severity(), LogSeverity::Info);

    crate::layout_trace!("galaxy3d::LogTest", "hidden trace");
    crate::layout_debug!("galaxy3d::LogTest", "hidden debug");
    assert!(entries.lock().unwrap().is_empty());

    log::set_min_severity(LogSeverity::Trace);
    assert!(log::enabled(LogSeverity::Trace));
    crate::layout_trace!("galaxy3d::LogTest", "visible trace");
    assert_eq!(entries.lock().unwrap().len(), 1);

    log::set_min_severity(LogSeverity::Error);
    crate::layout_warn!("galaxy3d::LogTest", "hidden warn");
    assert_eq!(entries.lock().unwrap().len(), 1);

    log::set_min_severity(LogSeverity::Info);
    log::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let entries = install_test_logger();
    log::reset_logger();

    crate::layout_info!("galaxy3d::LogTest", "goes to DefaultLogger");
    assert!(entries.lock().unwrap().is_empty());
}
