//! Logging infrastructure for petal.
//!
//! Provides a simple, thread-safe logger with optional file output and
//! in-memory log storage. `init` also installs it as the `log` facade
//! backend, so library crates only ever use `log::info!` and friends.

use chrono::Local;
use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

/// Log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Timestamp in HH:MM:SS format
    pub timestamp: String,
    /// Message level
    pub level: LogLevel,
    /// Module path that produced the entry
    pub target: String,
    /// Message text
    pub message: String,
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert log level to string
    pub fn to_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Next level, wrapping from Error back to Debug.
    pub fn next(self) -> Self {
        match self {
            LogLevel::Debug => LogLevel::Info,
            LogLevel::Info => LogLevel::Warn,
            LogLevel::Warn => LogLevel::Error,
            LogLevel::Error => LogLevel::Debug,
        }
    }

    fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Info => LogLevel::Info,
            // Trace is folded into Debug
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "trace" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Logger state
#[derive(Debug)]
struct Logger {
    /// Last N messages
    entries: VecDeque<LogEntry>,
    /// Maximum number of entries in memory
    max_entries: usize,
    /// Minimum log level to record
    min_level: LogLevel,
    /// Log file path, if file output is enabled
    file_path: Option<PathBuf>,
}

impl Logger {
    fn new(file_path: Option<PathBuf>, max_entries: usize, min_level: LogLevel) -> Self {
        if let Some(path) = &file_path {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }

            // Clear log file on startup
            if let Ok(mut file) = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
            {
                let _ = writeln!(file, "=== Petal Log Start ===");
            }
        }

        Self {
            entries: VecDeque::new(),
            max_entries,
            min_level,
            file_path,
        }
    }

    fn add_entry(&mut self, level: LogLevel, target: &str, message: String) {
        if level < self.min_level {
            return;
        }

        let timestamp = Local::now().format("%H:%M:%S").to_string();

        // Write to file (create if deleted)
        if let Some(path) = &self.file_path {
            if let Ok(mut file) = OpenOptions::new().append(true).create(true).open(path) {
                let _ = writeln!(
                    file,
                    "[{}] {} {}: {}",
                    timestamp,
                    level.to_str(),
                    target,
                    message
                );
            }
        }

        self.entries.push_back(LogEntry {
            timestamp,
            level,
            target: target.to_string(),
            message,
        });

        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    fn get_entries(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }
}

/// Global logger instance that persists for the application lifetime.
static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Bridge from the `log` facade into the global logger.
struct FacadeBridge;

static BRIDGE: FacadeBridge = FacadeBridge;

impl log::Log for FacadeBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        LOGGER
            .get()
            .and_then(|logger| logger.lock().ok())
            .is_some_and(|logger| LogLevel::from(metadata.level()) >= logger.min_level)
    }

    fn log(&self, record: &log::Record) {
        record_entry(
            record.level().into(),
            record.target(),
            record.args().to_string(),
        );
    }

    fn flush(&self) {}
}

fn record_entry(level: LogLevel, target: &str, message: String) {
    // Logging before init() is a no-op
    let Some(logger) = LOGGER.get() else {
        return;
    };
    if let Ok(mut logger) = logger.lock() {
        logger.add_entry(level, target, message);
    }
}

/// Initialize the global logger
///
/// Must be called once at application startup. Subsequent calls are
/// ignored. Also registers the logger with the `log` facade.
///
/// # Arguments
///
/// * `file_path` - Path to the log file (`None` keeps logs in memory only)
/// * `max_entries` - Maximum number of log entries to keep in memory
/// * `min_level` - Minimum log level to record (Debug, Info, Warn, Error)
pub fn init(file_path: Option<PathBuf>, max_entries: usize, min_level: LogLevel) {
    let mut fresh = false;
    LOGGER.get_or_init(|| {
        fresh = true;
        Mutex::new(Logger::new(file_path, max_entries, min_level))
    });

    if fresh && log::set_logger(&BRIDGE).is_ok() {
        log::set_max_level(min_level.to_filter());
    }
}

/// Set minimum log level dynamically
pub fn set_min_level(level: LogLevel) {
    if let Some(Ok(mut logger)) = LOGGER.get().map(|l| l.lock()) {
        logger.set_min_level(level);
        log::set_max_level(level.to_filter());
    }
}

/// Get all log entries currently stored in memory.
pub fn get_entries() -> Vec<LogEntry> {
    LOGGER
        .get()
        .and_then(|logger| logger.lock().ok())
        .map(|logger| logger.get_entries())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("trace".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_min_level_filters_entries() {
        let mut logger = Logger::new(None, 10, LogLevel::Info);
        logger.add_entry(LogLevel::Debug, "t", "hidden".into());
        logger.add_entry(LogLevel::Warn, "t", "shown".into());

        let entries = logger.get_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "shown");
    }

    #[test]
    fn test_level_cycle_and_runtime_change() {
        assert_eq!(LogLevel::Warn.next(), LogLevel::Error);
        assert_eq!(LogLevel::Error.next(), LogLevel::Debug);

        let mut logger = Logger::new(None, 10, LogLevel::Error);
        logger.add_entry(LogLevel::Info, "t", "dropped".into());
        logger.set_min_level(LogLevel::Error.next());
        logger.add_entry(LogLevel::Debug, "t", "kept".into());

        let messages: Vec<String> = logger.get_entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["kept"]);
    }

    #[test]
    fn test_ring_buffer_is_bounded() {
        let mut logger = Logger::new(None, 3, LogLevel::Debug);
        for i in 0..5 {
            logger.add_entry(LogLevel::Info, "t", format!("m{}", i));
        }

        let messages: Vec<String> = logger.get_entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["m2", "m3", "m4"]);
    }

    #[test]
    fn test_file_output_is_truncated_then_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("petal.log");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "stale\n").unwrap();

        let mut logger = Logger::new(Some(path.clone()), 10, LogLevel::Debug);
        logger.add_entry(LogLevel::Error, "petal_core", "boom".into());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        assert!(content.contains("ERROR petal_core: boom"));
    }
}
