//! Rolling Logger
//!
//! A `log` backend that keeps the most recent formatted lines in a circular
//! buffer so the admin panel can show its own activity, and forwards every
//! line to the browser console (or stderr off the web).

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// One formatted log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: Level,
    pub text: String,
}

pub struct RollingLogger {
    app_name: String,
    capacity: usize,
    level: LevelFilter,
    lines: Mutex<VecDeque<LogLine>>,
}

impl RollingLogger {
    pub fn new(app_name: impl Into<String>, capacity: usize, level: LevelFilter) -> Self {
        Self {
            app_name: app_name.into(),
            capacity: capacity.max(1),
            level,
            lines: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    /// Buffered lines, oldest first
    pub fn lines(&self) -> Vec<LogLine> {
        match self.lines.lock() {
            Ok(lines) => lines.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    fn format(&self, record: &Record) -> String {
        format!(
            "[{}] {} {}: {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            self.app_name,
            record.args()
        )
    }

    fn push(&self, line: LogLine) {
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let text = self.format(record);
        emit(record.level(), &text);
        self.push(LogLine {
            level: record.level(),
            text,
        });
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, text: &str) {
    let value = wasm_bindgen::JsValue::from_str(text);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, text: &str) {
    eprintln!("{}", text);
}

/// Install the global logger. Fails if a logger is already set.
pub fn init_logger(
    app_name: &str,
    capacity: usize,
    level: LevelFilter,
) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RollingLogger::new(app_name, capacity, level));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Recent lines from the installed logger; empty before `init_logger`.
pub fn recent_lines() -> Vec<LogLine> {
    LOGGER.get().map(RollingLogger::lines).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_to(logger: &RollingLogger, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .args(format_args!("{}", message))
                .build(),
        );
    }

    #[test]
    fn test_keeps_only_latest_lines() {
        let logger = RollingLogger::new("Test", 2, LevelFilter::Info);
        log_to(&logger, Level::Info, "one");
        log_to(&logger, Level::Info, "two");
        log_to(&logger, Level::Warn, "three");

        let lines = logger.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].text.ends_with("Test: two"));
        assert_eq!(lines[1].level, Level::Warn);
        assert!(lines[1].text.ends_with("Test: three"));
    }

    #[test]
    fn test_filters_below_level() {
        let logger = RollingLogger::new("Test", 8, LevelFilter::Info);
        log_to(&logger, Level::Debug, "hidden");
        assert!(logger.lines().is_empty());
    }
}
