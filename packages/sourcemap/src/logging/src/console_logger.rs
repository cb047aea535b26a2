// Console Logger
//
// Writes `[LEVEL] message` lines to stderr; stdout carries lookup results.

use std::io::{self, Write};

use super::logger::{LogLevel, Logger};

#[derive(Debug, Clone, Copy)]
pub struct ConsoleLogger {
    level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    fn emit(&self, level: LogLevel, msg: &str) {
        if !self.is_enabled(level) {
            return;
        }
        // Write errors on stderr are ignored.
        let _ = writeln!(io::stderr().lock(), "[{}] {}", level, msg);
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new(LogLevel::Warn)
    }
}

impl Logger for ConsoleLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn debug(&self, msg: &str) {
        self.emit(LogLevel::Debug, msg);
    }

    fn info(&self, msg: &str) {
        self.emit(LogLevel::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.emit(LogLevel::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.emit(LogLevel::Error, msg);
    }
}
