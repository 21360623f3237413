use std::fmt;

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
    Success,
}

impl LogLevel {
    /// Prefix shown before every message of this level.
    pub fn prefix(self) -> &'static str {
        match self {
            LogLevel::Error => "[US Error] ",
            LogLevel::Info | LogLevel::Success => "[US] ",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Info => "info",
            LogLevel::Error => "error",
            LogLevel::Success => "success",
        })
    }
}

/// Human-facing sink for compiler and sandbox messages.
pub trait Logger {
    fn log(&self, message: &str, level: LogLevel);

    fn info(&self, message: &str) {
        self.log(message, LogLevel::Info);
    }

    fn error(&self, message: &str) {
        self.log(message, LogLevel::Error);
    }

    fn success(&self, message: &str) {
        self.log(message, LogLevel::Success);
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn log(&self, message: &str, level: LogLevel) {
        (**self).log(message, level);
    }
}

/// Format a line the way loggers display it: prefix, then message.
pub fn format_line(message: &str, level: LogLevel) -> String {
    format!("{}{message}", level.prefix())
}
