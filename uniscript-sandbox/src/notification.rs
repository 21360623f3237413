//! Messages posted by the error shim of an instrumented document.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::logger::{LogLevel, Logger};

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("malformed sandbox notification: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A structured message from the sandboxed document.
///
/// `msg` is whatever the page passed along, which for `console.log` may
/// be any JSON value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Notification {
    Error {
        msg: Value,
        #[serde(default)]
        line: Option<u64>,
    },
    Log {
        msg: Value,
    },
}

impl Notification {
    pub fn from_json(json: &str) -> Result<Self, NotificationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn level(&self) -> LogLevel {
        match self {
            Notification::Error { .. } => LogLevel::Error,
            Notification::Log { .. } => LogLevel::Info,
        }
    }

    /// The line shown to the user for this notification.
    pub fn message(&self) -> String {
        match self {
            Notification::Error { msg, line } => {
                let line = line.map_or_else(|| "undefined".to_string(), |l| l.to_string());
                format!("JS Runtime Error: {} (Line: {line})", display_value(msg))
            }
            Notification::Log { msg } => format!("Console: {}", display_value(msg)),
        }
    }
}

/// Forward a notification to `logger`.
pub fn relay<L: Logger + ?Sized>(notification: &Notification, logger: &L) {
    logger.log(&notification.message(), notification.level());
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "undefined".to_string(),
        other => other.to_string(),
    }
}
