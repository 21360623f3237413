//! Terminal logging with colored prefixes.
//!
//! ```ignore
//! log!("compile"; "{} blocks found", count);
//! ```

use std::io::{Write, stderr, stdout};

use colored::{ColoredString, Colorize};
use uniscript_sandbox::logger::format_line;
use uniscript_sandbox::{LogLevel, Logger};

/// Log a message with a colored module prefix.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    if module.eq_ignore_ascii_case("error") {
        let mut stderr = stderr().lock();
        writeln!(stderr, "{prefix} {message}").ok();
    } else {
        let mut stdout = stdout().lock();
        writeln!(stdout, "{prefix} {message}").ok();
        stdout.flush().ok();
    }
}

fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "compile" => prefix.bright_blue().bold(),
        "relay" => prefix.bright_green().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Shows sandbox and compiler messages on the terminal.
///
/// Errors go to stderr in red, successes to stdout in green and
/// everything else to stdout in the default color.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalLogger;

impl Logger for TerminalLogger {
    fn log(&self, message: &str, level: LogLevel) {
        let line = format_line(message, level);
        match level {
            LogLevel::Error => {
                writeln!(stderr().lock(), "{}", line.bright_red()).ok();
            }
            LogLevel::Success => {
                writeln!(stdout().lock(), "{}", line.bright_green()).ok();
            }
            LogLevel::Info => {
                writeln!(stdout().lock(), "{}", line.white()).ok();
            }
        }
    }
}
