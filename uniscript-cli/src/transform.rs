//! Script transform backed by an external command.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use uniscript_core::{Dialect, Transform, TransformError};

/// Runs a program with the source on stdin and takes its stdout as the
/// transformed code.
///
/// The dialect's preset and file name are exported to the child as
/// `UNISCRIPT_DIALECT` and `UNISCRIPT_FILENAME`.
#[derive(Debug, Clone)]
pub struct CommandTransform {
    program: String,
    args: Vec<String>,
}

impl CommandTransform {
    /// Build from a command line. Returns `None` for an empty one.
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(CommandTransform {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl Transform for CommandTransform {
    fn transform(&self, dialect: Dialect, source: &str) -> Result<String, TransformError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("UNISCRIPT_DIALECT", dialect.preset())
            .env("UNISCRIPT_FILENAME", dialect.file_name())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                TransformError::msg(format!("failed to start `{}`: {err}", self.program))
            })?;

        // Feed stdin from a separate thread; the child may fill its stdout
        // pipe before it has read all of its input.
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || -> io::Result<()> {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(source.as_bytes())?;
                }
                Ok(())
            });
            let output = child.wait_with_output();
            (writer.join(), output)
        });

        let output = output.map_err(TransformError::new)?;
        match written {
            Ok(Ok(())) => {}
            // Child exited without reading all of its input.
            Ok(Err(err)) if err.kind() == io::ErrorKind::BrokenPipe => {}
            Ok(Err(err)) => return Err(TransformError::new(err)),
            Err(_) => return Err(TransformError::msg("stdin writer thread panicked")),
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TransformError::msg(format!(
                "`{}` failed ({}): {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(TransformError::new)
    }
}

/// The transform selected by configuration: an external command, or the
/// source unchanged when none is configured.
#[derive(Debug, Clone)]
pub enum ConfiguredTransform {
    Command(CommandTransform),
    Passthrough,
}

impl Transform for ConfiguredTransform {
    fn transform(&self, dialect: Dialect, source: &str) -> Result<String, TransformError> {
        match self {
            ConfiguredTransform::Command(command) => command.transform(dialect, source),
            ConfiguredTransform::Passthrough => Ok(source.to_string()),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn command(parts: &[&str]) -> CommandTransform {
        let parts: Vec<String> = parts.iter().map(|s| s.to_string()).collect();
        CommandTransform::new(&parts).expect("non-empty command")
    }

    #[test]
    fn pipes_source_through_program() {
        let out = command(&["tr", "a-z", "A-Z"])
            .transform(Dialect::TypeScript, "let x = 1;")
            .expect("transform");
        assert_eq!(out, "LET X = 1;");
    }

    #[test]
    fn exports_dialect_to_child() {
        let out = command(&["sh", "-c", "cat >/dev/null; printf %s \"$UNISCRIPT_DIALECT\""])
            .transform(Dialect::TypeScript, "x")
            .expect("transform");
        assert_eq!(out, "typescript");
    }

    #[test]
    fn failing_program_reports_stderr() {
        let err = command(&["sh", "-c", "cat >/dev/null; echo 'bad token' >&2; exit 3"])
            .transform(Dialect::TypeScript, "x")
            .unwrap_err();
        assert!(err.to_string().contains("bad token"));
    }

    #[test]
    fn missing_program_is_a_transform_error() {
        let err = command(&["uniscript-no-such-transpiler"])
            .transform(Dialect::TypeScript, "x")
            .unwrap_err();
        assert!(err.to_string().contains("failed to start"));
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(CommandTransform::new(&[]).is_none());
    }
}
