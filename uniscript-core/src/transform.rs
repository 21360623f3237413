//! Source-to-source transform capability.
//!
//! Script dialects the browser cannot run directly are handed to a
//! [`Transform`] before they are wrapped in a `<script>` tag. The core
//! ships only [`Passthrough`]; real transpilers live with the caller.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Script dialect a block is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    TypeScript,
}

impl Dialect {
    /// Preset name understood by common transpilers.
    pub fn preset(self) -> &'static str {
        match self {
            Dialect::TypeScript => "typescript",
        }
    }

    /// File name hint for transpilers that infer the dialect from it.
    pub fn file_name(self) -> &'static str {
        match self {
            Dialect::TypeScript => "t.ts",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.preset())
    }
}

/// Error raised by a transform. Its message is shown as-is.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct TransformError(Box<dyn StdError + Send + Sync>);

impl TransformError {
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        TransformError(source.into())
    }

    pub fn msg(message: impl fmt::Display) -> Self {
        TransformError(message.to_string().into())
    }

    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync> {
        self.0
    }
}

/// Turns source text in some dialect into plain JavaScript.
pub trait Transform {
    fn transform(&self, dialect: Dialect, source: &str) -> Result<String, TransformError>;
}

impl<T: Transform + ?Sized> Transform for &T {
    fn transform(&self, dialect: Dialect, source: &str) -> Result<String, TransformError> {
        (**self).transform(dialect, source)
    }
}

impl<T: Transform + ?Sized> Transform for Box<T> {
    fn transform(&self, dialect: Dialect, source: &str) -> Result<String, TransformError> {
        (**self).transform(dialect, source)
    }
}

/// Returns the source unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Transform for Passthrough {
    fn transform(&self, _dialect: Dialect, source: &str) -> Result<String, TransformError> {
        Ok(source.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rejecting;

    impl Transform for Rejecting {
        fn transform(&self, dialect: Dialect, _source: &str) -> Result<String, TransformError> {
            Err(TransformError::msg(format!("{dialect}: unexpected token")))
        }
    }

    #[test]
    fn passthrough_keeps_source() {
        let out = Passthrough
            .transform(Dialect::TypeScript, "let x: number = 1;")
            .expect("transform");
        assert_eq!(out, "let x: number = 1;");
    }

    #[test]
    fn boxed_transforms_forward_errors() {
        let boxed: Box<dyn Transform> = Box::new(Rejecting);
        let err = boxed.transform(Dialect::TypeScript, "").unwrap_err();
        assert_eq!(err.to_string(), "typescript: unexpected token");
    }

    #[test]
    fn wraps_foreign_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "transpiler exited");
        let err = TransformError::new(io);
        assert_eq!(err.to_string(), "transpiler exited");
        assert!(err.into_inner().downcast::<std::io::Error>().is_ok());
    }

    #[derive(Debug, Error)]
    #[error("bundle failed")]
    struct BundleError(#[source] std::io::Error);

    #[test]
    fn keeps_the_wrapped_error_chain() {
        let io = std::io::Error::other("disk full");
        let err = TransformError::new(BundleError(io));
        assert_eq!(err.to_string(), "bundle failed");
        let cause = err.source().expect("source");
        assert_eq!(cause.to_string(), "disk full");
    }
}
