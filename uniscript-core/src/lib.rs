//! Core compiler for the Uniscript block markup.
//!
//! A Uniscript source is a flat list of named, typed blocks (HTML, CSS,
//! JS, TS, Python). The `main` block carries the directives that wire
//! them together. The pipeline is roughly:
//!
//!   source text
//!     -> extract   (block table)
//!     -> lexer     (directive tokens of `main`)
//!     -> parser    (metadata, declarations, placements, execution sequence)
//!     -> codegen   (one HTML fragment per sequenced block)
//!     -> assemble  (single self-contained document)
//!
//! Higher-level tools (CLI, sandbox runner, etc.) should depend on this
//! crate rather than reimplementing the pipeline.

// ---------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------

pub mod span;
pub mod error;

// ---------------------------------------------------------------------
// Front-end: block extraction and the directive language
// ---------------------------------------------------------------------

pub mod block;
pub mod extract;
pub mod lexer;
pub mod parser;

// ---------------------------------------------------------------------
// Back-end: code generation, assembly and compiler orchestration
// ---------------------------------------------------------------------

pub mod options;
pub mod transform;
pub mod rewrite;
pub mod codegen_html;
pub mod assemble;
pub mod compiler;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use block::{Block, BlockKind, BlockTable};
pub use compiler::{UniscriptCompiler, compile};
pub use error::CompileError;
pub use options::CompileOptions;
pub use parser::{Directives, Placement};
pub use transform::{Dialect, Passthrough, Transform, TransformError};
