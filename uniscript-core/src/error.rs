use thiserror::Error;

use crate::transform::TransformError;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Compilation Error: 'main' block not found.")]
    MissingEntryPoint,
    #[error(transparent)]
    Transform(#[from] TransformError),
}
