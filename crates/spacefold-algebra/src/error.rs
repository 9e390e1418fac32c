//! Error types for algebra operations.

use crate::space::ParamId;

/// Errors arising from malformed spaces, expressions, maps, or sets.
#[derive(Debug, thiserror::Error)]
pub enum AlgebraError {
    /// A parameter tuple contains the same identity twice.
    #[error("duplicate parameter: {0}")]
    DuplicateParam(ParamId),

    /// A dimension index does not exist in the space it was used with.
    #[error("dimension index {index} out of bounds for space of dimension {dim}")]
    DimIndexOutOfBounds { index: usize, dim: usize },

    /// A multi-affine map's expression tuple has the wrong length.
    #[error("tuple arity mismatch: expected {expected} expressions, got {actual}")]
    TupleArity { expected: usize, actual: usize },

    /// Two values that must share a space do not.
    #[error("space mismatch: {0}")]
    SpaceMismatch(String),

    /// A concrete point or parameter vector has the wrong length.
    #[error("point arity mismatch: expected {expected} values, got {actual}")]
    PointArity { expected: usize, actual: usize },
}
