//! Coordinate spaces.
//!
//! A space is the "type" every other algebra value is defined over: an
//! ordered list of set dimensions plus an ordered parameter tuple. Spaces
//! are immutable values; every transformation produces a new space.
//!
//! Two spaces are *parameter-aligned* when their parameter tuples are
//! identical in identity and order. Alignment is a precondition for any
//! operation that mixes values from different spaces.

use serde::{Deserialize, Serialize};

use crate::error::AlgebraError;

/// Identifier for a symbolic parameter.
///
/// Parameters are free symbolic constants (loop bounds, problem sizes)
/// shared across the constraints of a set. Identity is by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParamId(pub String);

impl ParamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ParamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A coordinate space: a set-dimension count plus a parameter tuple.
///
/// Dimensions are positional (`d0`, `d1`, …); parameters are named and
/// ordered. Construction with parameters validates that no identity
/// appears twice, so every live `Space` carries a well-formed tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    dims: usize,
    params: Vec<ParamId>,
}

impl Space {
    /// A set space with `dims` dimensions and no parameters.
    pub fn set_space(dims: usize) -> Self {
        Self {
            dims,
            params: Vec::new(),
        }
    }

    /// A set space with `dims` dimensions and the given parameter tuple.
    pub fn with_params(dims: usize, params: Vec<ParamId>) -> Result<Self, AlgebraError> {
        for (i, p) in params.iter().enumerate() {
            if params[..i].contains(p) {
                return Err(AlgebraError::DuplicateParam(p.clone()));
            }
        }
        Ok(Self { dims, params })
    }

    /// The number of set dimensions.
    pub fn dim(&self) -> usize {
        self.dims
    }

    /// The parameter tuple, in order.
    pub fn params(&self) -> &[ParamId] {
        &self.params
    }

    /// The number of parameters.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Position of a parameter within the tuple, if present.
    pub fn param_index(&self, id: &ParamId) -> Option<usize> {
        self.params.iter().position(|p| p == id)
    }

    /// Whether this space's parameter tuple matches `other`'s exactly.
    pub fn params_aligned_with(&self, other: &Space) -> bool {
        self.params == other.params
    }
}

impl std::fmt::Display for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.params.is_empty() {
            write!(f, "[")?;
            for (i, p) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{p}")?;
            }
            write!(f, "] -> ")?;
        }
        write!(f, "{{ [")?;
        for i in 0..self.dims {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "d{i}")?;
        }
        write!(f, "] }}")
    }
}
