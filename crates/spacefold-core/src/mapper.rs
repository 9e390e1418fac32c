//! Coordinate mapper strategies.
//!
//! A coordinate mapper builds the embedding map for one set: a
//! multi-affine map from the target space to the set's (post-alignment)
//! space, so that taking the preimage of the set under it re-expresses
//! the set in target coordinates.
//!
//! Two strategies exist:
//! - **Positional**: original dimension `i` lives at target position `i`
//!   (the original space occupies the first `n` target coordinates).
//! - **Explicit**: original dimension `i` lives at target position
//!   `indices[i]`, for a caller-supplied, validated index permutation.
//!
//! The map's domain carries the aligned set's parameter tuple (the
//! target's parameters, possibly extended during alignment), so the
//! preimage is well-typed even when alignment appended parameters.

use serde::{Deserialize, Serialize};
use spacefold_algebra::{AffExpr, MultiAff, Space};

use crate::error::HarmonizeError;

/// Strategy for building one set's embedding map.
///
/// Borrows the target space; consumes the original (post-alignment)
/// space, which becomes the map's range.
pub trait CoordinateMapper {
    fn build_map(&self, target: &Space, original: Space) -> Result<MultiAff, HarmonizeError>;
}

/// Positional correspondence: original dimension `i` ↔ target dimension `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Positional;

impl CoordinateMapper for Positional {
    fn build_map(&self, target: &Space, original: Space) -> Result<MultiAff, HarmonizeError> {
        let n = original.dim();
        if n > target.dim() {
            return Err(HarmonizeError::InvalidInput(format!(
                "original space has {n} dimensions but target has only {}",
                target.dim()
            )));
        }
        let domain = map_domain(target, &original)?;
        let exprs = (0..n)
            .map(|i| AffExpr::coordinate(domain.clone(), i))
            .collect::<Result<Vec<_>, _>>()
            .map_err(HarmonizeError::MapConstruction)?;
        MultiAff::from_exprs(domain, original, exprs).map_err(HarmonizeError::MapConstruction)
    }
}

/// A validated explicit dimension mapping.
///
/// Built against a target space up front: every index must be a valid
/// target dimension and no two original dimensions may land on the same
/// target position. Out-of-range and duplicated indices are reported as
/// invalid input instead of being used unchecked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimMapping {
    indices: Vec<usize>,
}

impl DimMapping {
    /// Validate `indices` against `target` and build the mapping.
    pub fn new(indices: &[usize], target: &Space) -> Result<Self, HarmonizeError> {
        let mut seen = vec![false; target.dim()];
        for &idx in indices {
            if idx >= target.dim() {
                return Err(HarmonizeError::InvalidInput(format!(
                    "mapping index {idx} out of bounds for target space of dimension {}",
                    target.dim()
                )));
            }
            if seen[idx] {
                return Err(HarmonizeError::InvalidInput(format!(
                    "mapping index {idx} used for more than one original dimension"
                )));
            }
            seen[idx] = true;
        }
        Ok(Self {
            indices: indices.to_vec(),
        })
    }

    /// Target position of each original dimension, in order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Explicit correspondence: original dimension `i` ↔ target dimension
/// `mapping.indices()[i]`.
#[derive(Debug, Clone, Copy)]
pub struct Explicit<'a>(pub &'a DimMapping);

impl CoordinateMapper for Explicit<'_> {
    fn build_map(&self, target: &Space, original: Space) -> Result<MultiAff, HarmonizeError> {
        if self.0.len() != original.dim() {
            return Err(HarmonizeError::InvalidInput(format!(
                "mapping has {} indices but the aligned space has {} dimensions",
                self.0.len(),
                original.dim()
            )));
        }
        let domain = map_domain(target, &original)?;
        let exprs = self
            .0
            .indices()
            .iter()
            .map(|&idx| AffExpr::coordinate(domain.clone(), idx))
            .collect::<Result<Vec<_>, _>>()
            .map_err(HarmonizeError::MapConstruction)?;
        MultiAff::from_exprs(domain, original, exprs).map_err(HarmonizeError::MapConstruction)
    }
}

/// The embedding map's domain: target dimensions, aligned parameters.
fn map_domain(target: &Space, original: &Space) -> Result<Space, HarmonizeError> {
    Space::with_params(target.dim(), original.params().to_vec())
        .map_err(HarmonizeError::MapConstruction)
}
