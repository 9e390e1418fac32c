//! The harmonization orchestrator.
//!
//! Given two sets over independently constructed spaces and a common
//! target space, produce both sets re-expressed in target coordinates.
//! One parameterized pipeline serves both public entry points; only the
//! coordinate mapper strategy differs:
//!
//! ```text
//! validate → align params → query aligned spaces → build maps → embed
//! ```
//!
//! Harmonization is all-or-nothing. Every stage consumes its inputs by
//! value, so on any failure branch the intermediates built so far are
//! released by drop — exactly once, on every path — and the caller gets
//! a tagged error with both result slots absent.

use spacefold_algebra::{Set, Space};

use crate::align;
use crate::embed;
use crate::error::HarmonizeError;
use crate::mapper::{CoordinateMapper, DimMapping, Explicit, Positional};

/// Harmonize two sets assuming positional correspondence: each set's
/// dimensions occupy the first `n` target coordinates, in order.
///
/// Consumes both sets; borrows the target space. On success both
/// returned sets live in the target space.
pub fn harmonize_positional(
    set1: Set,
    set2: Set,
    target: &Space,
) -> Result<(Set, Set), HarmonizeError> {
    harmonize_with(set1, set2, target, &Positional, &Positional)
}

/// Harmonize two sets with explicit dimension mappings: original
/// dimension `i` of each set lands at target position `indices[i]`.
///
/// Index arrays are validated up front (bounds, uniqueness, and length
/// against each set's aligned dimension count); any violation is an
/// invalid-input error, never undefined behavior.
pub fn harmonize_mapped(
    set1: Set,
    set2: Set,
    target: &Space,
    set1_indices: &[usize],
    set2_indices: &[usize],
) -> Result<(Set, Set), HarmonizeError> {
    let mapping1 = DimMapping::new(set1_indices, target)?;
    let mapping2 = DimMapping::new(set2_indices, target)?;
    harmonize_with(
        set1,
        set2,
        target,
        &Explicit(&mapping1),
        &Explicit(&mapping2),
    )
}

/// The shared five-stage pipeline, parameterized by one mapper per set.
pub fn harmonize_with(
    set1: Set,
    set2: Set,
    target: &Space,
    mapper1: &dyn CoordinateMapper,
    mapper2: &dyn CoordinateMapper,
) -> Result<(Set, Set), HarmonizeError> {
    // Align parameters first; the mappers are defined over the aligned
    // spaces, not the originals.
    let aligned1 = align::align_to(set1, target)?;
    let aligned2 = align::align_to(set2, target)?;

    let space1 = aligned1.space();
    let space2 = aligned2.space();

    let map1 = mapper1.build_map(target, space1)?;
    let map2 = mapper2.build_map(target, space2)?;

    let embedded1 = embed::embed(aligned1, map1)?;
    let embedded2 = embed::embed(aligned2, map2)?;

    Ok((embedded1, embedded2))
}
