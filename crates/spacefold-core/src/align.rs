//! Parameter alignment stage.
//!
//! Alignment must happen strictly before any embedding map is built: the
//! coordinate mappers are defined in terms of each set's post-alignment
//! space, not its original one.

use spacefold_algebra::{Set, Space};

use crate::error::HarmonizeError;

/// Re-express `set` so its parameter tuple matches the target's.
///
/// Consumes the set; borrows the target space. Returns the aligned set,
/// whose parameter tuple starts with the target's parameters.
pub fn align_to(set: Set, target: &Space) -> Result<Set, HarmonizeError> {
    set.align_params(target).map_err(HarmonizeError::Alignment)
}
