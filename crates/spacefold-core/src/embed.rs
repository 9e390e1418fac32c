//! Preimage embedding stage.
//!
//! A set "moves into" the target coordinate system by preimage: rather
//! than rewriting its constraints directly, the embedding describes the
//! target-space points whose image under the embedding map lands in the
//! original set.

use spacefold_algebra::{MultiAff, Set};

use crate::error::HarmonizeError;

/// Compute the preimage of `set` under `map`. Consumes both.
///
/// The map must run from the target space to the set's space; the result
/// lives in the target space.
pub fn embed(set: Set, map: MultiAff) -> Result<Set, HarmonizeError> {
    set.preimage(map).map_err(HarmonizeError::Embedding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{CoordinateMapper, Positional};
    use spacefold_algebra::{AffExpr, Constraint, Space};

    #[test]
    fn embed_lifts_constraints_into_target() {
        // d0 = 1 over a 1-d space, embedded positionally into 3 dimensions.
        let space = Space::set_space(1);
        let set = Set::universe(space.clone())
            .constrain(Constraint::equal_zero(
                AffExpr::new(space.clone(), vec![1], vec![], -1).unwrap(),
            ))
            .unwrap();

        let target = Space::set_space(3);
        let map = Positional.build_map(&target, space).unwrap();
        let embedded = embed(set, map).unwrap();

        assert_eq!(embedded.space().dim(), 3);
        assert!(embedded.contains(&[1, -7, 42], &[]).unwrap());
        assert!(!embedded.contains(&[0, -7, 42], &[]).unwrap());
    }

    #[test]
    fn embed_rejects_mistyped_map() {
        // Map range is 2-d but the set is 1-d.
        let set = Set::universe(Space::set_space(1));
        let target = Space::set_space(3);
        let map = Positional.build_map(&target, Space::set_space(2)).unwrap();
        let err = embed(set, map).unwrap_err();
        assert!(matches!(err, HarmonizeError::Embedding(_)));
    }
}
