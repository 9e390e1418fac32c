//! Sets with atom-labelled dimensions.
//!
//! A `LabelledSet<T>` pairs a point set with a mapping from its
//! dimensions to atoms of an ordered type `T`. Two labelled sets over
//! different atom vocabularies (different atoms, different orders) are
//! made comparable by harmonizing them: the combined sorted atom list
//! becomes the target space, each set's index array is derived from its
//! atoms' positions in that list, and both sets are embedded through the
//! explicit-mapping pipeline.
//!
//! Deriving a per-set index array is what keeps reordered vocabularies
//! correct: `['a', 'b']` and `['b', 'a']` land on the same target
//! coordinates.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use spacefold_algebra::{AffExpr, Constraint, Set, Space};

use crate::error::HarmonizeError;
use crate::harmonize::harmonize_mapped;

/// A point set whose dimensions are labelled by atoms of type `T`.
///
/// Dimension `i` corresponds to `mapping()[i]`. Harmonization-derived
/// sets always carry the combined mapping in sorted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelledSet<T> {
    set: Set,
    mapping: Vec<T>,
}

impl<T: Ord + Clone> LabelledSet<T> {
    /// The set of all points with non-negative coordinates, one
    /// dimension per atom.
    pub fn universe(atoms: Vec<T>) -> Self {
        let space = Space::set_space(atoms.len());
        let mut set = Set::universe(space.clone());
        for i in 0..atoms.len() {
            let expr =
                AffExpr::coordinate(space.clone(), i).expect("dimension index within space");
            set = set
                .constrain(Constraint::non_negative(expr))
                .expect("constraint over the set's own space");
        }
        Self {
            set,
            mapping: atoms,
        }
    }

    /// The singleton direction of one atom: a 1-dimensional set with the
    /// coordinate fixed to 1.
    pub fn atom(atom: T) -> Self {
        let space = Space::set_space(1);
        let expr = AffExpr::new(space.clone(), vec![1], vec![], -1)
            .expect("coefficients match a 1-dimensional space");
        let set = Set::universe(space)
            .constrain(Constraint::equal_zero(expr))
            .expect("constraint over the set's own space");
        Self {
            set,
            mapping: vec![atom],
        }
    }

    /// Wrap an existing set with a dimension labelling.
    pub fn from_parts(set: Set, mapping: Vec<T>) -> Result<Self, HarmonizeError> {
        if set.space().dim() != mapping.len() {
            return Err(HarmonizeError::InvalidInput(format!(
                "set has {} dimensions but {} atoms were supplied",
                set.space().dim(),
                mapping.len()
            )));
        }
        Ok(Self { set, mapping })
    }

    /// The atom labelling each dimension, in order.
    pub fn mapping(&self) -> &[T] {
        &self.mapping
    }

    /// The underlying point set.
    pub fn set(&self) -> &Set {
        &self.set
    }

    pub fn into_parts(self) -> (Set, Vec<T>) {
        (self.set, self.mapping)
    }

    /// Membership of a concrete point, coordinates ordered per `mapping()`.
    pub fn contains(&self, point: &[i64]) -> Result<bool, HarmonizeError> {
        self.set
            .contains(point, &[])
            .map_err(|e| HarmonizeError::InvalidInput(e.to_string()))
    }

    /// Re-express both sets over the combined sorted atom vocabulary.
    ///
    /// Consumes both sets and returns both re-expressed, each carrying
    /// the combined mapping. Sets already over the combined vocabulary
    /// are returned unchanged.
    pub fn harmonize(self, other: Self) -> Result<(Self, Self), HarmonizeError> {
        let mut combined_atoms: BTreeSet<T> = BTreeSet::new();
        for atom in self.mapping.iter().chain(other.mapping.iter()) {
            combined_atoms.insert(atom.clone());
        }
        let combined: Vec<T> = combined_atoms.into_iter().collect();

        if self.mapping == combined
            && other.mapping == combined
            && self.set.space() == other.set.space()
        {
            return Ok((self, other));
        }

        let target = Space::set_space(combined.len());
        let idx1 = index_array(&self.mapping, &combined)?;
        let idx2 = index_array(&other.mapping, &combined)?;

        let (set1, set2) = harmonize_mapped(self.set, other.set, &target, &idx1, &idx2)?;
        Ok((
            Self {
                set: set1,
                mapping: combined.clone(),
            },
            Self {
                set: set2,
                mapping: combined,
            },
        ))
    }

    /// Union over the combined vocabulary.
    pub fn union(self, other: Self) -> Result<Self, HarmonizeError> {
        let (a, b) = self.harmonize(other)?;
        let mapping = a.mapping;
        let set = a.set.union_with(b.set).map_err(HarmonizeError::Combination)?;
        Ok(Self { set, mapping })
    }

    /// Intersection over the combined vocabulary.
    pub fn intersection(self, other: Self) -> Result<Self, HarmonizeError> {
        let (a, b) = self.harmonize(other)?;
        let mapping = a.mapping;
        let set = a
            .set
            .intersect_with(b.set)
            .map_err(HarmonizeError::Combination)?;
        Ok(Self { set, mapping })
    }
}

/// Position of each atom within the combined sorted vocabulary.
fn index_array<T: Ord>(mapping: &[T], combined: &[T]) -> Result<Vec<usize>, HarmonizeError> {
    mapping
        .iter()
        .map(|atom| {
            combined.binary_search(atom).map_err(|_| {
                HarmonizeError::InvalidInput("atom missing from combined mapping".into())
            })
        })
        .collect()
}
