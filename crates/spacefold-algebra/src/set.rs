//! Integer point sets.
//!
//! A `Set` is a collection of integer points satisfying a system of
//! linear constraints over exactly one space, stored in disjunctive
//! normal form: a big OR over big ANDs of constraints. This mirrors the
//! classic basic-set/union structure of polyhedral libraries.
//!
//! The operations here are the ones the harmonization core orchestrates:
//! parameter alignment, preimage under a multi-affine map, point
//! membership, and DNF union/intersection. Satisfiability, complement,
//! and general equivalence are deliberately outside this crate.

use serde::{Deserialize, Serialize};

use crate::error::AlgebraError;
use crate::expr::AffExpr;
use crate::map::MultiAff;
use crate::space::Space;

/// What kind of relation a constraint imposes on its expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// `expr >= 0`
    NonNegative,
    /// `expr == 0`
    EqualToZero,
}

/// A single linear constraint: an affine expression compared to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    expr: AffExpr,
    kind: ConstraintKind,
}

impl Constraint {
    /// The constraint `expr >= 0`.
    pub fn non_negative(expr: AffExpr) -> Self {
        Self {
            expr,
            kind: ConstraintKind::NonNegative,
        }
    }

    /// The constraint `expr == 0`.
    pub fn equal_zero(expr: AffExpr) -> Self {
        Self {
            expr,
            kind: ConstraintKind::EqualToZero,
        }
    }

    pub fn expr(&self) -> &AffExpr {
        &self.expr
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Constant constraints that hold everywhere, e.g. `3 >= 0`.
    pub fn is_tautology(&self) -> bool {
        self.expr.is_constant()
            && match self.kind {
                ConstraintKind::NonNegative => self.expr.constant_term() >= 0,
                ConstraintKind::EqualToZero => self.expr.constant_term() == 0,
            }
    }

    /// Constant constraints that hold nowhere, e.g. `-1 >= 0`.
    pub fn is_contradiction(&self) -> bool {
        self.expr.is_constant()
            && match self.kind {
                ConstraintKind::NonNegative => self.expr.constant_term() < 0,
                ConstraintKind::EqualToZero => self.expr.constant_term() != 0,
            }
    }

    /// Whether the constraint holds at a concrete point.
    pub fn holds_at(&self, point: &[i64], params: &[i64]) -> Result<bool, AlgebraError> {
        let value = self.expr.eval(point, params)?;
        Ok(match self.kind {
            ConstraintKind::NonNegative => value >= 0,
            ConstraintKind::EqualToZero => value == 0,
        })
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ConstraintKind::NonNegative => write!(f, "{} >= 0", self.expr),
            ConstraintKind::EqualToZero => write!(f, "{} = 0", self.expr),
        }
    }
}

/// An integer point set over one space, in disjunctive normal form.
///
/// No disjuncts is the empty set; a single empty conjunction is the
/// universe. Querying the space yields an independent copy; consuming
/// operations take the set by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Set {
    space: Space,
    disjuncts: Vec<Vec<Constraint>>,
}

impl Set {
    /// The set of all integer points in `space`.
    pub fn universe(space: Space) -> Self {
        Self {
            space,
            disjuncts: vec![Vec::new()],
        }
    }

    /// The empty set over `space`.
    pub fn empty(space: Space) -> Self {
        Self {
            space,
            disjuncts: Vec::new(),
        }
    }

    /// Build a set from explicit disjuncts.
    ///
    /// Every constraint must be defined over `space`. Tautologies are
    /// pruned; disjuncts containing a constant contradiction are dropped.
    pub fn from_disjuncts(
        space: Space,
        disjuncts: Vec<Vec<Constraint>>,
    ) -> Result<Self, AlgebraError> {
        let mut kept = Vec::with_capacity(disjuncts.len());
        for conj in disjuncts {
            for c in &conj {
                if c.expr().domain() != &space {
                    return Err(AlgebraError::SpaceMismatch(format!(
                        "constraint over {} added to set over {}",
                        c.expr().domain(),
                        space
                    )));
                }
            }
            if conj.iter().any(Constraint::is_contradiction) {
                continue;
            }
            let conj: Vec<Constraint> =
                conj.into_iter().filter(|c| !c.is_tautology()).collect();
            kept.push(conj);
        }
        Ok(Self {
            space,
            disjuncts: kept,
        })
    }

    /// The space this set is defined over, as an independent copy.
    pub fn space(&self) -> Space {
        self.space.clone()
    }

    pub fn disjuncts(&self) -> &[Vec<Constraint>] {
        &self.disjuncts
    }

    /// Add a constraint as a conjunct.
    ///
    /// Because the set is in DNF, the constraint is added to every
    /// disjunct. Consumes the set.
    pub fn constrain(self, constraint: Constraint) -> Result<Self, AlgebraError> {
        if constraint.expr().domain() != &self.space {
            return Err(AlgebraError::SpaceMismatch(format!(
                "constraint over {} added to set over {}",
                constraint.expr().domain(),
                self.space
            )));
        }
        if constraint.is_tautology() {
            return Ok(self);
        }
        let mut disjuncts = self.disjuncts;
        if constraint.is_contradiction() {
            disjuncts.clear();
        } else {
            for conj in &mut disjuncts {
                conj.push(constraint.clone());
            }
        }
        Ok(Self {
            space: self.space,
            disjuncts,
        })
    }

    /// Union with another set over the same space. Consumes both.
    pub fn union_with(self, other: Set) -> Result<Self, AlgebraError> {
        if self.space != other.space {
            return Err(AlgebraError::SpaceMismatch(format!(
                "union of sets over {} and {}",
                self.space, other.space
            )));
        }
        let mut disjuncts = self.disjuncts;
        disjuncts.extend(other.disjuncts);
        Ok(Self {
            space: self.space,
            disjuncts,
        })
    }

    /// Intersection with another set over the same space. Consumes both.
    pub fn intersect_with(self, other: Set) -> Result<Self, AlgebraError> {
        if self.space != other.space {
            return Err(AlgebraError::SpaceMismatch(format!(
                "intersection of sets over {} and {}",
                self.space, other.space
            )));
        }
        let mut disjuncts = Vec::with_capacity(self.disjuncts.len() * other.disjuncts.len());
        for a in &self.disjuncts {
            for b in &other.disjuncts {
                let mut conj = a.clone();
                conj.extend(b.iter().cloned());
                disjuncts.push(conj);
            }
        }
        Ok(Self {
            space: self.space,
            disjuncts,
        })
    }

    /// Re-express the set so its parameter tuple matches `target`'s.
    ///
    /// The resulting tuple is the target's parameters followed by any of
    /// this set's parameters not present in the target, in their original
    /// relative order. Constraint coefficients are remapped accordingly.
    /// Consumes the set; borrows the target space.
    pub fn align_params(self, target: &Space) -> Result<Set, AlgebraError> {
        let mut merged: Vec<_> = target.params().to_vec();
        for p in self.space.params() {
            if !merged.contains(p) {
                merged.push(p.clone());
            }
        }
        let new_space = Space::with_params(self.space.dim(), merged)?;

        let remap: Vec<usize> = self
            .space
            .params()
            .iter()
            .map(|p| {
                new_space.param_index(p).ok_or_else(|| {
                    AlgebraError::SpaceMismatch(format!("parameter {p} lost during alignment"))
                })
            })
            .collect::<Result<_, _>>()?;

        let mut disjuncts = Vec::with_capacity(self.disjuncts.len());
        for conj in self.disjuncts {
            let mut new_conj = Vec::with_capacity(conj.len());
            for c in conj {
                let expr = c.expr();
                let mut param_coeffs = vec![0; new_space.param_count()];
                for (old, &coeff) in expr.param_coeffs().iter().enumerate() {
                    param_coeffs[remap[old]] += coeff;
                }
                let expr = AffExpr::new(
                    new_space.clone(),
                    expr.dim_coeffs().to_vec(),
                    param_coeffs,
                    expr.constant_term(),
                )?;
                new_conj.push(Constraint {
                    expr,
                    kind: c.kind(),
                });
            }
            disjuncts.push(new_conj);
        }

        Ok(Set {
            space: new_space,
            disjuncts,
        })
    }

    /// The preimage of this set under `map`.
    ///
    /// Produces the set of points in the map's domain whose image under
    /// the map satisfies this set's constraints: each range coordinate in
    /// every constraint is substituted with the map's corresponding
    /// expression. Consumes both the set and the map.
    pub fn preimage(self, map: MultiAff) -> Result<Set, AlgebraError> {
        if map.range() != &self.space {
            return Err(AlgebraError::SpaceMismatch(format!(
                "preimage of set over {} under map with range {}",
                self.space,
                map.range()
            )));
        }
        if !map.domain().params_aligned_with(&self.space) {
            return Err(AlgebraError::SpaceMismatch(format!(
                "map domain {} not parameter-aligned with set space {}",
                map.domain(),
                self.space
            )));
        }
        let domain = map.domain().clone();

        let mut disjuncts = Vec::with_capacity(self.disjuncts.len());
        for conj in self.disjuncts {
            let mut new_conj = Vec::with_capacity(conj.len());
            for c in conj {
                let expr = c.expr();
                let mut dim_coeffs = vec![0; domain.dim()];
                let mut param_coeffs = expr.param_coeffs().to_vec();
                let mut constant = expr.constant_term();
                for (j, &coeff) in expr.dim_coeffs().iter().enumerate() {
                    if coeff == 0 {
                        continue;
                    }
                    let e = &map.exprs()[j];
                    for (k, &a) in e.dim_coeffs().iter().enumerate() {
                        dim_coeffs[k] += coeff * a;
                    }
                    for (p, &a) in e.param_coeffs().iter().enumerate() {
                        param_coeffs[p] += coeff * a;
                    }
                    constant += coeff * e.constant_term();
                }
                let expr = AffExpr::new(domain.clone(), dim_coeffs, param_coeffs, constant)?;
                new_conj.push(Constraint {
                    expr,
                    kind: c.kind(),
                });
            }
            disjuncts.push(new_conj);
        }

        Ok(Set {
            space: domain,
            disjuncts,
        })
    }

    /// Whether a concrete point (with a parameter assignment) is in the set.
    pub fn contains(&self, point: &[i64], params: &[i64]) -> Result<bool, AlgebraError> {
        if point.len() != self.space.dim() {
            return Err(AlgebraError::PointArity {
                expected: self.space.dim(),
                actual: point.len(),
            });
        }
        for conj in &self.disjuncts {
            let mut all = true;
            for c in conj {
                if !c.holds_at(point, params)? {
                    all = false;
                    break;
                }
            }
            if all {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl std::fmt::Display for Set {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.space.params().is_empty() {
            write!(f, "[")?;
            for (i, p) in self.space.params().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{p}")?;
            }
            write!(f, "] -> ")?;
        }
        write!(f, "{{ ")?;
        for (d, conj) in self.disjuncts.iter().enumerate() {
            if d > 0 {
                write!(f, " or ")?;
            }
            write!(f, "[")?;
            for i in 0..self.space.dim() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "d{i}")?;
            }
            write!(f, "]")?;
            for (i, c) in conj.iter().enumerate() {
                if i == 0 {
                    write!(f, " : ")?;
                } else {
                    write!(f, " and ")?;
                }
                write!(f, "{c}")?;
            }
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::ParamId;

    fn eq_constraint(space: &Space, dim_coeffs: Vec<i64>, constant: i64) -> Constraint {
        let params = vec![0; space.param_count()];
        Constraint::equal_zero(AffExpr::new(space.clone(), dim_coeffs, params, constant).unwrap())
    }

    #[test]
    fn universe_contains_everything() {
        let set = Set::universe(Space::set_space(2));
        assert!(set.contains(&[0, 0], &[]).unwrap());
        assert!(set.contains(&[-5, 99], &[]).unwrap());
    }

    #[test]
    fn empty_contains_nothing() {
        let set = Set::empty(Space::set_space(1));
        assert!(!set.contains(&[0], &[]).unwrap());
    }

    #[test]
    fn constrain_narrows_membership() {
        let space = Space::set_space(2);
        // d0 - 1 = 0
        let set = Set::universe(space.clone())
            .constrain(eq_constraint(&space, vec![1, 0], -1))
            .unwrap();
        assert!(set.contains(&[1, 7], &[]).unwrap());
        assert!(!set.contains(&[2, 7], &[]).unwrap());
    }

    #[test]
    fn constrain_rejects_foreign_space() {
        let set = Set::universe(Space::set_space(2));
        let other = Space::set_space(3);
        let err = set
            .constrain(eq_constraint(&other, vec![1, 0, 0], 0))
            .unwrap_err();
        assert!(matches!(err, AlgebraError::SpaceMismatch(_)));
    }

    #[test]
    fn tautologies_pruned_and_contradictions_collapse() {
        let space = Space::set_space(1);
        let taut = Constraint::non_negative(AffExpr::new(space.clone(), vec![0], vec![], 3).unwrap());
        let set = Set::universe(space.clone()).constrain(taut).unwrap();
        assert!(set.disjuncts()[0].is_empty());

        let contra = Constraint::non_negative(AffExpr::new(space.clone(), vec![0], vec![], -1).unwrap());
        let set = Set::universe(space).constrain(contra).unwrap();
        assert!(set.disjuncts().is_empty());
    }

    #[test]
    fn from_disjuncts_builds_a_union() {
        let space = Space::set_space(1);
        let set = Set::from_disjuncts(
            space.clone(),
            vec![
                vec![eq_constraint(&space, vec![1], 0)],
                vec![eq_constraint(&space, vec![1], -2)],
            ],
        )
        .unwrap();
        assert!(set.contains(&[0], &[]).unwrap());
        assert!(set.contains(&[2], &[]).unwrap());
        assert!(!set.contains(&[1], &[]).unwrap());
    }

    #[test]
    fn union_and_intersection_dnf() {
        let space = Space::set_space(1);
        let a = Set::universe(space.clone())
            .constrain(eq_constraint(&space, vec![1], 0))
            .unwrap(); // d0 = 0
        let b = Set::universe(space.clone())
            .constrain(eq_constraint(&space, vec![1], -1))
            .unwrap(); // d0 = 1

        let u = a.clone().union_with(b.clone()).unwrap();
        assert!(u.contains(&[0], &[]).unwrap());
        assert!(u.contains(&[1], &[]).unwrap());
        assert!(!u.contains(&[2], &[]).unwrap());

        let i = a.intersect_with(b).unwrap();
        assert!(!i.contains(&[0], &[]).unwrap());
        assert!(!i.contains(&[1], &[]).unwrap());
    }

    #[test]
    fn align_params_reorders_and_extends() {
        let n = ParamId::new("n");
        let m = ParamId::new("m");
        let space = Space::with_params(1, vec![n.clone()]).unwrap();
        // d0 - n = 0
        let set = Set::universe(space.clone())
            .constrain(Constraint::equal_zero(
                AffExpr::new(space, vec![1], vec![-1], 0).unwrap(),
            ))
            .unwrap();

        let target = Space::with_params(4, vec![m.clone(), n.clone()]).unwrap();
        let aligned = set.align_params(&target).unwrap();

        assert_eq!(aligned.space().params(), &[m, n]);
        // membership must be preserved: point d0 = 5 with n = 5 (params are now [m, n])
        assert!(aligned.contains(&[5], &[0, 5]).unwrap());
        assert!(!aligned.contains(&[5], &[0, 6]).unwrap());
    }

    #[test]
    fn align_params_keeps_unknown_params_after_targets() {
        let n = ParamId::new("n");
        let k = ParamId::new("k");
        let space = Space::with_params(1, vec![k.clone()]).unwrap();
        let set = Set::universe(space);
        let target = Space::with_params(1, vec![n.clone()]).unwrap();
        let aligned = set.align_params(&target).unwrap();
        assert_eq!(aligned.space().params(), &[n, k]);
    }

    #[test]
    fn preimage_substitutes_coordinates() {
        // Set over 1-d space: d0 - 1 = 0. Map from 3-d space projecting d2.
        let range = Space::set_space(1);
        let set = Set::universe(range.clone())
            .constrain(eq_constraint(&range, vec![1], -1))
            .unwrap();

        let domain = Space::set_space(3);
        let ma = MultiAff::from_exprs(
            domain.clone(),
            range,
            vec![AffExpr::coordinate(domain, 2).unwrap()],
        )
        .unwrap();

        let pre = set.preimage(ma).unwrap();
        assert_eq!(pre.space().dim(), 3);
        assert!(pre.contains(&[9, 9, 1], &[]).unwrap());
        assert!(!pre.contains(&[1, 1, 2], &[]).unwrap());
    }

    #[test]
    fn preimage_rejects_mismatched_range() {
        let set = Set::universe(Space::set_space(2));
        let domain = Space::set_space(3);
        let range = Space::set_space(1);
        let ma = MultiAff::from_exprs(
            domain.clone(),
            range,
            vec![AffExpr::coordinate(domain, 0).unwrap()],
        )
        .unwrap();
        assert!(matches!(
            set.preimage(ma),
            Err(AlgebraError::SpaceMismatch(_))
        ));
    }

    #[test]
    fn display_notation() {
        let space = Space::set_space(2);
        let set = Set::universe(space.clone())
            .constrain(eq_constraint(&space, vec![1, 0], -1))
            .unwrap();
        assert_eq!(set.to_string(), "{ [d0, d1] : d0 - 1 = 0 }");
    }

    #[test]
    fn serde_round_trip() {
        let space = Space::set_space(2);
        let set = Set::universe(space.clone())
            .constrain(eq_constraint(&space, vec![1, 1], -2))
            .unwrap();
        let json = serde_json::to_string(&set).unwrap();
        let back: Set = serde_json::from_str(&json).unwrap();
        assert_eq!(set, back);
    }
}
