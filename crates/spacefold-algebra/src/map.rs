//! Multi-affine maps.
//!
//! A `MultiAff` is an ordered tuple of affine expressions forming a total
//! function from one domain space to one range space: expression `j`
//! computes range coordinate `j` from a domain point. The tuple's length
//! must equal the range's dimension count, and every expression must be
//! defined over the map's domain; both are checked at construction.

use serde::{Deserialize, Serialize};

use crate::error::AlgebraError;
use crate::expr::AffExpr;
use crate::space::Space;

/// A total affine function between two spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiAff {
    domain: Space,
    range: Space,
    exprs: Vec<AffExpr>,
}

impl MultiAff {
    /// Assemble a map from its expression tuple.
    ///
    /// Consumes both spaces and the expression list.
    pub fn from_exprs(
        domain: Space,
        range: Space,
        exprs: Vec<AffExpr>,
    ) -> Result<Self, AlgebraError> {
        if exprs.len() != range.dim() {
            return Err(AlgebraError::TupleArity {
                expected: range.dim(),
                actual: exprs.len(),
            });
        }
        for e in &exprs {
            if e.domain() != &domain {
                return Err(AlgebraError::SpaceMismatch(format!(
                    "expression over {} used in map with domain {}",
                    e.domain(),
                    domain
                )));
            }
        }
        Ok(Self {
            domain,
            range,
            exprs,
        })
    }

    pub fn domain(&self) -> &Space {
        &self.domain
    }

    pub fn range(&self) -> &Space {
        &self.range
    }

    pub fn exprs(&self) -> &[AffExpr] {
        &self.exprs
    }

    /// Apply the map to a concrete domain point.
    pub fn apply(&self, point: &[i64], params: &[i64]) -> Result<Vec<i64>, AlgebraError> {
        self.exprs.iter().map(|e| e.eval(point, params)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_checked_against_range() {
        let domain = Space::set_space(3);
        let range = Space::set_space(2);
        let exprs = vec![AffExpr::coordinate(domain.clone(), 0).unwrap()];
        let err = MultiAff::from_exprs(domain, range, exprs).unwrap_err();
        assert!(matches!(err, AlgebraError::TupleArity { expected: 2, actual: 1 }));
    }

    #[test]
    fn expr_domain_checked_against_map_domain() {
        let domain = Space::set_space(3);
        let range = Space::set_space(1);
        let stray = Space::set_space(4);
        let exprs = vec![AffExpr::coordinate(stray, 0).unwrap()];
        let err = MultiAff::from_exprs(domain, range, exprs).unwrap_err();
        assert!(matches!(err, AlgebraError::SpaceMismatch(_)));
    }

    #[test]
    fn apply_projects_coordinates() {
        let domain = Space::set_space(3);
        let range = Space::set_space(2);
        let exprs = vec![
            AffExpr::coordinate(domain.clone(), 2).unwrap(),
            AffExpr::coordinate(domain.clone(), 0).unwrap(),
        ];
        let ma = MultiAff::from_exprs(domain, range, exprs).unwrap();
        assert_eq!(ma.apply(&[7, 8, 9], &[]).unwrap(), vec![9, 7]);
    }
}
