//! Affine expressions.
//!
//! An `AffExpr` is a linear(+constant) function of one space's dimensions
//! and parameters, yielding a single scalar. Every expression is tied to
//! exactly one domain space; combining expressions over different spaces
//! is a type error at construction time.

use serde::{Deserialize, Serialize};

use crate::error::AlgebraError;
use crate::space::Space;

/// A linear(+constant) scalar function over one domain space.
///
/// Coefficients are stored densely: one per dimension, one per parameter,
/// plus a constant term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffExpr {
    domain: Space,
    dim_coeffs: Vec<i64>,
    param_coeffs: Vec<i64>,
    constant: i64,
}

impl AffExpr {
    /// The zero expression over `domain`.
    pub fn zero(domain: Space) -> Self {
        let dim_coeffs = vec![0; domain.dim()];
        let param_coeffs = vec![0; domain.param_count()];
        Self {
            domain,
            dim_coeffs,
            param_coeffs,
            constant: 0,
        }
    }

    /// The expression projecting coordinate `index` of a point in `domain`.
    ///
    /// This is the building block of every embedding map: "coordinate
    /// `index` of a domain-space point".
    pub fn coordinate(domain: Space, index: usize) -> Result<Self, AlgebraError> {
        if index >= domain.dim() {
            return Err(AlgebraError::DimIndexOutOfBounds {
                index,
                dim: domain.dim(),
            });
        }
        let mut expr = Self::zero(domain);
        expr.dim_coeffs[index] = 1;
        Ok(expr)
    }

    /// An expression from explicit coefficient vectors.
    pub fn new(
        domain: Space,
        dim_coeffs: Vec<i64>,
        param_coeffs: Vec<i64>,
        constant: i64,
    ) -> Result<Self, AlgebraError> {
        if dim_coeffs.len() != domain.dim() {
            return Err(AlgebraError::PointArity {
                expected: domain.dim(),
                actual: dim_coeffs.len(),
            });
        }
        if param_coeffs.len() != domain.param_count() {
            return Err(AlgebraError::PointArity {
                expected: domain.param_count(),
                actual: param_coeffs.len(),
            });
        }
        Ok(Self {
            domain,
            dim_coeffs,
            param_coeffs,
            constant,
        })
    }

    pub fn domain(&self) -> &Space {
        &self.domain
    }

    pub fn dim_coeffs(&self) -> &[i64] {
        &self.dim_coeffs
    }

    pub fn param_coeffs(&self) -> &[i64] {
        &self.param_coeffs
    }

    pub fn constant_term(&self) -> i64 {
        self.constant
    }

    /// Whether every coefficient is zero (the expression is constant).
    pub fn is_constant(&self) -> bool {
        self.dim_coeffs.iter().all(|&c| c == 0) && self.param_coeffs.iter().all(|&c| c == 0)
    }

    /// Evaluate at a concrete point and parameter assignment.
    pub fn eval(&self, point: &[i64], params: &[i64]) -> Result<i64, AlgebraError> {
        if point.len() != self.domain.dim() {
            return Err(AlgebraError::PointArity {
                expected: self.domain.dim(),
                actual: point.len(),
            });
        }
        if params.len() != self.domain.param_count() {
            return Err(AlgebraError::PointArity {
                expected: self.domain.param_count(),
                actual: params.len(),
            });
        }
        let dims: i64 = self
            .dim_coeffs
            .iter()
            .zip(point)
            .map(|(c, x)| c * x)
            .sum();
        let pars: i64 = self
            .param_coeffs
            .iter()
            .zip(params)
            .map(|(c, x)| c * x)
            .sum();
        Ok(dims + pars + self.constant)
    }
}

impl std::fmt::Display for AffExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        let mut term = |f: &mut std::fmt::Formatter<'_>,
                        coeff: i64,
                        name: &str|
         -> std::fmt::Result {
            if coeff == 0 {
                return Ok(());
            }
            if first {
                first = false;
                if coeff == -1 {
                    write!(f, "-")?;
                } else if coeff != 1 {
                    write!(f, "{coeff}")?;
                }
            } else if coeff < 0 {
                write!(f, " - ")?;
                if coeff != -1 {
                    write!(f, "{}", -coeff)?;
                }
            } else {
                write!(f, " + ")?;
                if coeff != 1 {
                    write!(f, "{coeff}")?;
                }
            }
            write!(f, "{name}")
        };
        for (i, &c) in self.dim_coeffs.iter().enumerate() {
            term(f, c, &format!("d{i}"))?;
        }
        for (p, &c) in self.param_coeffs.iter().enumerate() {
            term(f, c, &self.domain.params()[p].0)?;
        }
        if first {
            write!(f, "{}", self.constant)
        } else if self.constant > 0 {
            write!(f, " + {}", self.constant)
        } else if self.constant < 0 {
            write!(f, " - {}", -self.constant)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::ParamId;

    #[test]
    fn coordinate_projection() {
        let space = Space::set_space(3);
        let e = AffExpr::coordinate(space, 1).unwrap();
        assert_eq!(e.eval(&[10, 20, 30], &[]).unwrap(), 20);
    }

    #[test]
    fn coordinate_out_of_bounds() {
        let space = Space::set_space(2);
        let err = AffExpr::coordinate(space, 2).unwrap_err();
        assert!(matches!(err, AlgebraError::DimIndexOutOfBounds { .. }));
    }

    #[test]
    fn eval_with_params() {
        let space = Space::with_params(2, vec![ParamId::new("n")]).unwrap();
        // d0 + 2 d1 - n + 5
        let e = AffExpr::new(space, vec![1, 2], vec![-1], 5).unwrap();
        assert_eq!(e.eval(&[1, 2], &[3]).unwrap(), 7);
    }

    #[test]
    fn eval_rejects_wrong_arity() {
        let space = Space::set_space(2);
        let e = AffExpr::zero(space);
        assert!(matches!(
            e.eval(&[1], &[]),
            Err(AlgebraError::PointArity { .. })
        ));
    }

    #[test]
    fn display_terms() {
        let space = Space::with_params(2, vec![ParamId::new("n")]).unwrap();
        let e = AffExpr::new(space.clone(), vec![1, -2], vec![1], -4).unwrap();
        assert_eq!(e.to_string(), "d0 - 2d1 + n - 4");
        assert_eq!(AffExpr::zero(space).to_string(), "0");
    }
}
