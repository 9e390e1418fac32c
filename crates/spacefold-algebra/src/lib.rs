//! # Spacefold Algebra
//!
//! The integer-set algebra engine underlying set harmonization: spaces,
//! affine expressions, multi-affine maps, and point sets as unions of
//! constraint conjunctions.
//!
//! This crate is the collaborator the harmonization core orchestrates.
//! It knows nothing about harmonization itself; it only supplies the
//! primitives (parameter alignment, coordinate projection, map assembly,
//! preimage, membership) and enforces their typing rules.
//!
//! ## Architecture
//!
//! ```text
//! Space                ← dimension count + ordered parameter tuple
//!     │
//! AffExpr              ← linear(+constant) scalar function over a Space
//!     │
//! MultiAff             ← expression tuple: total map between two Spaces
//!     │
//! Constraint / Set     ← DNF of linear constraints over one Space
//! ```
//!
//! ## Ownership
//!
//! Every value is a plain owned Rust value. Operations that the
//! harmonization pipeline treats as consuming (`align_params`,
//! `preimage`, `constrain`) take `self` by value; querying a set's space
//! yields an independent copy. Double-release and use-after-release are
//! compile errors, not conventions.

pub mod error;
pub mod expr;
pub mod map;
pub mod set;
pub mod space;

pub use error::AlgebraError;
pub use expr::AffExpr;
pub use map::MultiAff;
pub use set::{Constraint, ConstraintKind, Set};
pub use space::{ParamId, Space};
