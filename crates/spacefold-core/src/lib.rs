//! # Spacefold Core
//!
//! Set harmonization: given two integer point sets defined over
//! different, independently constructed coordinate spaces, produce two
//! new sets living as embedded subspaces of one common target space,
//! each preserving its original points re-expressed in target
//! coordinates.
//!
//! ## Pipeline
//!
//! ```text
//! (set₁, set₂, target space[, index arrays])
//!     │
//! align parameters          ← each set's parameter tuple ⇒ target's
//!     │
//! query aligned spaces      ← mapping is defined on the aligned space
//!     │
//! build embedding maps      ← positional or explicit CoordinateMapper
//!     │
//! preimage embedding        ← target points filtered through the map
//!     │
//! (embedded set₁, embedded set₂)
//! ```
//!
//! Failure at any stage is terminal for the run: every intermediate is
//! an owned value released by drop, and the caller receives a
//! [`HarmonizeError`] tagged with the failing stage.

pub mod align;
pub mod embed;
pub mod error;
pub mod harmonize;
pub mod labelled;
pub mod mapper;

pub use error::HarmonizeError;
pub use harmonize::{harmonize_mapped, harmonize_positional, harmonize_with};
pub use labelled::LabelledSet;
pub use mapper::{CoordinateMapper, DimMapping, Explicit, Positional};
