//! Error types for harmonization.

use spacefold_algebra::AlgebraError;

/// Errors arising from a harmonization run.
///
/// Harmonization is all-or-nothing: the first failure at any pipeline
/// stage short-circuits the remaining stages and surfaces here, tagged
/// with the stage it came from. There is no partial success and no
/// failure is swallowed into an empty set.
#[derive(Debug, thiserror::Error)]
pub enum HarmonizeError {
    /// A required input is malformed at call entry: an out-of-range or
    /// duplicated mapping index, a mapping whose length does not match
    /// its set's dimension count, or an original space wider than the
    /// target.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Parameter reconciliation between a set and the target space
    /// cannot be performed.
    #[error("parameter alignment failed: {0}")]
    Alignment(#[source] AlgebraError),

    /// The algebra could not report a space or dimension count.
    #[error("space query failed: {0}")]
    SpaceQuery(#[source] AlgebraError),

    /// Assembly of an embedding map's expression tuple failed.
    #[error("map construction failed: {0}")]
    MapConstruction(#[source] AlgebraError),

    /// The algebra could not compute a preimage for a set/map pair.
    #[error("embedding failed: {0}")]
    Embedding(#[source] AlgebraError),

    /// Combining two already-harmonized sets failed.
    #[error("set combination failed: {0}")]
    Combination(#[source] AlgebraError),
}
