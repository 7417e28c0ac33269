//! Errors reported by cursor misuse and structural self-checks.

use thiserror::Error;

/// Errors surfaced by the ordered-set contract.
///
/// Duplicate inserts and removals of absent values are *not* errors; both
/// are reported through the boolean return of [`insert`] and [`remove`].
///
/// [`insert`]: crate::OrderedSet::insert
/// [`remove`]: crate::OrderedSet::remove
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A cursor was dereferenced at the end position, advanced past the end,
    /// or moved before the first element.
    #[error("cursor out of range")]
    OutOfRange,
    /// A structural self-check found a broken invariant.  Never produced by
    /// ordinary operations, only by the explicit consistency checks exposed
    /// for testing.
    #[error("structural invariant violated: {0}")]
    InvariantViolation(&'static str),
    /// The variant does not implement the requested optional capability.
    #[error("operation is not supported by this set implementation")]
    Unsupported,
}
