//! Fatal configuration errors.
//!
//! Non-fatal conditions (unknown property names, malformed dataset entries,
//! numeric parse fallbacks) are accumulated as [`crate::diagnostics`]
//! entries instead; only conditions that must stop configuration loading
//! surface through this type.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A dataset ended up with neither an explicit luminosity nor any
    /// per-file luminosity. A zero-weight dataset cannot be combined with
    /// anything, so the run must not proceed.
    #[error("total luminosity for input data of type \"{data_type}\" is zero")]
    ZeroLuminosity { data_type: String },

    /// Regrouping produced a collection of a different size than it was
    /// given. Can only happen on an implementation bug, never on bad input.
    #[error("inconsistent input data lists after regrouping: {before} records before, {after} after")]
    GroupingInconsistency { before: usize, after: usize },
}
