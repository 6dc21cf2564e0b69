//! Analysis-cycle configuration engine.
//!
//! Binds named, typed configuration properties declared by a processing
//! unit, builds the input dataset list from a hierarchical configuration
//! document, regroups the datasets by sample type and validates their
//! luminosity bookkeeping before anything reaches the execution engine.

pub mod dataset;
pub mod diagnostics;
pub mod doc;
pub mod error;
pub mod loader;
pub mod props;

pub type Result<T> = anyhow::Result<T>;
