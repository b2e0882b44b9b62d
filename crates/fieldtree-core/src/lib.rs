#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for fieldtree schema models.
//!
//! A [`Model`] is the abstract, backend-provided description of a data
//! schema. It is consumed by `fieldtree-lib`, which infers an editable field
//! tree from it; nothing in this crate depends on fields.

pub mod model;
pub mod utils;

#[cfg(test)]
mod utils_tests;

pub use model::{Model, ModelError, ModelTag};
