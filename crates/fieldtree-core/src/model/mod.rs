//! Abstract schema models.
//!
//! This module provides the [`Model`] tree consumed by field inference, with
//! support for JSON deserialization and compact binary serialization.

mod binary;
mod json;
mod types;

#[cfg(test)]
mod json_tests;
#[cfg(test)]
mod types_tests;

pub use json::ModelError;
pub use types::{Model, ModelTag};
