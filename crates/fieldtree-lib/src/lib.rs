//! Schema-driven field trees.
//!
//! Infers an editable field tree from a backend [`Model`], binds recursive
//! definitions into a finite tree, addresses any position by key path or
//! value path, persists user overrides, and derives sort and filter
//! descriptors.
//!
//! # Example
//!
//! ```
//! use fieldtree_lib::{InferOptions, Model, Registry, infer};
//!
//! let model = Model::from_json(r#"{"struct": {"name": {"string": null}}}"#).unwrap();
//! let tree = infer(&model, &Registry::default(), &InferOptions::default()).initialize();
//!
//! let path = tree.value_path_for_key_path(&"name".parse().unwrap()).unwrap();
//! assert_eq!(path.to_string(), "$.name");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod field;
pub mod infer;
pub mod path;
pub mod printer;
pub mod serialize;
pub mod tree;

mod invariants;

#[cfg(test)]
mod scenario_tests;
#[cfg(test)]
mod test_utils;

pub use config::{FilterConfiguration, FilterType, SortConfiguration, SortType};
pub use field::{Expression, Field, FieldArena, FieldId, FieldKind, Modifier, Value};
pub use fieldtree_core::{Model, ModelError};
pub use infer::{BuildCx, InferOptions, Overrides, Registry, infer, infer_with_overrides};
pub use path::{KeyPath, KeySegment, ValuePath, ValueSegment};
pub use printer::FieldPrinter;
pub use serialize::{SerializedField, serialize, unserialize};
pub use tree::{FieldTree, HookContext, HookError, RawTree};

/// Errors returned by value conversion and JSON loading.
///
/// Building a tree never fails: positions that cannot be built become error
/// fields instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("value at `{path}` does not match a `{expected}` field")]
    ValueShape {
        path: ValuePath,
        expected: &'static str,
    },

    #[error("union at `{path}` has no member `{key}`")]
    UnknownUnionKey { path: ValuePath, key: String },

    #[error("field at `{path}` could not be built: {message}")]
    ErrorField { path: ValuePath, message: String },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, Error>;
