//! Test utilities.

use fieldtree_core::Model;

use crate::infer::{InferOptions, Overrides, Registry, infer, infer_with_overrides};
use crate::printer::FieldPrinter;
use crate::tree::FieldTree;

pub fn model(json: &str) -> Model {
    Model::from_json(json).expect("test model must parse")
}

/// Infer and initialize with the builtin registry.
pub fn tree(json: &str) -> FieldTree {
    infer(&model(json), &Registry::default(), &InferOptions::default()).initialize()
}

pub fn tree_with_overrides(json: &str, overrides: &str) -> FieldTree {
    let overrides = Overrides::from_json(overrides).expect("test overrides must parse");
    infer_with_overrides(
        &model(json),
        &Registry::default(),
        &InferOptions::default(),
        &overrides,
    )
    .initialize()
}

pub fn dump(tree: &FieldTree) -> String {
    FieldPrinter::new(tree).dump()
}
