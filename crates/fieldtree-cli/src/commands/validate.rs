use std::path::PathBuf;

use fieldtree_lib::FieldTree;

use super::loader::{TreeInput, fail, load_json};

pub struct ValidateArgs {
    pub input: TreeInput,
    pub value_path: PathBuf,
}

pub fn run(args: ValidateArgs) {
    let tree = args.input.tree().unwrap_or_else(|e| fail(e));
    let raw = load_json(&args.value_path).unwrap_or_else(|e| fail(e));

    let codes = validate(&tree, &raw);
    if codes.is_empty() {
        println!("ok");
        return;
    }
    for code in &codes {
        println!("{code}");
    }
    std::process::exit(1);
}

/// Error codes of `raw` after it is transformed against the root.
pub fn validate(tree: &FieldTree, raw: &serde_json::Value) -> Vec<String> {
    let value = tree.transform_raw_value(tree.root(), raw);
    tracing::debug!(?value, "transformed raw value");
    tree.is_valid_value(tree.root(), &value)
}
