use fieldtree_lib::{FieldTree, serialize};

use super::check::render_errors;
use super::loader::{TreeInput, fail};

pub struct InferArgs {
    pub input: TreeInput,
    pub compact: bool,
}

pub fn run(args: InferArgs) {
    let tree = args.input.tree().unwrap_or_else(|e| fail(e));

    // Error fields cannot be persisted.
    if tree.has_errors() {
        eprint!("{}", render_errors(&tree));
        std::process::exit(1);
    }

    println!("{}", render(&tree, args.compact));
}

pub fn render(tree: &FieldTree, compact: bool) -> String {
    let json = serialize(tree).to_json();
    let rendered = if compact {
        serde_json::to_string(&json)
    } else {
        serde_json::to_string_pretty(&json)
    };
    rendered.unwrap_or_else(|e| fail(e))
}
