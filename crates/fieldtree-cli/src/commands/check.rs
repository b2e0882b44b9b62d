use std::fmt::Write;
use std::path::PathBuf;

use fieldtree_lib::serialize::unserialize_with_options;
use fieldtree_lib::{FieldTree, Registry, SerializedField};

use super::loader::{LoadError, TreeInput, fail, read_input};

pub struct CheckArgs {
    pub input: TreeInput,
    pub tree: Option<PathBuf>,
}

pub fn run(args: CheckArgs) {
    let tree = load(&args).unwrap_or_else(|e| fail(e));

    if tree.has_errors() {
        eprint!("{}", render_errors(&tree));
        std::process::exit(1);
    }

    // Silent on success
}

fn load(args: &CheckArgs) -> Result<FieldTree, LoadError> {
    let Some(path) = &args.tree else {
        return args.input.tree();
    };
    let model = args.input.model()?;
    let payload = SerializedField::from_json(&read_input(path)?)?;
    let options = args.input.options();
    Ok(unserialize_with_options(&payload, &model, &Registry::default(), &options).initialize())
}

/// One `error:` line per error field.
pub fn render_errors(tree: &FieldTree) -> String {
    let mut out = String::new();
    for (id, message) in tree.errors() {
        let _ = writeln!(out, "error: {id}: {message}");
    }
    out
}
