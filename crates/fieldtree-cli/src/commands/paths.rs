use std::convert::Infallible;

use fieldtree_lib::{FieldTree, KeyPath};

use super::loader::{TreeInput, fail};

pub struct PathsArgs {
    pub input: TreeInput,
    pub key_path: String,
}

pub fn run(args: PathsArgs) {
    let tree = args.input.tree().unwrap_or_else(|e| fail(e));
    match render(&tree, &args.key_path) {
        Some(out) => print!("{out}"),
        None => fail(format_args!("no field at key path `{}`", args.key_path)),
    }
}

/// The value path, then the modifier stack and base kind of the target.
pub fn render(tree: &FieldTree, key_path: &str) -> Option<String> {
    let key_path: KeyPath = key_path.parse().unwrap_or_else(|never: Infallible| match never {});
    let value_path = tree.value_path_for_key_path(&key_path)?;
    let field = tree.traverse(&key_path)?;
    let (modifiers, base) = tree.modifier_stack(field);

    let mut out = format!("{value_path}\n");
    if !modifiers.is_empty() {
        let stack = modifiers
            .iter()
            .map(|m| m.tag())
            .collect::<Vec<_>>()
            .join(" > ");
        out.push_str(&format!("modifiers: {stack}\n"));
    }
    out.push_str(&format!("base: {}\n", tree.field(tree.resolve(base)).kind.tag()));
    Some(out)
}
