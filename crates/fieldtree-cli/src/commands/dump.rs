use fieldtree_lib::FieldPrinter;

use super::loader::{TreeInput, fail};

pub struct DumpArgs {
    pub input: TreeInput,
    pub paths: bool,
    pub ids: bool,
    pub labels: bool,
}

pub fn run(args: DumpArgs) {
    let tree = args.input.tree().unwrap_or_else(|e| fail(e));
    let printer = FieldPrinter::new(&tree)
        .with_labels(args.labels)
        .with_ids(args.ids)
        .with_paths(args.paths);
    print!("{}", printer.dump());
}
