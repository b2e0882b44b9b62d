use fieldtree_lib::{FieldTree, FilterConfiguration, SortConfiguration};
use serde::Serialize;

use super::loader::{TreeInput, fail};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Descriptors {
    #[default]
    Both,
    Sorts,
    Filters,
}

pub struct ConfigArgs {
    pub input: TreeInput,
    pub descriptors: Descriptors,
    pub compact: bool,
}

#[derive(Serialize)]
struct Output<'t> {
    #[serde(skip_serializing_if = "Option::is_none")]
    sorts: Option<Vec<SortConfiguration>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filters: Option<&'t [FilterConfiguration]>,
}

pub fn run(args: ConfigArgs) {
    let tree = args.input.tree().unwrap_or_else(|e| fail(e));
    println!("{}", render(&tree, args.descriptors, args.compact));
}

pub fn render(tree: &FieldTree, descriptors: Descriptors, compact: bool) -> String {
    let output = Output {
        sorts: (descriptors != Descriptors::Filters).then(|| tree.sort_configurations()),
        filters: (descriptors != Descriptors::Sorts).then(|| tree.filter_configurations()),
    };
    let rendered = if compact {
        serde_json::to_string(&output)
    } else {
        serde_json::to_string_pretty(&output)
    };
    rendered.unwrap_or_else(|e| fail(e))
}
