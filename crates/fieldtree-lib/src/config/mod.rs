//! Sort and filter descriptors derived from a field tree.
//!
//! One walk over owned edges. Leaves emit their own descriptors at the empty
//! path; composites re-emit their children's descriptors with the child's
//! value segment prepended and their own label prefixed. Recurse fields
//! contribute nothing, so the walk is finite.


use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value as Json, json};

use crate::field::{FieldId, FieldKind};
use crate::path::{ValuePath, ValueSegment};
use crate::tree::FieldTree;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SortConfiguration {
    pub label: String,
    #[serde(rename = "type")]
    pub sort_type: SortType,
    pub path: ValuePath,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortType {
    CreatedAt,
    UpdatedAt,
    String,
    Int,
    Float,
    DateTime,
    Bool,
    Enum,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfiguration {
    /// `<path>:<type>`, unique within a tree.
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    pub path: ValuePath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_options: Option<Json>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterType {
    StringEquals,
    StringStartsWith,
    StringEndsWith,
    StringContains,
    StringRegexp,
    IntEquals,
    IntMin,
    IntMax,
    FloatEquals,
    FloatMin,
    FloatMax,
    DateTimeEquals,
    DateTimeMin,
    DateTimeMax,
    BoolEquals,
    EnumEquals,
    RefEquals,
    UnionKeyEquals,
    OptionalIsPresent,
    ListLengthEquals,
    ListLengthMin,
    ListLengthMax,
    MapKeyEquals,
}

impl FilterType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StringEquals => "StringEquals",
            Self::StringStartsWith => "StringStartsWith",
            Self::StringEndsWith => "StringEndsWith",
            Self::StringContains => "StringContains",
            Self::StringRegexp => "StringRegexp",
            Self::IntEquals => "IntEquals",
            Self::IntMin => "IntMin",
            Self::IntMax => "IntMax",
            Self::FloatEquals => "FloatEquals",
            Self::FloatMin => "FloatMin",
            Self::FloatMax => "FloatMax",
            Self::DateTimeEquals => "DateTimeEquals",
            Self::DateTimeMin => "DateTimeMin",
            Self::DateTimeMax => "DateTimeMax",
            Self::BoolEquals => "BoolEquals",
            Self::EnumEquals => "EnumEquals",
            Self::RefEquals => "RefEquals",
            Self::UnionKeyEquals => "UnionKeyEquals",
            Self::OptionalIsPresent => "OptionalIsPresent",
            Self::ListLengthEquals => "ListLengthEquals",
            Self::ListLengthMin => "ListLengthMin",
            Self::ListLengthMax => "ListLengthMax",
            Self::MapKeyEquals => "MapKeyEquals",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const TEXT_FILTERS: &[FilterType] = &[
    FilterType::StringEquals,
    FilterType::StringStartsWith,
    FilterType::StringEndsWith,
    FilterType::StringContains,
    FilterType::StringRegexp,
];
const INT_FILTERS: &[FilterType] = &[FilterType::IntEquals, FilterType::IntMin, FilterType::IntMax];
const FLOAT_FILTERS: &[FilterType] = &[
    FilterType::FloatEquals,
    FilterType::FloatMin,
    FilterType::FloatMax,
];
const DATE_TIME_FILTERS: &[FilterType] = &[
    FilterType::DateTimeEquals,
    FilterType::DateTimeMin,
    FilterType::DateTimeMax,
];
const LIST_FILTERS: &[FilterType] = &[
    FilterType::ListLengthEquals,
    FilterType::ListLengthMin,
    FilterType::ListLengthMax,
];

/// Record timestamp sorts, placed before any tree-derived sort.
pub fn meta_sorts() -> Vec<SortConfiguration> {
    vec![
        SortConfiguration {
            label: "Created at".into(),
            sort_type: SortType::CreatedAt,
            path: ValuePath::root(),
        },
        SortConfiguration {
            label: "Updated at".into(),
            sort_type: SortType::UpdatedAt,
            path: ValuePath::root(),
        },
    ]
}

#[derive(Debug, Default)]
pub(crate) struct Derived {
    pub sorts: Vec<SortConfiguration>,
    pub filters: Vec<FilterConfiguration>,
}

pub(crate) fn derive(tree: &FieldTree) -> Derived {
    let mut derived = walk(tree, tree.root());
    for filter in &mut derived.filters {
        filter.id = format!("{}:{}", filter.path, filter.filter_type);
    }
    derived
}

fn walk(tree: &FieldTree, id: FieldId) -> Derived {
    let field = tree.field(id);
    let label = field.label.as_deref().unwrap_or_default();
    let mut out = Derived::default();

    match &field.kind {
        FieldKind::Text(_) => {
            out.sort(label, SortType::String);
            out.filters(label, TEXT_FILTERS, None);
        }
        FieldKind::Integer => {
            out.sort(label, SortType::Int);
            out.filters(label, INT_FILTERS, None);
        }
        FieldKind::Float => {
            out.sort(label, SortType::Float);
            out.filters(label, FLOAT_FILTERS, None);
        }
        FieldKind::DateTime => {
            out.sort(label, SortType::DateTime);
            out.filters(label, DATE_TIME_FILTERS, None);
        }
        FieldKind::Checkbox => {
            out.sort(label, SortType::Bool);
            out.filters(label, &[FilterType::BoolEquals], None);
        }
        FieldKind::Enum(e) => {
            out.sort(label, SortType::Enum);
            let extra = json!({ "options": e.options });
            out.filters(label, &[FilterType::EnumEquals], Some(extra));
        }
        FieldKind::Reference(r) => {
            let extra = json!({ "model": r.model });
            out.filters(label, &[FilterType::RefEquals], Some(extra));
        }
        FieldKind::Struct(s) => {
            for (key, child) in &s.fields {
                let segment = ValueSegment::Struct { key: key.clone() };
                out.nest(label, segment, walk(tree, *child), true);
            }
        }
        FieldKind::Tuple(t) => {
            for (index, child) in t.fields.iter().enumerate() {
                let segment = ValueSegment::Tuple { index };
                out.nest(label, segment, walk(tree, *child), true);
            }
        }
        FieldKind::Union(u) => {
            let keys: Vec<&str> = u.fields.iter().map(|v| v.key.as_str()).collect();
            let extra = json!({ "keys": keys });
            out.filters(label, &[FilterType::UnionKeyEquals], Some(extra));
            for variant in &u.fields {
                let segment = ValueSegment::Union {
                    key: variant.key.clone(),
                };
                out.nest(label, segment, walk(tree, variant.field), true);
            }
        }
        FieldKind::Optional(inner) => {
            out.filters(label, &[FilterType::OptionalIsPresent], None);
            out.nest(label, ValueSegment::Optional, walk(tree, *inner), true);
        }
        // Elements have no single position to sort by.
        FieldKind::List(inner) => {
            out.filters(label, LIST_FILTERS, None);
            out.nest(label, ValueSegment::List, walk(tree, *inner), false);
        }
        FieldKind::Map(inner) => {
            out.filters(label, &[FilterType::MapKeyEquals], None);
            out.nest(label, ValueSegment::Map, walk(tree, *inner), false);
        }
        FieldKind::Recursive(group) => {
            if let Some(top) = group.top_field() {
                out.nest_in_place(label, walk(tree, top));
            }
        }
        FieldKind::Password(_)
        | FieldKind::File(_)
        | FieldKind::Null
        | FieldKind::Recurse(_)
        | FieldKind::Error(_) => {}
    }

    out
}

impl Derived {
    fn sort(&mut self, label: &str, sort_type: SortType) {
        self.sorts.push(SortConfiguration {
            label: label.to_string(),
            sort_type,
            path: ValuePath::root(),
        });
    }

    fn filters(&mut self, label: &str, types: &[FilterType], extra: Option<Json>) {
        for filter_type in types {
            self.filters.push(FilterConfiguration {
                id: String::new(),
                label: label.to_string(),
                filter_type: *filter_type,
                path: ValuePath::root(),
                extra_options: extra.clone(),
            });
        }
    }

    /// Re-emit a child's descriptors one segment down.
    fn nest(&mut self, label: &str, segment: ValueSegment, child: Derived, with_sorts: bool) {
        if with_sorts {
            for mut sort in child.sorts {
                sort.path.prepend(segment.clone());
                sort.label = join_labels(label, &sort.label);
                self.sorts.push(sort);
            }
        }
        for mut filter in child.filters {
            filter.path.prepend(segment.clone());
            filter.label = join_labels(label, &filter.label);
            self.filters.push(filter);
        }
    }

    fn nest_in_place(&mut self, label: &str, child: Derived) {
        for mut sort in child.sorts {
            sort.label = join_labels(label, &sort.label);
            self.sorts.push(sort);
        }
        for mut filter in child.filters {
            filter.label = join_labels(label, &filter.label);
            self.filters.push(filter);
        }
    }
}

/// `Address` + `City` → `Address / City`; empty parts are dropped.
fn join_labels(prefix: &str, label: &str) -> String {
    match (prefix.is_empty(), label.is_empty()) {
        (true, _) => label.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix} / {label}"),
    }
}
