//! Indented text dump of a field tree.

use std::fmt::Write;

use crate::field::{FieldId, FieldKind};
use crate::tree::FieldTree;

pub struct FieldPrinter<'t> {
    tree: &'t FieldTree,
    labels: bool,
    ids: bool,
    paths: bool,
}

impl<'t> FieldPrinter<'t> {
    pub fn new(tree: &'t FieldTree) -> Self {
        Self {
            tree,
            labels: true,
            ids: false,
            paths: false,
        }
    }

    pub fn with_labels(mut self, value: bool) -> Self {
        self.labels = value;
        self
    }

    pub fn with_ids(mut self, value: bool) -> Self {
        self.ids = value;
        self
    }

    /// Append the value path of every keyed field.
    pub fn with_paths(mut self, value: bool) -> Self {
        self.paths = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let mut key_path = crate::path::KeyPath::root();
        self.format_field(self.tree.root(), None, &mut key_path, 0, w)
    }

    fn format_field(
        &self,
        id: FieldId,
        key: Option<&str>,
        key_path: &mut crate::path::KeyPath,
        indent: usize,
        w: &mut impl Write,
    ) -> std::fmt::Result {
        let field = self.tree.field(id);
        let prefix = "  ".repeat(indent);

        write!(w, "{prefix}")?;
        if let Some(key) = key {
            write!(w, "{key}: ")?;
        }
        self.format_kind(&field.kind, w)?;
        if self.labels
            && let Some(label) = &field.label
        {
            write!(w, " \"{label}\"")?;
        }
        if self.ids {
            write!(w, " {id}")?;
        }
        if self.paths
            && key.is_some()
            && let Some(path) = self.tree.value_path_for_key_path(key_path)
        {
            write!(w, " @ {path}")?;
        }
        writeln!(w)?;

        match &field.kind {
            FieldKind::Struct(s) => {
                for (key, child) in &s.fields {
                    key_path.push(key.as_str());
                    self.format_field(*child, Some(key), key_path, indent + 1, w)?;
                    key_path.pop();
                }
            }
            FieldKind::Tuple(t) => {
                for (index, child) in t.fields.iter().enumerate() {
                    key_path.push(index);
                    self.format_field(*child, Some(&index.to_string()), key_path, indent + 1, w)?;
                    key_path.pop();
                }
            }
            FieldKind::Union(u) => {
                for variant in &u.fields {
                    key_path.push(variant.key.as_str());
                    self.format_field(variant.field, Some(&variant.key), key_path, indent + 1, w)?;
                    key_path.pop();
                }
            }
            FieldKind::Optional(inner) | FieldKind::List(inner) | FieldKind::Map(inner) => {
                self.format_field(*inner, None, key_path, indent + 1, w)?;
            }
            // Only the entry member is reachable by key path.
            FieldKind::Recursive(group) => {
                let top = group.top_field();
                for (label, member) in &group.fields {
                    if Some(*member) == top {
                        self.format_field(*member, Some(label), key_path, indent + 1, w)?;
                    } else {
                        let mut detached = crate::path::KeyPath::root();
                        let printer = FieldPrinter {
                            paths: false,
                            ..*self
                        };
                        printer.format_field(*member, Some(label), &mut detached, indent + 1, w)?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn format_kind(&self, kind: &FieldKind, w: &mut impl Write) -> std::fmt::Result {
        match kind {
            FieldKind::Text(t) if t.multiline => write!(w, "text multiline"),
            FieldKind::Password(p) if p.min_length > 0 => {
                write!(w, "password min={}", p.min_length)
            }
            FieldKind::File(f) if !f.accept.is_empty() => {
                write!(w, "file accept={}", f.accept.join(","))
            }
            FieldKind::Enum(e) => write!(w, "enum [{}]", e.options.join(", ")),
            FieldKind::Reference(r) if r.owned => write!(w, "reference -> {} owned", r.model),
            FieldKind::Reference(r) => write!(w, "reference -> {}", r.model),
            FieldKind::Recursive(g) => write!(w, "recursive top={}", g.top),
            FieldKind::Recurse(r) => match r.target {
                Some(target) if self.ids => write!(w, "recurse {} -> {target}", r.label),
                _ => write!(w, "recurse {}", r.label),
            },
            FieldKind::Error(e) => write!(w, "error: {}", e.message),
            kind => w.write_str(kind.tag()),
        }
    }
}
