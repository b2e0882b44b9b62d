//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::field::{Field, FieldKind};

#[inline]
pub fn ensure_serializable(field: &Field) {
    if let FieldKind::Error(error) = &field.kind {
        panic!(
            "serialize: error field cannot be persisted ({}); check FieldTree::errors first",
            error.message
        );
    }
}
