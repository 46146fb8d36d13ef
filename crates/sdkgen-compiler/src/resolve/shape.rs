//! Resolved selection shapes.

use indexmap::IndexMap;
use sdkgen_core::{Selection, TypeRef};

/// One selected field after fragments are flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    pub response_key: String,
    pub field_name: String,
    pub ty: TypeRef,
    /// Sub-selections of every occurrence of this key, concatenated.
    pub selection: Vec<Selection>,
    pub description: Option<String>,
}

/// Fields keyed by response key, in selection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub fields: IndexMap<String, RecordField>,
}

impl Record {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A concrete runtime type with its own record.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// Concrete type name, also the discriminator value.
    pub type_name: String,
    /// Base fields plus the fields selected for this type.
    pub record: Record,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionShape {
    pub type_name: String,
    /// Response key carrying `__typename`, when selected.
    pub discriminator: Option<String>,
    /// Fields every runtime type has.
    pub base: Record,
    /// In order of first appearance. Empty means `base` is the only type.
    pub branches: Vec<Branch>,
}

impl SelectionShape {
    pub fn is_polymorphic(&self) -> bool {
        !self.branches.is_empty()
    }
}
