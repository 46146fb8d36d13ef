//! Document layer: operations, fragments and their selection sets.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::TypeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    /// The GraphQL keyword (`query`, `mutation`).
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDefinition {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub has_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSelection {
    #[serde(default)]
    pub alias: Option<String>,
    pub name: String,
    #[serde(default)]
    pub selection: Vec<Selection>,
}

impl FieldSelection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            alias: None,
            name: name.into(),
            selection: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with(mut self, selection: Vec<Selection>) -> Self {
        self.selection = selection;
        self
    }

    /// Key under which the field appears in the response.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineFragment {
    #[serde(default)]
    pub type_condition: Option<String>,
    pub selection: Vec<Selection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    Field(FieldSelection),
    FragmentSpread { name: String },
    InlineFragment(InlineFragment),
}

impl Selection {
    pub fn field(name: impl Into<String>) -> Self {
        Selection::Field(FieldSelection::new(name))
    }

    pub fn spread(name: impl Into<String>) -> Self {
        Selection::FragmentSpread { name: name.into() }
    }

    pub fn on(type_condition: impl Into<String>, selection: Vec<Selection>) -> Self {
        Selection::InlineFragment(InlineFragment {
            type_condition: Some(type_condition.into()),
            selection,
        })
    }
}

impl From<FieldSelection> for Selection {
    fn from(field: FieldSelection) -> Self {
        Selection::Field(field)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub name: String,
    pub kind: OperationKind,
    #[serde(default)]
    pub variables: Vec<VariableDefinition>,
    pub selection: Vec<Selection>,
    /// Literal request text: the operation followed by every fragment it
    /// spreads, directly or transitively.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub name: String,
    pub type_condition: String,
    pub selection: Vec<Selection>,
}

/// Operations and fragments in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub fragments: IndexMap<String, Fragment>,
}

impl Document {
    pub fn fragment(&self, name: &str) -> Option<&Fragment> {
        self.fragments.get(name)
    }

    /// Append another document, keeping the order operations were read in.
    pub fn extend(&mut self, other: Document) {
        self.operations.extend(other.operations);
        self.fragments.extend(other.fragments);
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty() && self.fragments.is_empty()
    }
}
