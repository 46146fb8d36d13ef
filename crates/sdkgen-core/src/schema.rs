//! Schema layer: named type definitions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{TYPENAME_FIELD, TypeRef};

/// Scalars every schema has, whether declared or not.
pub const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Kind of a named type, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDef {
    Scalar {
        name: String,
        #[serde(default)]
        description: Option<String>,
    },
    Object(ObjectDef),
    Interface(InterfaceDef),
    Union(UnionDef),
    Enum(EnumDef),
    InputObject(InputObjectDef),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDef {
    pub name: String,
    #[serde(default)]
    pub implements: Vec<String>,
    pub fields: IndexMap<String, FieldDef>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDef {
    pub name: String,
    #[serde(default)]
    pub implements: Vec<String>,
    pub fields: IndexMap<String, FieldDef>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionDef {
    pub name: String,
    pub members: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValueDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,
    pub values: Vec<EnumValueDef>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputFieldDef {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub has_default: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputObjectDef {
    pub name: String,
    pub fields: IndexMap<String, InputFieldDef>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TypeDef {
    pub fn name(&self) -> &str {
        match self {
            TypeDef::Scalar { name, .. } => name,
            TypeDef::Object(def) => &def.name,
            TypeDef::Interface(def) => &def.name,
            TypeDef::Union(def) => &def.name,
            TypeDef::Enum(def) => &def.name,
            TypeDef::InputObject(def) => &def.name,
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDef::Scalar { .. } => TypeKind::Scalar,
            TypeDef::Object(_) => TypeKind::Object,
            TypeDef::Interface(_) => TypeKind::Interface,
            TypeDef::Union(_) => TypeKind::Union,
            TypeDef::Enum(_) => TypeKind::Enum,
            TypeDef::InputObject(_) => TypeKind::InputObject,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            TypeDef::Scalar { description, .. } => description.as_deref(),
            TypeDef::Object(def) => def.description.as_deref(),
            TypeDef::Interface(def) => def.description.as_deref(),
            TypeDef::Union(def) => def.description.as_deref(),
            TypeDef::Enum(def) => def.description.as_deref(),
            TypeDef::InputObject(def) => def.description.as_deref(),
        }
    }

    /// Output fields, for object and interface types.
    pub fn fields(&self) -> Option<&IndexMap<String, FieldDef>> {
        match self {
            TypeDef::Object(def) => Some(&def.fields),
            TypeDef::Interface(def) => Some(&def.fields),
            _ => None,
        }
    }
}

impl TypeKind {
    /// Interfaces and unions: types whose runtime value is one of several objects.
    pub fn is_abstract(self) -> bool {
        matches!(self, TypeKind::Interface | TypeKind::Union)
    }

    /// Types that require a selection set.
    pub fn is_composite(self) -> bool {
        matches!(self, TypeKind::Object | TypeKind::Interface | TypeKind::Union)
    }
}

/// A GraphQL schema, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    types: IndexMap<String, TypeDef>,
    query_type: String,
    #[serde(default)]
    mutation_type: Option<String>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    /// An empty schema holding only the builtin scalars.
    pub fn new() -> Self {
        let mut types = IndexMap::new();
        for name in BUILTIN_SCALARS {
            types.insert(
                name.to_string(),
                TypeDef::Scalar {
                    name: name.to_string(),
                    description: None,
                },
            );
        }
        Self {
            types,
            query_type: "Query".to_string(),
            mutation_type: None,
        }
    }

    /// Add or replace a type definition.
    pub fn insert(&mut self, def: TypeDef) {
        if self.mutation_type.is_none() && def.name() == "Mutation" {
            self.mutation_type = Some("Mutation".to_string());
        }
        self.types.insert(def.name().to_string(), def);
    }

    pub fn set_query_type(&mut self, name: impl Into<String>) {
        self.query_type = name.into();
    }

    pub fn set_mutation_type(&mut self, name: impl Into<String>) {
        self.mutation_type = Some(name.into());
    }

    pub fn query_type(&self) -> &str {
        &self.query_type
    }

    pub fn mutation_type(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<TypeKind> {
        self.get(name).map(TypeDef::kind)
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    pub fn is_builtin_scalar(name: &str) -> bool {
        BUILTIN_SCALARS.contains(&name)
    }

    /// Look up an output field, including the `__typename` meta-field.
    ///
    /// Returns an owned definition because the meta-field is synthesized.
    pub fn field(&self, type_name: &str, field_name: &str) -> Option<FieldDef> {
        if field_name == TYPENAME_FIELD {
            return self.get(type_name).map(|_| FieldDef {
                name: TYPENAME_FIELD.to_string(),
                ty: TypeRef::named("String"),
                description: None,
            });
        }
        self.get(type_name)?.fields()?.get(field_name).cloned()
    }

    /// Concrete object types a value of `name` may have at runtime.
    ///
    /// Objects yield themselves. Interfaces yield their implementors in schema
    /// declaration order, unions their members in declaration order. Anything
    /// else yields nothing.
    pub fn possible_types(&self, name: &str) -> Vec<&str> {
        match self.get(name) {
            Some(TypeDef::Object(def)) => vec![def.name.as_str()],
            Some(TypeDef::Interface(_)) => self
                .types
                .values()
                .filter_map(|def| match def {
                    TypeDef::Object(object) if object.implements.iter().any(|i| i == name) => {
                        Some(object.name.as_str())
                    }
                    _ => None,
                })
                .collect(),
            Some(TypeDef::Union(def)) => def
                .members
                .iter()
                .filter(|member| self.kind_of(member) == Some(TypeKind::Object))
                .map(String::as_str)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Root type name for an operation kind.
    pub fn root_type(&self, kind: crate::OperationKind) -> Option<&str> {
        match kind {
            crate::OperationKind::Query => Some(self.query_type()),
            crate::OperationKind::Mutation => self.mutation_type(),
        }
    }
}
