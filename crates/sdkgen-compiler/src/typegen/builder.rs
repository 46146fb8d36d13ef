//! `TypeRef` to `TypeExpr` conversion.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use sdkgen_core::{Schema, TypeDef, TypeRef, TypeRefKind};

use super::TypeExpr;
use crate::{Error, Result, Site};

/// Generated shared types an expression refers to, so the caller can import
/// them and the run can emit them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct References {
    pub enums: BTreeSet<String>,
    pub input_objects: BTreeSet<String>,
}

impl References {
    pub fn extend(&mut self, other: &References) {
        self.enums.extend(other.enums.iter().cloned());
        self.input_objects.extend(other.input_objects.iter().cloned());
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty() && self.input_objects.is_empty()
    }
}

pub struct TypeBuilder<'a> {
    schema: &'a Schema,
    scalars: &'a IndexMap<String, String>,
    references: References,
}

impl<'a> TypeBuilder<'a> {
    pub fn new(schema: &'a Schema, scalars: &'a IndexMap<String, String>) -> Self {
        Self {
            schema,
            scalars,
            references: References::default(),
        }
    }

    /// Build the expression for a scalar, enum or input-object reference.
    ///
    /// Composite types (objects, interfaces, unions) need a generated record
    /// as their leaf; use [`TypeBuilder::wrap`] for those.
    pub fn build_leaf(&mut self, ty: &TypeRef, site: &Site) -> Result<TypeExpr> {
        let leaf = self.leaf(ty.inner_name(), site)?;
        Ok(Self::wrap(ty, leaf))
    }

    /// Apply the list and nullability layers of `ty` around `leaf`.
    ///
    /// Every nullable layer adds exactly one `Optional`; non-null adds none.
    pub fn wrap(ty: &TypeRef, leaf: TypeExpr) -> TypeExpr {
        let inner = match &ty.kind {
            TypeRefKind::Named(_) => leaf,
            TypeRefKind::List(of) => TypeExpr::container(Self::wrap(of, leaf)),
        };
        if ty.nullable {
            TypeExpr::optional(inner)
        } else {
            inner
        }
    }

    fn leaf(&mut self, name: &str, site: &Site) -> Result<TypeExpr> {
        let Some(def) = self.schema.get(name) else {
            return Err(Error::UnresolvedType {
                name: name.to_string(),
                site: site.clone(),
            });
        };
        let expr = match def {
            TypeDef::Scalar { name, .. } => TypeExpr::named(self.scalar(name)),
            TypeDef::Enum(def) => {
                self.references.enums.insert(def.name.clone());
                TypeExpr::named(&def.name)
            }
            TypeDef::InputObject(def) => {
                self.references.input_objects.insert(def.name.clone());
                TypeExpr::named(&def.name)
            }
            TypeDef::Object(_) | TypeDef::Interface(_) | TypeDef::Union(_) => {
                TypeExpr::named(name)
            }
        };
        Ok(expr)
    }

    fn scalar(&self, name: &str) -> String {
        if let Some(mapped) = self.scalars.get(name) {
            return mapped.clone();
        }
        match name {
            "Int" => "i32",
            "Float" => "f64",
            "String" | "ID" => "String",
            "Boolean" => "bool",
            _ => "serde_json::Value",
        }
        .to_string()
    }

    pub fn references(&self) -> &References {
        &self.references
    }

    pub fn into_references(self) -> References {
        self.references
    }
}
