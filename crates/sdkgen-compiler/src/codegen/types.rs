//! Shared modules: `enums`, `input_types` and `client`.

use std::collections::BTreeSet;

use sdkgen_core::utils::{is_rust_keyword, to_field_ident, to_pascal_case};
use sdkgen_core::{InputObjectDef, TypeDef, TypeRefKind};

use super::generator::ModuleGenerator;
use super::items::{
    CLIENT_MODULE, ClientDecl, EnumDecl, EnumValue, Field, InputDecl, Item, Module,
};
use super::naming::Names;
use crate::package::ImportSpec;
use crate::typegen::{TypeBuilder, TypeExpr};
use crate::{Result, Site};

pub const ENUMS_MODULE: &str = "enums";
pub const INPUT_TYPES_MODULE: &str = "input_types";

/// Enum variant identifier for a GraphQL enum value.
fn variant_ident(value: &str) -> String {
    let pascal = to_pascal_case(value);
    if pascal.is_empty() || pascal.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Value{pascal}")
    } else if is_rust_keyword(&pascal) {
        format!("{pascal}_")
    } else {
        pascal
    }
}

impl ModuleGenerator<'_> {
    /// The `input_types` module: every input object reachable from the
    /// variables generated so far, in schema order.
    ///
    /// Enums used by input fields are added to the run's references, so call
    /// this before [`ModuleGenerator::enums`].
    pub fn input_types(&mut self) -> Result<Option<Module>> {
        let mut builder = TypeBuilder::new(self.schema, &self.config.scalars);
        let mut reachable: BTreeSet<String> = BTreeSet::new();
        let mut pending: Vec<String> = self.references.input_objects.iter().cloned().collect();
        while let Some(name) = pending.pop() {
            if !reachable.insert(name.clone()) {
                continue;
            }
            let Some(TypeDef::InputObject(def)) = self.schema.get(&name) else {
                continue;
            };
            let site = Site::input(&name);
            for field in def.fields.values() {
                builder.build_leaf(&field.ty, &site.child(&field.name))?;
            }
            pending.extend(
                builder
                    .references()
                    .input_objects
                    .iter()
                    .filter(|next| !reachable.contains(*next))
                    .cloned(),
            );
        }

        let mut items = Vec::new();
        for def in self.schema.types() {
            if let TypeDef::InputObject(def) = def
                && reachable.contains(&def.name)
            {
                items.push(Item::Input(self.input_decl(&mut builder, def)?));
            }
        }
        if items.is_empty() {
            return Ok(None);
        }

        let references = builder.into_references();
        self.references.extend(&references);

        let maybe = items.iter().any(|item| match item {
            Item::Input(decl) => decl.fields.iter().any(|field| field.ty.is_optional()),
            _ => false,
        });
        let mut runtime = vec!["InputValue", "IntoInput"];
        if maybe {
            runtime.push("Maybe");
        }
        let mut imports = vec![ImportSpec::new("sdkgen_client", 0, runtime)];
        if !references.enums.is_empty() {
            imports.push(ImportSpec::new(ENUMS_MODULE, 2, references.enums.iter()));
        }

        tracing::debug!(inputs = items.len(), "input types generated");
        Ok(Some(Module {
            name: INPUT_TYPES_MODULE.to_string(),
            doc: self.module_doc("Input objects used by operation variables.".to_string()),
            imports,
            items,
        }))
    }

    fn input_decl(&self, builder: &mut TypeBuilder<'_>, def: &InputObjectDef) -> Result<InputDecl> {
        let site = Site::input(&def.name);
        let mut idents = Names::new();
        let mut fields = Vec::with_capacity(def.fields.len());
        for field in def.fields.values() {
            let mut ty = builder.build_leaf(&field.ty, &site.child(&field.name))?;
            if let TypeRefKind::Named(inner) = &field.ty.kind
                && self.reaches(inner, &def.name)
            {
                ty = TypeBuilder::wrap(&field.ty, TypeExpr::named(format!("Box<{inner}>")));
            }
            if field.has_default {
                ty = TypeExpr::optional(ty);
            }
            fields.push(Field {
                ident: idents.unique(&to_field_ident(&field.name)),
                wire_name: field.name.clone(),
                ty,
                doc: self.doc(field.description.as_deref()),
            });
        }
        Ok(InputDecl {
            name: def.name.clone(),
            doc: self.doc(def.description.as_deref()),
            fields,
        })
    }

    /// Whether input object `from` contains `target` without a list in
    /// between, which makes a field of that type recursive.
    fn reaches(&self, from: &str, target: &str) -> bool {
        let mut seen = BTreeSet::new();
        let mut pending = vec![from];
        while let Some(name) = pending.pop() {
            if name == target {
                return true;
            }
            if !seen.insert(name) {
                continue;
            }
            let Some(TypeDef::InputObject(def)) = self.schema.get(name) else {
                continue;
            };
            for field in def.fields.values() {
                if let TypeRefKind::Named(inner) = &field.ty.kind {
                    pending.push(inner);
                }
            }
        }
        false
    }

    /// The `enums` module: every referenced schema enum, in schema order.
    pub fn enums(&self) -> Option<Module> {
        let items: Vec<Item> = self
            .schema
            .types()
            .filter_map(|def| match def {
                TypeDef::Enum(def) if self.references.enums.contains(&def.name) => {
                    let mut idents = Names::new();
                    idents.reserve("Self");
                    Some(Item::Enum(EnumDecl {
                        name: def.name.clone(),
                        doc: self.doc(def.description.as_deref()),
                        values: def
                            .values
                            .iter()
                            .map(|value| EnumValue {
                                ident: idents.unique(&variant_ident(&value.name)),
                                wire_name: value.name.clone(),
                                doc: self.doc(value.description.as_deref()),
                            })
                            .collect(),
                    }))
                }
                _ => None,
            })
            .collect();
        if items.is_empty() {
            return None;
        }

        tracing::debug!(enums = items.len(), "enums generated");
        Some(Module {
            name: ENUMS_MODULE.to_string(),
            doc: self.module_doc("Enums used by operations and input objects.".to_string()),
            imports: vec![
                ImportSpec::new("sdkgen_client", 0, ["InputValue", "IntoInput"]),
                ImportSpec::new("serde", 0, ["Deserialize", "Serialize"]),
            ],
            items,
        })
    }

    /// The `client` module with the client struct the operation modules
    /// add their methods to.
    pub fn client(&self) -> Module {
        Module {
            name: CLIENT_MODULE.to_string(),
            doc: self.module_doc(
                "The client. Operation methods live next to their types.".to_string(),
            ),
            imports: vec![
                ImportSpec::new("sdkgen_client", 0, ["BaseClient"]),
                ImportSpec::new("std::ops", 0, ["Deref"]),
            ],
            items: vec![Item::Client(ClientDecl {
                name: self.config.client_name.clone(),
                doc: self.note(
                    "Typed GraphQL client. Clones share one connection pool.".to_string(),
                ),
            })],
        }
    }
}
