//! SDL lowering.

use graphql_parser::schema::{self as ast, Definition, TypeDefinition, TypeExtension};
use indexmap::IndexMap;
use sdkgen_core::{
    EnumDef, EnumValueDef, FieldDef, InputFieldDef, InputObjectDef, InterfaceDef, ObjectDef,
    Schema, TypeDef, UnionDef,
};

use super::lower_type;
use crate::{Error, Result};

/// Parse SDL into a [`Schema`].
///
/// Type extensions are applied to their base type in source order. Directives
/// and argument lists are not needed for code generation and are dropped.
pub fn parse_schema(source: &str) -> Result<Schema> {
    let document = graphql_parser::parse_schema::<String>(source).map_err(|err| Error::Parse {
        origin: "schema".to_string(),
        message: err.to_string(),
    })?;

    let mut schema = Schema::new();
    let mut extensions = Vec::new();
    for definition in document.definitions {
        match definition {
            Definition::SchemaDefinition(def) => {
                if let Some(query) = def.query {
                    schema.set_query_type(query);
                }
                if let Some(mutation) = def.mutation {
                    schema.set_mutation_type(mutation);
                }
            }
            Definition::TypeDefinition(def) => schema.insert(lower_definition(def)),
            Definition::TypeExtension(ext) => extensions.push(ext),
            Definition::DirectiveDefinition(_) => {}
        }
    }

    for ext in extensions {
        apply_extension(&mut schema, ext)?;
    }

    tracing::debug!(types = schema.types().count(), "schema lowered");
    Ok(schema)
}

fn lower_definition(def: TypeDefinition<'_, String>) -> TypeDef {
    match def {
        TypeDefinition::Scalar(def) => TypeDef::Scalar {
            name: def.name,
            description: def.description,
        },
        TypeDefinition::Object(def) => TypeDef::Object(ObjectDef {
            name: def.name,
            implements: def.implements_interfaces,
            fields: lower_fields(def.fields),
            description: def.description,
        }),
        TypeDefinition::Interface(def) => TypeDef::Interface(InterfaceDef {
            name: def.name,
            implements: def.implements_interfaces,
            fields: lower_fields(def.fields),
            description: def.description,
        }),
        TypeDefinition::Union(def) => TypeDef::Union(UnionDef {
            name: def.name,
            members: def.types,
            description: def.description,
        }),
        TypeDefinition::Enum(def) => TypeDef::Enum(EnumDef {
            name: def.name,
            values: lower_values(def.values),
            description: def.description,
        }),
        TypeDefinition::InputObject(def) => TypeDef::InputObject(InputObjectDef {
            name: def.name,
            fields: lower_input_fields(def.fields),
            description: def.description,
        }),
    }
}

fn lower_fields(fields: Vec<ast::Field<'_, String>>) -> IndexMap<String, FieldDef> {
    fields
        .into_iter()
        .map(|field| {
            let def = FieldDef {
                ty: lower_type(&field.field_type),
                name: field.name,
                description: field.description,
            };
            (def.name.clone(), def)
        })
        .collect()
}

fn lower_input_fields(fields: Vec<ast::InputValue<'_, String>>) -> IndexMap<String, InputFieldDef> {
    fields
        .into_iter()
        .map(|field| {
            let def = InputFieldDef {
                ty: lower_type(&field.value_type),
                has_default: field.default_value.is_some(),
                name: field.name,
                description: field.description,
            };
            (def.name.clone(), def)
        })
        .collect()
}

fn lower_values(values: Vec<ast::EnumValue<'_, String>>) -> Vec<EnumValueDef> {
    values
        .into_iter()
        .map(|value| EnumValueDef {
            name: value.name,
            description: value.description,
        })
        .collect()
}

fn apply_extension(schema: &mut Schema, ext: TypeExtension<'_, String>) -> Result<()> {
    let name = extension_name(&ext).to_string();
    let Some(mut def) = schema.get(&name).cloned() else {
        return Err(Error::Parse {
            origin: "schema".to_string(),
            message: format!("extension of undefined type `{name}`"),
        });
    };

    match (&mut def, ext) {
        (TypeDef::Object(def), TypeExtension::Object(ext)) => {
            def.implements.extend(ext.implements_interfaces);
            def.fields.extend(lower_fields(ext.fields));
        }
        (TypeDef::Interface(def), TypeExtension::Interface(ext)) => {
            def.fields.extend(lower_fields(ext.fields));
        }
        (TypeDef::Union(def), TypeExtension::Union(ext)) => def.members.extend(ext.types),
        (TypeDef::Enum(def), TypeExtension::Enum(ext)) => def.values.extend(lower_values(ext.values)),
        (TypeDef::InputObject(def), TypeExtension::InputObject(ext)) => {
            def.fields.extend(lower_input_fields(ext.fields));
        }
        (TypeDef::Scalar { .. }, TypeExtension::Scalar(_)) => {}
        _ => {
            return Err(Error::Parse {
                origin: "schema".to_string(),
                message: format!("extension of `{name}` does not match its kind"),
            });
        }
    }

    schema.insert(def);
    Ok(())
}

fn extension_name<'e>(ext: &'e TypeExtension<'_, String>) -> &'e str {
    match ext {
        TypeExtension::Scalar(ext) => &ext.name,
        TypeExtension::Object(ext) => &ext.name,
        TypeExtension::Interface(ext) => &ext.name,
        TypeExtension::Union(ext) => &ext.name,
        TypeExtension::Enum(ext) => &ext.name,
        TypeExtension::InputObject(ext) => &ext.name,
    }
}
