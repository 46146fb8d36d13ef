//! Executable-document lowering.

use std::collections::HashMap;

use graphql_parser::query::{
    self as ast, Definition, FragmentDefinition, OperationDefinition, TypeCondition,
};
use indexmap::IndexMap;
use sdkgen_core::{
    Document, FieldSelection, Fragment, InlineFragment, Operation, OperationKind, Schema,
    Selection, TYPENAME_FIELD, TypeKind, VariableDefinition,
};

use super::lower_type;
use crate::{Error, Result};

/// Parse one executable document.
pub fn parse_document(source: &str) -> Result<Document> {
    parse_documents(&[("document".to_string(), source.to_string())])
}

/// Parse several `(origin, source)` files as one document set.
///
/// Fragments are shared across files. Operations keep the order they were
/// read in. Subscriptions are skipped.
pub fn parse_documents(sources: &[(String, String)]) -> Result<Document> {
    let mut definitions: Vec<Definition<'static, String>> = Vec::new();
    for (origin, source) in sources {
        let parsed = graphql_parser::parse_query::<String>(source).map_err(|err| Error::Parse {
            origin: origin.clone(),
            message: err.to_string(),
        })?;
        definitions.extend(parsed.into_static().definitions);
    }

    let fragment_defs: HashMap<&str, &FragmentDefinition<'static, String>> = definitions
        .iter()
        .filter_map(|def| match def {
            Definition::Fragment(fragment) => Some((fragment.name.as_str(), fragment)),
            Definition::Operation(_) => None,
        })
        .collect();

    let mut document = Document::default();
    for def in &definitions {
        match def {
            Definition::Fragment(fragment) => {
                let TypeCondition::On(type_condition) = &fragment.type_condition;
                document.fragments.insert(
                    fragment.name.clone(),
                    Fragment {
                        name: fragment.name.clone(),
                        type_condition: type_condition.clone(),
                        selection: lower_selection_set(&fragment.selection_set),
                    },
                );
            }
            Definition::Operation(operation) => {
                if let Some(lowered) = lower_operation(operation, &definitions, &fragment_defs)? {
                    document.operations.push(lowered);
                }
            }
        }
    }

    tracing::debug!(
        operations = document.operations.len(),
        fragments = document.fragments.len(),
        "documents lowered"
    );
    Ok(document)
}

fn lower_operation(
    operation: &OperationDefinition<'static, String>,
    definitions: &[Definition<'static, String>],
    fragment_defs: &HashMap<&str, &FragmentDefinition<'static, String>>,
) -> Result<Option<Operation>> {
    let (name, kind, variables, selection_set) = match operation {
        OperationDefinition::Query(query) => (
            &query.name,
            OperationKind::Query,
            &query.variable_definitions,
            &query.selection_set,
        ),
        OperationDefinition::Mutation(mutation) => (
            &mutation.name,
            OperationKind::Mutation,
            &mutation.variable_definitions,
            &mutation.selection_set,
        ),
        OperationDefinition::Subscription(subscription) => {
            tracing::warn!(
                name = subscription.name.as_deref().unwrap_or("<anonymous>"),
                "subscriptions are not supported, skipping"
            );
            return Ok(None);
        }
        OperationDefinition::SelectionSet(_) => {
            return Err(Error::Parse {
                origin: "document".to_string(),
                message: "anonymous operations cannot be generated, give the operation a name"
                    .to_string(),
            });
        }
    };
    let Some(name) = name else {
        return Err(Error::Parse {
            origin: "document".to_string(),
            message: "anonymous operations cannot be generated, give the operation a name"
                .to_string(),
        });
    };

    Ok(Some(Operation {
        name: name.clone(),
        kind,
        variables: variables.iter().map(lower_variable).collect(),
        selection: lower_selection_set(selection_set),
        text: operation_text(operation, selection_set, definitions, fragment_defs),
    }))
}

fn lower_variable(var: &ast::VariableDefinition<'static, String>) -> VariableDefinition {
    VariableDefinition {
        name: var.name.clone(),
        ty: lower_type(&var.var_type),
        has_default: var.default_value.is_some(),
    }
}

fn lower_selection_set(set: &ast::SelectionSet<'static, String>) -> Vec<Selection> {
    set.items.iter().map(lower_selection).collect()
}

fn lower_selection(selection: &ast::Selection<'static, String>) -> Selection {
    match selection {
        ast::Selection::Field(field) => Selection::Field(FieldSelection {
            alias: field.alias.clone(),
            name: field.name.clone(),
            selection: lower_selection_set(&field.selection_set),
        }),
        ast::Selection::FragmentSpread(spread) => Selection::FragmentSpread {
            name: spread.fragment_name.clone(),
        },
        ast::Selection::InlineFragment(fragment) => Selection::InlineFragment(InlineFragment {
            type_condition: fragment
                .type_condition
                .as_ref()
                .map(|TypeCondition::On(name)| name.clone()),
            selection: lower_selection_set(&fragment.selection_set),
        }),
    }
}

/// The operation followed by every fragment it reaches, in document order.
fn operation_text(
    operation: &OperationDefinition<'static, String>,
    selection_set: &ast::SelectionSet<'static, String>,
    definitions: &[Definition<'static, String>],
    fragment_defs: &HashMap<&str, &FragmentDefinition<'static, String>>,
) -> String {
    let mut reached: IndexMap<&str, ()> = IndexMap::new();
    let mut pending = vec![selection_set];
    while let Some(set) = pending.pop() {
        spreads_in(set, &mut |name| {
            if reached.insert(name, ()).is_none()
                && let Some(fragment) = fragment_defs.get(name)
            {
                pending.push(&fragment.selection_set);
            }
        });
    }

    let mut text = ast::Document {
        definitions: vec![Definition::Operation(operation.clone())],
    };
    for def in definitions {
        if let Definition::Fragment(fragment) = def
            && reached.contains_key(fragment.name.as_str())
        {
            text.definitions.push(def.clone());
        }
    }
    text.to_string()
}

fn spreads_in<'s>(set: &'s ast::SelectionSet<'static, String>, found: &mut impl FnMut(&'s str)) {
    for item in &set.items {
        match item {
            ast::Selection::Field(field) => spreads_in(&field.selection_set, found),
            ast::Selection::FragmentSpread(spread) => found(&spread.fragment_name),
            ast::Selection::InlineFragment(fragment) => spreads_in(&fragment.selection_set, found),
        }
    }
}

/// `text` with `__typename` selected in every selection set on an interface
/// or union, so each response object names its runtime type.
///
/// Fields the schema does not know are left alone; the resolver reports them.
pub fn with_typenames(text: &str, schema: &Schema) -> Result<String> {
    let mut parsed = graphql_parser::parse_query::<String>(text)
        .map_err(|err| Error::Parse {
            origin: "operation text".to_string(),
            message: err.to_string(),
        })?
        .into_static();

    for def in &mut parsed.definitions {
        match def {
            Definition::Operation(operation) => {
                let (kind, set) = match operation {
                    OperationDefinition::Query(query) => {
                        (OperationKind::Query, &mut query.selection_set)
                    }
                    OperationDefinition::Mutation(mutation) => {
                        (OperationKind::Mutation, &mut mutation.selection_set)
                    }
                    OperationDefinition::SelectionSet(set) => (OperationKind::Query, set),
                    OperationDefinition::Subscription(_) => continue,
                };
                if let Some(root) = schema.root_type(kind) {
                    add_typenames(root, set, schema);
                }
            }
            Definition::Fragment(fragment) => {
                let TypeCondition::On(on) = &fragment.type_condition;
                add_typenames(on, &mut fragment.selection_set, schema);
            }
        }
    }
    Ok(parsed.to_string())
}

fn add_typenames(parent: &str, set: &mut ast::SelectionSet<'static, String>, schema: &Schema) {
    for item in &mut set.items {
        match item {
            ast::Selection::Field(field) if !field.selection_set.items.is_empty() => {
                if let Some(def) = schema.field(parent, &field.name) {
                    add_typenames(def.ty.inner_name(), &mut field.selection_set, schema);
                }
            }
            ast::Selection::InlineFragment(fragment) => {
                let on = match &fragment.type_condition {
                    Some(TypeCondition::On(name)) => name.as_str(),
                    None => parent,
                };
                add_typenames(on, &mut fragment.selection_set, schema);
            }
            ast::Selection::Field(_) | ast::Selection::FragmentSpread(_) => {}
        }
    }

    let selected = set.items.iter().any(
        |item| matches!(item, ast::Selection::Field(field) if field.name == TYPENAME_FIELD),
    );
    if selected || !schema.kind_of(parent).is_some_and(TypeKind::is_abstract) {
        return;
    }
    set.items.insert(
        0,
        ast::Selection::Field(ast::Field {
            position: set.span.0,
            alias: None,
            name: TYPENAME_FIELD.to_string(),
            arguments: Vec::new(),
            directives: Vec::new(),
            selection_set: ast::SelectionSet {
                span: set.span,
                items: Vec::new(),
            },
        }),
    );
}
