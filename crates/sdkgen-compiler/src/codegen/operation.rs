//! Per-operation modules.

use sdkgen_core::utils::{to_field_ident, to_pascal_case, to_screaming_snake_case};
use sdkgen_core::{Operation, OperationKind, TypeKind};

use super::generator::{ModuleGenerator, SHARED_MODULES};
use super::items::{
    ConstDecl, DispatchDecl, DispatchVariant, Field, Item, MethodDecl, Module, Param, StructDecl,
};
use super::naming::Names;
use crate::frontend::with_typenames;
use crate::package::ImportSpec;
use crate::resolve::{Record, RecordField, Resolver, SelectionShape};
use crate::typegen::{TypeBuilder, TypeExpr};
use crate::{Error, Result, Site};

/// Record-building state for one module.
pub(super) struct RecordScope<'a> {
    /// Type names in the module.
    pub(super) names: Names,
    pub(super) builder: TypeBuilder<'a>,
    pub(super) resolver: Resolver<'a>,
    /// Records and dispatch enums, root first, each before its children.
    pub(super) records: Vec<Item>,
    pub(super) dispatches: bool,
}

impl<'a> RecordScope<'a> {
    pub(super) fn new(generator: &ModuleGenerator<'a>) -> Self {
        Self {
            names: generator.module_names(),
            builder: TypeBuilder::new(generator.schema, &generator.config.scalars),
            resolver: Resolver::new(generator.schema, generator.document),
            records: Vec::new(),
            dispatches: false,
        }
    }
}

/// Module name for an operation; shared module names get a suffix.
pub(super) fn module_name(operation: &str) -> String {
    let name = to_field_ident(operation);
    if SHARED_MODULES.contains(&name.as_str()) {
        format!("{name}_operation")
    } else {
        name
    }
}

impl<'a> ModuleGenerator<'a> {
    /// Generate the module for one operation.
    ///
    /// The module holds the operation text constant, the root record with
    /// every nested record and dispatch enum, and the client method.
    pub fn operation(&mut self, operation: &Operation) -> Result<Module> {
        let site = Site::new(&operation.name);
        let Some(root_type) = self.schema.root_type(operation.kind) else {
            return Err(Error::UnresolvedType {
                name: match operation.kind {
                    OperationKind::Query => "Query",
                    OperationKind::Mutation => "Mutation",
                }
                .to_string(),
                site,
            });
        };

        let mut scope = RecordScope::new(self);

        let root = scope.names.unique(&to_pascal_case(&operation.name));
        let shape = scope
            .resolver
            .resolve(root_type, &operation.selection, &site)?;
        self.selection_type(&mut scope, root.clone(), &shape, &site)?;
        let kind = operation.kind.as_str();
        if let Some(Item::Struct(decl)) = scope.records.first_mut() {
            decl.doc = self.note(format!(
                "Response data of the `{}` {kind}.",
                operation.name
            ));
        }

        let mut params = Vec::with_capacity(operation.variables.len());
        let mut idents = Names::new();
        for variable in &operation.variables {
            let var_site = site.child(&format!("${}", variable.name));
            let mut ty = scope.builder.build_leaf(&variable.ty, &var_site)?;
            if variable.has_default {
                ty = TypeExpr::optional(ty);
            }
            params.push(Param {
                ident: idents.unique(&to_field_ident(&variable.name)),
                wire_name: variable.name.clone(),
                ty,
            });
        }

        let RecordScope {
            builder,
            records,
            dispatches,
            ..
        } = scope;
        let references = builder.into_references();
        self.references.extend(&references);

        let mut runtime = vec!["ClientError", "Variables", "decode"];
        if params.iter().any(|param| param.ty.is_optional()) {
            runtime.push("Maybe");
        }
        if dispatches {
            runtime.extend(["Branch", "Fallback", "pick_branch"]);
        }
        let mut imports = vec![
            ImportSpec::new("sdkgen_client", 0, runtime),
            ImportSpec::new("serde", 0, ["Deserialize"]),
        ];
        imports.extend(Self::shared_imports(&references));

        let constant = format!("{}_OPERATION", to_screaming_snake_case(&operation.name));
        let mut items = Vec::with_capacity(records.len() + 2);
        items.push(Item::Const(ConstDecl {
            name: constant.clone(),
            doc: self.note(format!(
                "Text of the `{}` {kind}, with the fragments it uses.",
                operation.name
            )),
            value: with_typenames(&operation.text, self.schema)?,
        }));
        items.extend(records);
        items.push(Item::Method(MethodDecl {
            client: self.config.client_name.clone(),
            name: to_field_ident(&operation.name),
            doc: self.note(format!("Run the `{}` {kind}.", operation.name)),
            params,
            operation: constant,
            returns: root,
        }));

        let name = module_name(&operation.name);
        tracing::debug!(
            operation = %operation.name,
            module = %name,
            items = items.len(),
            "operation module generated"
        );
        Ok(Module {
            doc: self.module_doc(format!(
                "Types and client method for the `{}` {kind}.",
                operation.name
            )),
            name,
            imports,
            items,
        })
    }

    /// Emit the types for `shape` under `name` and return the expression
    /// naming them.
    ///
    /// A polymorphic shape becomes a dispatch enum `name` over one record per
    /// branch (`name` + type) and the base record (`name` + abstract type).
    pub(super) fn selection_type(
        &self,
        scope: &mut RecordScope<'a>,
        name: String,
        shape: &SelectionShape,
        site: &Site,
    ) -> Result<TypeExpr> {
        if !shape.is_polymorphic() {
            self.record(scope, name.clone(), &shape.base, site)?;
            return Ok(TypeExpr::named(name));
        }

        let mut idents = Names::new();
        idents.reserve("Self");
        let mut variant = |scope: &mut RecordScope<'a>, type_name: &str, record: &Record| {
            let pascal = to_pascal_case(type_name);
            DispatchVariant {
                ident: idents.unique(&pascal),
                record: scope.names.unique(&format!("{name}{pascal}")),
                typename: type_name.to_string(),
                keys: record.keys().map(String::from).collect(),
            }
        };
        let branches: Vec<DispatchVariant> = shape
            .branches
            .iter()
            .map(|branch| variant(scope, &branch.type_name, &branch.record))
            .collect();
        let fallback = variant(scope, &shape.type_name, &shape.base);
        let base_types: Vec<String> = self
            .schema
            .possible_types(&shape.type_name)
            .into_iter()
            .filter(|possible| !shape.branches.iter().any(|b| b.type_name == *possible))
            .map(String::from)
            .collect();

        let variants: Vec<TypeExpr> = branches
            .iter()
            .chain([&fallback])
            .map(|v| TypeExpr::named(&v.record))
            .collect();

        scope.dispatches = true;
        scope.records.push(Item::Dispatch(DispatchDecl {
            name: name.clone(),
            discriminator: shape.discriminator.clone(),
            branches: branches.clone(),
            fallback: fallback.clone(),
            base_types,
        }));
        for (branch, variant) in shape.branches.iter().zip(branches) {
            self.record(scope, variant.record, &branch.record, site)?;
        }
        self.record(scope, fallback.record, &shape.base, site)?;

        Ok(TypeExpr::union(name, variants))
    }

    /// Emit the record `name` and, after it, the types of its fields.
    fn record(
        &self,
        scope: &mut RecordScope<'a>,
        name: String,
        record: &Record,
        site: &Site,
    ) -> Result<()> {
        let index = scope.records.len();
        let mut idents = Names::new();
        let mut fields = Vec::with_capacity(record.len());
        for field in record.fields.values() {
            let ty = self.field_type(scope, &name, field, &site.child(&field.response_key))?;
            fields.push(Field {
                ident: idents.unique(&to_field_ident(&field.response_key)),
                wire_name: field.response_key.clone(),
                ty,
                doc: self.doc(field.description.as_deref()),
            });
        }
        scope.records.insert(
            index,
            Item::Struct(StructDecl {
                name,
                doc: None,
                fields,
            }),
        );
        Ok(())
    }

    fn field_type(
        &self,
        scope: &mut RecordScope<'a>,
        parent: &str,
        field: &RecordField,
        site: &Site,
    ) -> Result<TypeExpr> {
        let inner = field.ty.inner_name();
        let composite = self
            .schema
            .kind_of(inner)
            .is_some_and(TypeKind::is_composite);
        if !composite {
            return scope.builder.build_leaf(&field.ty, site);
        }

        let shape = scope.resolver.resolve(inner, &field.selection, site)?;
        let name = scope
            .names
            .unique(&format!("{parent}{}", to_pascal_case(&field.response_key)));
        let leaf = self.selection_type(scope, name, &shape, site)?;
        Ok(TypeBuilder::wrap(&field.ty, leaf))
    }
}
