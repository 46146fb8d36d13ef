//! The shared `fragments` module.

use sdkgen_core::utils::to_pascal_case;

use super::generator::ModuleGenerator;
use super::items::{Item, Module};
use super::operation::RecordScope;
use crate::package::ImportSpec;
use crate::{Result, Site};

pub const FRAGMENTS_MODULE: &str = "fragments";

impl ModuleGenerator<'_> {
    /// The `fragments` module: one record per named fragment, or a dispatch
    /// enum when the fragment narrows an interface or union, in document
    /// order.
    ///
    /// Nested records are named after the fragment and field, as in
    /// operation modules. Fragment names are taken before any nested record
    /// so a field path never claims one.
    pub fn fragments(&mut self) -> Result<Option<Module>> {
        if self.document.fragments.is_empty() {
            return Ok(None);
        }

        let mut scope = RecordScope::new(self);
        let names: Vec<String> = self
            .document
            .fragments
            .values()
            .map(|fragment| scope.names.unique(&to_pascal_case(&fragment.name)))
            .collect();

        for (fragment, name) in self.document.fragments.values().zip(names) {
            let site = Site::fragment(&fragment.name);
            let shape = scope
                .resolver
                .resolve(&fragment.type_condition, &fragment.selection, &site)?;
            let first = scope.records.len();
            self.selection_type(&mut scope, name, &shape, &site)?;
            if let Some(Item::Struct(decl)) = scope.records.get_mut(first) {
                decl.doc = self.note(format!(
                    "Fields of the `{}` fragment on `{}`.",
                    fragment.name, fragment.type_condition
                ));
            }
        }

        let RecordScope {
            builder,
            records,
            dispatches,
            ..
        } = scope;
        let references = builder.into_references();
        self.references.extend(&references);

        let mut imports = Vec::new();
        if dispatches {
            imports.push(ImportSpec::new(
                "sdkgen_client",
                0,
                ["Branch", "Fallback", "pick_branch"],
            ));
        }
        imports.push(ImportSpec::new("serde", 0, ["Deserialize"]));
        imports.extend(Self::shared_imports(&references));

        tracing::debug!(
            fragments = self.document.fragments.len(),
            items = records.len(),
            "fragment types generated"
        );
        Ok(Some(Module {
            name: FRAGMENTS_MODULE.to_string(),
            doc: self.module_doc("Types for the named fragments of the document.".to_string()),
            imports,
            items: records,
        }))
    }
}
