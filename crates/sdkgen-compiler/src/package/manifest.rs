//! Package entry module.

use std::collections::{BTreeMap, BTreeSet};

use super::{ImportSpec, SymbolRegistry};
use crate::{Error, Result};

/// Header written at the top of every generated file.
pub(crate) const GENERATED_HEADER: &str = "Generated by sdkgen. Do not edit.";

/// The package root: module declarations, re-exports and the export list.
///
/// Every list is sorted, so the manifest does not depend on the order
/// operations were generated in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub modules: Vec<String>,
    pub reexports: Vec<ImportSpec>,
    pub exports: Vec<String>,
    header: bool,
}

impl Manifest {
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.reexports.is_empty() && self.exports.is_empty()
    }

    /// Render as the package's `mod.rs`. An empty manifest renders as an
    /// empty file.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        if self.header {
            out.push_str(&format!("//! {GENERATED_HEADER}\n\n"));
        }

        for module in &self.modules {
            out.push_str(&format!("pub mod {module};\n"));
        }
        if !self.modules.is_empty() {
            out.push('\n');
        }

        for spec in &self.reexports {
            out.push_str(&format!("pub use {spec};\n"));
        }
        if !self.reexports.is_empty() {
            out.push('\n');
        }

        out.push_str("/// Every public name of this package, sorted.\n");
        out.push_str("pub const EXPORTS: &[&str] = &[\n");
        for name in &self.exports {
            out.push_str(&format!("    \"{name}\",\n"));
        }
        out.push_str("];\n");
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct PackageAssembler {
    header: bool,
}

impl PackageAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the manifest with a generated-file header.
    pub fn header(mut self, value: bool) -> Self {
        self.header = value;
        self
    }

    /// Consume the registry and build the manifest.
    ///
    /// Specs from the same module are merged. A name re-exported from two
    /// different modules is a [`Error::DuplicateExport`].
    pub fn assemble(&self, registry: SymbolRegistry) -> Result<Manifest> {
        if registry.is_empty() {
            return Ok(Manifest::default());
        }

        let modules: BTreeSet<String> = registry
            .symbols()
            .map(|symbol| symbol.defining_module.clone())
            .chain(
                registry
                    .reexports()
                    .iter()
                    .filter(|spec| spec.relative_level > 0)
                    .map(|spec| spec.from_module.clone()),
            )
            .collect();

        let mut merged: BTreeMap<(String, u32), BTreeSet<String>> = BTreeMap::new();
        let mut owners: BTreeMap<String, String> = BTreeMap::new();
        for spec in registry.reexports() {
            let path = spec.path();
            for name in &spec.names {
                match owners.get(name) {
                    Some(owner) if *owner != path => {
                        return Err(Error::DuplicateExport {
                            name: name.clone(),
                            first: owner.clone(),
                            second: path,
                        });
                    }
                    Some(_) => {}
                    None => {
                        owners.insert(name.clone(), path.clone());
                    }
                }
            }
            merged
                .entry((spec.from_module.clone(), spec.relative_level))
                .or_default()
                .extend(spec.names.iter().cloned());
        }

        let reexports = merged
            .into_iter()
            .map(|((from_module, relative_level), names)| ImportSpec {
                from_module,
                relative_level,
                names,
            })
            .collect();

        Ok(Manifest {
            modules: modules.into_iter().collect(),
            reexports,
            exports: owners.into_keys().collect(),
            header: self.header,
        })
    }
}
