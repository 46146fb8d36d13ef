//! Symbol registry.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Type,
    Function,
    Constant,
}

/// A name defined by one generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSymbol {
    pub name: String,
    pub kind: SymbolKind,
    pub defining_module: String,
}

/// A `use` of specific names from a module.
///
/// `relative_level` follows the package layout: 0 is an absolute path (an
/// external crate), 1 is a sibling seen from the package root (`self::m`),
/// and every further level climbs one module (`super::m`, `super::super::m`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ImportSpec {
    pub from_module: String,
    pub relative_level: u32,
    pub names: BTreeSet<String>,
}

impl ImportSpec {
    pub fn new<S: Into<String>>(
        from_module: impl Into<String>,
        relative_level: u32,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            from_module: from_module.into(),
            relative_level,
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Module path as written in a `use` item.
    pub fn path(&self) -> String {
        match self.relative_level {
            0 => self.from_module.clone(),
            1 => format!("self::{}", self.from_module),
            n => format!("{}{}", "super::".repeat(n as usize - 1), self.from_module),
        }
    }
}

impl fmt::Display for ImportSpec {
    /// `path::Name` or `path::{A, B}`, without `use` or visibility.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path();
        let names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        match names.as_slice() {
            [single] => write!(f, "{path}::{single}"),
            _ => write!(f, "{path}::{{{}}}", names.join(", ")),
        }
    }
}

/// Everything one generation run defines and re-exports.
///
/// Created per run, filled by the module generator, consumed by
/// [`PackageAssembler::assemble`](super::PackageAssembler::assemble).
#[derive(Debug, Default)]
pub struct SymbolRegistry {
    symbols: IndexMap<(String, String), GeneratedSymbol>,
    reexports: Vec<ImportSpec>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a definition. A name may appear once per module.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        kind: SymbolKind,
        module: impl Into<String>,
    ) -> Result<()> {
        let symbol = GeneratedSymbol {
            name: name.into(),
            kind,
            defining_module: module.into(),
        };
        let key = (symbol.defining_module.clone(), symbol.name.clone());
        if self.symbols.contains_key(&key) {
            return Err(Error::DuplicateSymbol {
                name: symbol.name,
                module: symbol.defining_module,
            });
        }
        self.symbols.insert(key, symbol);
        Ok(())
    }

    /// Request that the package root re-export `spec.names`.
    pub fn reexport(&mut self, spec: ImportSpec) {
        if !spec.names.is_empty() {
            self.reexports.push(spec);
        }
    }

    pub fn symbols(&self) -> impl Iterator<Item = &GeneratedSymbol> {
        self.symbols.values()
    }

    pub fn reexports(&self) -> &[ImportSpec] {
        &self.reexports
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty() && self.reexports.is_empty()
    }
}
