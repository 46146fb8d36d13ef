//! Core generator struct.

use sdkgen_core::{Document, Schema, TypeDef};

use super::naming::Names;
use super::types::{ENUMS_MODULE, INPUT_TYPES_MODULE};
use crate::Config;
use crate::package::ImportSpec;
use crate::typegen::References;

/// Names every generated module imports from, or that generated code spells
/// out, so records must not take them.
const PRELUDE: &[&str] = &[
    "Box",
    "Branch",
    "ClientError",
    "Deserialize",
    "Fallback",
    "Maybe",
    "Option",
    "Result",
    "Self",
    "String",
    "Variables",
    "Vec",
];

/// Module names the shared modules occupy.
pub(super) const SHARED_MODULES: &[&str] =
    &["client", "enums", "fragments", "input_types", "mod"];

/// Builds the syntax model of every module in one run.
///
/// Per-operation modules come first; they record which enums and input
/// objects they use so the shared `enums` and `input_types` modules emit
/// exactly those.
pub struct ModuleGenerator<'a> {
    pub(super) schema: &'a Schema,
    pub(super) document: &'a Document,
    pub(super) config: &'a Config,
    /// Shared types referenced so far in the run.
    pub(super) references: References,
}

impl<'a> ModuleGenerator<'a> {
    pub fn new(schema: &'a Schema, document: &'a Document, config: &'a Config) -> Self {
        Self {
            schema,
            document,
            config,
            references: References::default(),
        }
    }

    /// Shared types referenced by the modules generated so far.
    pub fn references(&self) -> &References {
        &self.references
    }

    /// Identifier scope for a module that may import shared types.
    ///
    /// The client struct is exported from the package root too, so no record
    /// may take its name.
    pub(super) fn module_names(&self) -> Names {
        let mut names = Names::new();
        for name in PRELUDE {
            names.reserve(*name);
        }
        names.reserve(&self.config.client_name);
        for def in self.schema.types() {
            if let TypeDef::Enum(_) | TypeDef::InputObject(_) = def {
                names.reserve(def.name());
            }
        }
        names
    }

    /// Doc text, or nothing when comments are disabled.
    pub(super) fn doc(&self, text: Option<&str>) -> Option<String> {
        if !self.config.include_comments {
            return None;
        }
        text.map(str::trim)
            .filter(|text| !text.is_empty())
            .map(String::from)
    }

    /// Generated doc text, or nothing when comments are disabled.
    pub(super) fn note(&self, text: String) -> Option<String> {
        self.config.include_comments.then_some(text)
    }

    /// Inner module doc: the generated-file header plus `summary`.
    pub(super) fn module_doc(&self, summary: String) -> Vec<String> {
        if !self.config.include_comments {
            return Vec::new();
        }
        vec![
            crate::package::GENERATED_HEADER.to_string(),
            String::new(),
            summary,
        ]
    }

    /// `use super::enums::..` and `use super::input_types::..` for `references`.
    pub(super) fn shared_imports(references: &References) -> Vec<ImportSpec> {
        let mut imports = Vec::new();
        if !references.enums.is_empty() {
            imports.push(ImportSpec::new(ENUMS_MODULE, 2, references.enums.iter()));
        }
        if !references.input_objects.is_empty() {
            imports.push(ImportSpec::new(
                INPUT_TYPES_MODULE,
                2,
                references.input_objects.iter(),
            ));
        }
        imports
    }
}
