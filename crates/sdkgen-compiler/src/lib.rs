#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Typed GraphQL client generator.
//!
//! Pipeline, per run:
//! 1. `frontend` - lower SDL and executable documents to the `sdkgen_core` IR
//! 2. `resolve` - flatten each selection set into base and branch records
//! 3. `typegen` - map schema type references to Rust type expressions
//! 4. `codegen` - build and render one module per operation plus the shared
//!    `fragments`, `enums`, `input_types` and `client` modules
//! 5. `package` - collect every generated symbol and assemble the `mod.rs`
//!    manifest
//!
//! [`generate`] runs steps 2-5 and returns the package in memory. Nothing is
//! written unless the caller asks for it, so a failed run leaves no output.

pub mod codegen;
pub mod config;
pub mod error;
pub mod frontend;
pub mod package;
pub mod resolve;
pub mod typegen;


pub use config::{Config, FileConfig};
pub use error::{Error, Result, Site};

use sdkgen_core::{Document, Schema};

use codegen::{ModuleGenerator, render_module};
use package::{ImportSpec, Package, PackageAssembler, RenderedModule, SymbolRegistry};

/// Runtime names every non-empty package re-exports.
const RUNTIME_EXPORTS: [&str; 3] = ["BaseClient", "ClientError", "Maybe"];

/// Generate the client package for every operation and named fragment in
/// `document`.
///
/// A document with neither yields a package with an empty manifest and no
/// modules.
pub fn generate(schema: &Schema, document: &Document, config: &Config) -> Result<Package> {
    config.validate()?;

    let mut registry = SymbolRegistry::new();
    let mut generator = ModuleGenerator::new(schema, document, config);
    let mut modules = Vec::with_capacity(document.operations.len() + 4);
    for operation in &document.operations {
        let module = generator.operation(operation)?;
        module.publish(&mut registry)?;
        modules.push(module);
    }
    if let Some(module) = generator.fragments()? {
        module.publish(&mut registry)?;
        modules.push(module);
    }

    if !modules.is_empty() {
        if let Some(module) = generator.input_types()? {
            module.publish(&mut registry)?;
            modules.push(module);
        }
        if let Some(module) = generator.enums() {
            module.publish(&mut registry)?;
            modules.push(module);
        }
        let client = generator.client();
        client.publish(&mut registry)?;
        modules.push(client);
        registry.reexport(ImportSpec::new("sdkgen_client", 0, RUNTIME_EXPORTS));
    }

    let manifest = PackageAssembler::new()
        .header(config.include_comments)
        .assemble(registry)?;

    let mut rendered: Vec<RenderedModule> = modules
        .iter()
        .map(|module| RenderedModule {
            name: module.name.clone(),
            source: render_module(module),
        })
        .collect();
    rendered.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::info!(
        package = %config.package_name,
        operations = document.operations.len(),
        fragments = document.fragments.len(),
        modules = rendered.len(),
        exports = manifest.exports.len(),
        "package generated"
    );
    Ok(Package {
        name: config.package_name.clone(),
        manifest,
        modules: rendered,
    })
}
