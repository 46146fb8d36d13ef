//! Package assembly.
//!
//! - `registry` - the run's accumulator of generated symbols and re-exports
//! - `manifest` - turns the registry into the package entry module
//! - `output` - the rendered package and writing it to disk

mod manifest;
mod output;
mod registry;


pub(crate) use manifest::GENERATED_HEADER;
pub use manifest::{Manifest, PackageAssembler};
pub use output::{Package, RenderedModule};
pub use registry::{GeneratedSymbol, ImportSpec, SymbolKind, SymbolRegistry};
