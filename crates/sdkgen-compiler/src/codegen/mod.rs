//! Module generation.
//!
//! - `items` - the syntax model of a generated module
//! - `generator` - [`ModuleGenerator`], split across `operation` (one module
//!   per operation), `fragment` (the shared `fragments` module) and `types`
//!   (the shared `enums`, `input_types` and `client` modules)
//! - `naming` - collision-free identifiers within a module
//! - `render` - syntax model to Rust source

mod fragment;
mod generator;
mod items;
mod naming;
mod operation;
mod render;
mod types;

#[cfg(test)]
mod fragment_tests;
#[cfg(test)]
mod naming_tests;

pub use fragment::FRAGMENTS_MODULE;
pub use generator::ModuleGenerator;
pub use items::{
    CLIENT_MODULE, ClientDecl, ConstDecl, DispatchDecl, DispatchVariant, EnumDecl, EnumValue,
    Field, InputDecl, Item, MethodDecl, Module, Param, StructDecl,
};
pub use render::render_module;
pub use types::{ENUMS_MODULE, INPUT_TYPES_MODULE};
