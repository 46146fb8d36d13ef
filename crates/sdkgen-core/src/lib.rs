#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for sdkgen.
//!
//! Two layers, both fully materialized before code generation starts:
//! - **Schema layer** (`Schema`): named type definitions with their fields,
//!   interface implementors, union members, enum values and input fields.
//! - **Document layer** (`Document`): operations and fragments, with selection
//!   sets kept in source order.
//!
//! `TypeRef` is shared by both layers. Everything here is plain data and can be
//! (de)serialized with serde, so the IR may come from the bundled GraphQL
//! frontend or from any other tool.

pub mod document;
pub mod schema;
pub mod type_ref;
pub mod utils;

#[cfg(test)]
mod document_tests;

pub use document::{
    Document, FieldSelection, Fragment, InlineFragment, Operation, OperationKind, Selection,
    VariableDefinition,
};
pub use schema::{
    BUILTIN_SCALARS, EnumDef, EnumValueDef, FieldDef, InputFieldDef, InputObjectDef,
    InterfaceDef, ObjectDef, Schema, TypeDef, TypeKind, UnionDef,
};
pub use type_ref::{TypeRef, TypeRefKind, TypeRefParseError};

/// Name of the GraphQL meta-field carrying the concrete runtime type.
pub const TYPENAME_FIELD: &str = "__typename";
