//! Fragment resolution.
//!
//! Flattens a selection set (fields, inline fragments, fragment spreads) on
//! one parent type into a [`SelectionShape`]: a base record shared by every
//! runtime type, plus one branch record per concrete type some fragment
//! narrows to.

mod resolver;
mod shape;


pub use resolver::Resolver;
pub use shape::{Branch, Record, RecordField, SelectionShape};
