//! Type-expression building and rendering.
//!
//! - `expr` - the [`TypeExpr`] tree and its normalizing constructors
//! - `builder` - `TypeRef` to `TypeExpr` with scalar mapping and reference tracking
//! - `render` - `TypeExpr` to Rust type syntax, in output or input position

mod builder;
mod expr;
mod render;


pub use builder::{References, TypeBuilder};
pub use expr::{TypeExpr, UnionExpr};
pub use render::{Position, render};
