//! Rendering type expressions as Rust type syntax.

use super::TypeExpr;

/// Where a type appears.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// Response records: nullable is `Option<T>`.
    Output,
    /// Variables and input-object fields: the outermost nullable layer is
    /// `Maybe<T>` so "absent" and "null" stay distinct. Nested ones (list
    /// elements) are `Option<T>`, since a list element cannot be absent.
    Input,
}

pub fn render(expr: &TypeExpr, position: Position) -> String {
    match (expr, position) {
        (TypeExpr::Optional(inner), Position::Input) => {
            format!("Maybe<{}>", render(inner, Position::Output))
        }
        (TypeExpr::Optional(inner), Position::Output) => {
            format!("Option<{}>", render(inner, Position::Output))
        }
        (TypeExpr::Container(inner), _) => format!("Vec<{}>", render(inner, Position::Output)),
        (TypeExpr::Named(name), _) => name.clone(),
        (TypeExpr::Union(union), _) => union.name.clone(),
    }
}
