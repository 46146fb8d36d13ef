//! Generated-language type expressions.

/// A Rust type annotation, before rendering.
///
/// Build values through the constructors: they keep `Optional` from wrapping
/// `Optional` and collapse unions of fewer than two distinct variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A named type: scalar mapping, enum, input object or generated record.
    Named(String),
    /// May be null (or, in input position, absent).
    Optional(Box<TypeExpr>),
    /// One of several concrete records, rendered as a named enum.
    Union(UnionExpr),
    /// A list.
    Container(Box<TypeExpr>),
}

/// Variants of a polymorphic field, in branch declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionExpr {
    /// Name of the enum the union renders to.
    pub name: String,
    pub variants: Vec<TypeExpr>,
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    pub fn optional(inner: TypeExpr) -> Self {
        match inner {
            TypeExpr::Optional(_) => inner,
            other => TypeExpr::Optional(Box::new(other)),
        }
    }

    pub fn container(inner: TypeExpr) -> Self {
        TypeExpr::Container(Box::new(inner))
    }

    /// Union of `variants`, deduplicated in first-seen order.
    ///
    /// A single distinct variant is returned as is; no variants at all yields
    /// `Named(name)`.
    pub fn union(name: impl Into<String>, variants: impl IntoIterator<Item = TypeExpr>) -> Self {
        let mut distinct: Vec<TypeExpr> = Vec::new();
        for variant in variants {
            if !distinct.contains(&variant) {
                distinct.push(variant);
            }
        }
        match distinct.len() {
            0 => TypeExpr::Named(name.into()),
            1 => distinct.remove(0),
            _ => TypeExpr::Union(UnionExpr {
                name: name.into(),
                variants: distinct,
            }),
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, TypeExpr::Optional(_))
    }

    /// Names the expression mentions: named leaves and union variants.
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeExpr::Named(name) => out.push(name),
            TypeExpr::Optional(inner) | TypeExpr::Container(inner) => inner.collect_names(out),
            TypeExpr::Union(union) => {
                out.push(&union.name);
                for variant in &union.variants {
                    variant.collect_names(out);
                }
            }
        }
    }
}
