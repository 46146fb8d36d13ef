//! GraphQL type references (`Int`, `[String!]!`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A GraphQL type reference with its list and nullability wrapping.
///
/// Constructors produce non-null references; call [`TypeRef::nullable`] to
/// drop the `!`. The GraphQL surface syntax is the other way around (nullable
/// unless marked), which [`TypeRef::parse`] and `Display` take care of.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    #[serde(default)]
    pub nullable: bool,
    pub kind: TypeRefKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRefKind {
    Named(String),
    List(Box<TypeRef>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeRefParseError {
    #[error("empty type reference")]
    Empty,
    #[error("unbalanced brackets in `{0}`")]
    Unbalanced(String),
    #[error("invalid type name `{0}`")]
    InvalidName(String),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            nullable: false,
            kind: TypeRefKind::Named(name.into()),
        }
    }

    pub fn list(of: TypeRef) -> Self {
        Self {
            nullable: false,
            kind: TypeRefKind::List(Box::new(of)),
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn non_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// The innermost named type, with every list wrapper removed.
    pub fn inner_name(&self) -> &str {
        match &self.kind {
            TypeRefKind::Named(name) => name,
            TypeRefKind::List(of) => of.inner_name(),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self.kind, TypeRefKind::List(_))
    }

    /// Parse GraphQL type syntax, e.g. `[Int!]`.
    pub fn parse(source: &str) -> Result<Self, TypeRefParseError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(TypeRefParseError::Empty);
        }

        let (body, nullable) = match source.strip_suffix('!') {
            Some(body) => (body.trim_end(), false),
            None => (source, true),
        };

        let type_ref = if let Some(inner) = body.strip_prefix('[') {
            let inner = inner
                .strip_suffix(']')
                .ok_or_else(|| TypeRefParseError::Unbalanced(source.to_string()))?;
            TypeRef::list(Self::parse(inner)?)
        } else {
            if body.ends_with(']') || !is_name(body) {
                return Err(TypeRefParseError::InvalidName(body.to_string()));
            }
            TypeRef::named(body)
        };

        Ok(if nullable {
            type_ref.nullable()
        } else {
            type_ref
        })
    }
}

fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeRefKind::Named(name) => f.write_str(name)?,
            TypeRefKind::List(of) => write!(f, "[{of}]")?,
        }
        if !self.nullable {
            f.write_str("!")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for TypeRef {
    type Err = TypeRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
