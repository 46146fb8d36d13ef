//! Three-state optional values for arguments and input fields.

/// A nullable input that may also be left out of the request entirely.
///
/// GraphQL treats an omitted argument differently from an explicit `null`
/// (the former lets the server apply its default), so `Option` is not enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Maybe<T> {
    /// Not sent at all.
    Missing,
    /// Sent as `null`.
    Null,
    Value(T),
}

impl<T> Maybe<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Maybe::Missing)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Maybe::Null)
    }

    pub fn as_ref(&self) -> Maybe<&T> {
        match self {
            Maybe::Missing => Maybe::Missing,
            Maybe::Null => Maybe::Null,
            Maybe::Value(value) => Maybe::Value(value),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
        match self {
            Maybe::Missing => Maybe::Missing,
            Maybe::Null => Maybe::Null,
            Maybe::Value(value) => Maybe::Value(f(value)),
        }
    }

    /// Collapse to `Option`, losing the missing/null distinction.
    pub fn value(self) -> Option<T> {
        match self {
            Maybe::Value(value) => Some(value),
            _ => None,
        }
    }
}

// Written out so `T` needs no `Default` bound.
impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Maybe::Missing
    }
}

impl<T> From<T> for Maybe<T> {
    fn from(value: T) -> Self {
        Maybe::Value(value)
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    /// `None` is an explicit null; use `Maybe::Missing` to omit the value.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Maybe::Value(value),
            None => Maybe::Null,
        }
    }
}
