//! Request variables and the unset-stripping transform.
//!
//! Typed inputs are first lowered to an [`InputValue`] tree that can still
//! hold [`InputValue::Unset`] leaves. [`InputValue::strip_unset`] then turns
//! the tree into JSON: unset entries disappear at every depth, explicit nulls
//! stay.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use crate::Maybe;

#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    /// Omitted from the serialized payload.
    Unset,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<InputValue>),
    Object(IndexMap<String, InputValue>),
}

impl InputValue {
    /// Build an object from `(key, value)` pairs, keeping their order.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, InputValue)>,
    {
        InputValue::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Serialize to JSON, dropping every `Unset` entry.
    ///
    /// Unset object entries and unset list elements are removed; `Null` is
    /// kept. A top-level `Unset` becomes `null`, since there is no containing
    /// entry to remove.
    pub fn strip_unset(self) -> Value {
        match self {
            InputValue::Unset | InputValue::Null => Value::Null,
            InputValue::Bool(b) => Value::Bool(b),
            InputValue::Number(n) => Value::Number(n),
            InputValue::String(s) => Value::String(s),
            InputValue::List(items) => Value::Array(
                items
                    .into_iter()
                    .filter(|item| !item.is_unset())
                    .map(InputValue::strip_unset)
                    .collect(),
            ),
            InputValue::Object(entries) => Value::Object(strip_entries(entries)),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, InputValue::Unset)
    }
}

fn strip_entries(entries: IndexMap<String, InputValue>) -> Map<String, Value> {
    entries
        .into_iter()
        .filter(|(_, value)| !value.is_unset())
        .map(|(key, value)| (key, value.strip_unset()))
        .collect()
}

impl From<Value> for InputValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => InputValue::Null,
            Value::Bool(b) => InputValue::Bool(b),
            Value::Number(n) => InputValue::Number(n),
            Value::String(s) => InputValue::String(s),
            Value::Array(items) => InputValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(entries) => {
                InputValue::Object(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// Conversion of typed request values into an [`InputValue`] tree.
///
/// Generated input objects and enums implement this; implement it for your own
/// types when mapping a custom scalar to them.
pub trait IntoInput {
    fn into_input(self) -> InputValue;
}

impl IntoInput for InputValue {
    fn into_input(self) -> InputValue {
        self
    }
}

impl IntoInput for Value {
    fn into_input(self) -> InputValue {
        self.into()
    }
}

impl IntoInput for bool {
    fn into_input(self) -> InputValue {
        InputValue::Bool(self)
    }
}

impl IntoInput for String {
    fn into_input(self) -> InputValue {
        InputValue::String(self)
    }
}

impl IntoInput for &str {
    fn into_input(self) -> InputValue {
        InputValue::String(self.to_string())
    }
}

macro_rules! int_into_input {
    ($($ty:ty),*) => {
        $(
            impl IntoInput for $ty {
                fn into_input(self) -> InputValue {
                    InputValue::Number(Number::from(self))
                }
            }
        )*
    };
}

int_into_input!(i8, i16, i32, i64, u8, u16, u32, u64);

impl IntoInput for f64 {
    fn into_input(self) -> InputValue {
        // NaN and infinities have no JSON representation.
        Number::from_f64(self).map_or(InputValue::Null, InputValue::Number)
    }
}

impl IntoInput for f32 {
    fn into_input(self) -> InputValue {
        f64::from(self).into_input()
    }
}

impl<T: IntoInput> IntoInput for Option<T> {
    fn into_input(self) -> InputValue {
        match self {
            Some(value) => value.into_input(),
            None => InputValue::Null,
        }
    }
}

impl<T: IntoInput> IntoInput for Maybe<T> {
    fn into_input(self) -> InputValue {
        match self {
            Maybe::Missing => InputValue::Unset,
            Maybe::Null => InputValue::Null,
            Maybe::Value(value) => value.into_input(),
        }
    }
}

impl<T: IntoInput> IntoInput for Vec<T> {
    fn into_input(self) -> InputValue {
        InputValue::List(self.into_iter().map(IntoInput::into_input).collect())
    }
}

impl<T: IntoInput> IntoInput for Box<T> {
    fn into_input(self) -> InputValue {
        (*self).into_input()
    }
}

/// Operation variables, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    entries: IndexMap<String, InputValue>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl IntoInput) {
        self.entries.insert(name.into(), value.into_input());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl IntoInput) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&InputValue> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The JSON `variables` object sent on the wire.
    pub fn into_json(self) -> Map<String, Value> {
        strip_entries(self.entries)
    }
}

impl<K: Into<String>> FromIterator<(K, InputValue)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, InputValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
