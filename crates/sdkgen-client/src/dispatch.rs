//! Branch selection for polymorphic (interface/union) response objects.
//!
//! Generated enums for abstract-typed fields deserialize through
//! [`pick_branch`]: the type-name field decides when the response carries it,
//! otherwise the object's key set is matched against each branch and the base.

use serde_json::{Map, Value};

/// One concrete branch of a polymorphic selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    /// Concrete GraphQL type name, compared against the discriminator.
    pub typename: &'static str,
    /// Response keys the branch record declares.
    pub keys: &'static [&'static str],
}

impl Branch {
    pub const fn new(typename: &'static str, keys: &'static [&'static str]) -> Self {
        Self { typename, keys }
    }
}

/// The shared base record of a polymorphic selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fallback {
    /// Runtime types without a dedicated branch, in schema order.
    pub typenames: &'static [&'static str],
    /// Response keys the base record declares.
    pub keys: &'static [&'static str],
}

impl Fallback {
    pub const fn new(typenames: &'static [&'static str], keys: &'static [&'static str]) -> Self {
        Self { typenames, keys }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("expected an object for a polymorphic field, got {0}")]
    NotAnObject(&'static str),
    #[error("type name `{0}` is not a possible type of this selection")]
    UnknownType(String),
    #[error("response keys match no possible type and it carries no type name")]
    NoMatch,
    #[error("response matches several types ({0}) and carries no type name")]
    Ambiguous(String),
}

/// Pick the branch for `value`.
///
/// Returns `Some(index)` for a concrete branch and `None` for the shared base
/// record, which covers the runtime types listed in `fallback`.
///
/// With `discriminator` present in the object, the branch whose type name
/// equals it wins, a name listed in `fallback` selects the base and any other
/// name is an error. Without it, the object's keys are matched against each
/// branch and the base (the discriminator key itself is ignored on both
/// sides): exactly one match selects it, none or several is an error. When
/// that match stands for a single type, its name is written under
/// `discriminator` so the record decodes.
pub fn pick_branch(
    value: &mut Value,
    discriminator: Option<&str>,
    branches: &[Branch],
    fallback: &Fallback,
) -> Result<Option<usize>, DispatchError> {
    let Value::Object(object) = value else {
        return Err(DispatchError::NotAnObject(kind_name(value)));
    };

    if let Some(Value::String(typename)) = discriminator.and_then(|key| object.get(key)) {
        let typename = typename.as_str();
        if let Some(index) = branches.iter().position(|b| b.typename == typename) {
            return Ok(Some(index));
        }
        if fallback.typenames.iter().any(|name| *name == typename) {
            return Ok(None);
        }
        return Err(DispatchError::UnknownType(typename.to_string()));
    }

    let picked = match_keys(object, discriminator, branches, fallback)?;
    let typename = match (picked, fallback.typenames) {
        (Some(index), _) => Some(branches[index].typename),
        (None, [only]) => Some(*only),
        (None, _) => None,
    };
    if let (Some(key), Some(typename)) = (discriminator, typename) {
        object.insert(key.to_string(), Value::String(typename.to_string()));
    }
    Ok(picked)
}

fn match_keys(
    object: &Map<String, Value>,
    discriminator: Option<&str>,
    branches: &[Branch],
    fallback: &Fallback,
) -> Result<Option<usize>, DispatchError> {
    let matches = |keys: &[&str]| {
        let wanted = keys.iter().filter(|k| Some(**k) != discriminator);
        let present = object.keys().filter(|k| Some(k.as_str()) != discriminator);
        wanted.clone().count() == present.count()
            && wanted.into_iter().all(|k| object.contains_key(*k))
    };
    let mut candidates: Vec<Option<usize>> = branches
        .iter()
        .enumerate()
        .filter(|(_, branch)| matches(branch.keys))
        .map(|(index, _)| Some(index))
        .collect();
    if !fallback.typenames.is_empty() && matches(fallback.keys) {
        candidates.push(None);
    }

    match candidates.as_slice() {
        [] => Err(DispatchError::NoMatch),
        [picked] => Ok(*picked),
        several => Err(DispatchError::Ambiguous(
            several
                .iter()
                .flat_map(|picked| match picked {
                    Some(index) => std::slice::from_ref(&branches[*index].typename),
                    None => fallback.typenames,
                })
                .copied()
                .collect::<Vec<_>>()
                .join(", "),
        )),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
