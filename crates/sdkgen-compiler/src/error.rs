//! Generation errors.
//!
//! Every error aborts the whole run. Resolution errors carry the operation
//! name and the response-key path of the offending selection.

use std::fmt;
use std::path::PathBuf;

/// Where a selection or input field sits: its owner plus a key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    owner: String,
    pub path: Vec<String>,
}

impl Site {
    /// The root of an operation's selection set.
    pub fn new(operation: &str) -> Self {
        Self {
            owner: format!("operation `{operation}`"),
            path: Vec::new(),
        }
    }

    /// The root of a named fragment's selection set.
    pub fn fragment(name: &str) -> Self {
        Self {
            owner: format!("fragment `{name}`"),
            path: Vec::new(),
        }
    }

    /// The fields of an input object.
    pub fn input(name: &str) -> Self {
        Self {
            owner: format!("input `{name}`"),
            path: Vec::new(),
        }
    }

    /// The site of a key nested under this one.
    pub fn child(&self, key: &str) -> Self {
        let mut path = self.path.clone();
        path.push(key.to_string());
        Self {
            owner: self.owner.clone(),
            path,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.owner)?;
        if !self.path.is_empty() {
            write!(f, " at `{}`", self.path.join("."))?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A type reference names a type the schema does not define.
    #[error("unknown type `{name}` in {site}")]
    UnresolvedType { name: String, site: Site },

    /// One response key selected with two different fields or types.
    #[error("conflicting selections for `{key}` in {site}: {reason}")]
    ConflictingField {
        key: String,
        reason: String,
        site: Site,
    },

    /// A fragment whose type condition can never match the enclosing type.
    #[error("fragment on `{target}` can never apply to `{parent}` in {site}")]
    InvalidFragmentTarget {
        target: String,
        parent: String,
        site: Site,
    },

    #[error("type `{type_name}` has no field `{field}` in {site}")]
    UnknownField {
        type_name: String,
        field: String,
        site: Site,
    },

    #[error("unknown fragment `{name}` in {site}")]
    UnknownFragment { name: String, site: Site },

    #[error("fragment `{name}` spreads itself in {site}")]
    FragmentCycle { name: String, site: Site },

    /// Two modules export the same public name.
    #[error("`{name}` is exported by both `{first}` and `{second}`")]
    DuplicateExport {
        name: String,
        first: String,
        second: String,
    },

    /// One module defines the same name twice.
    #[error("`{name}` is defined twice in module `{module}`")]
    DuplicateSymbol { name: String, module: String },

    #[error("failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for generation.
pub type Result<T> = std::result::Result<T, Error>;
