//! Errors raised by generated client methods.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default)]
    pub locations: Option<Vec<Location>>,
    #[serde(default)]
    pub path: Option<Vec<PathSegment>>,
    #[serde(default)]
    pub extensions: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(u64),
    Key(String),
}

impl GraphQLError {
    /// Read one `errors` entry. Entries without the standard shape keep their
    /// `message` text, or the raw JSON when there is none.
    pub(crate) fn from_entry(entry: Value) -> Self {
        if let Ok(error) = serde_json::from_value::<GraphQLError>(entry.clone()) {
            return error;
        }
        let message = match &entry {
            Value::String(text) => text.clone(),
            Value::Object(fields) => match fields.get("message") {
                Some(Value::String(text)) => text.clone(),
                _ => entry.to_string(),
            },
            _ => entry.to_string(),
        };
        Self {
            message,
            locations: None,
            path: None,
            extensions: None,
        }
    }
}

impl std::fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)?;
        if let Some(path) = &self.path {
            let rendered: Vec<String> = path
                .iter()
                .map(|segment| match segment {
                    PathSegment::Index(i) => i.to_string(),
                    PathSegment::Key(k) => k.clone(),
                })
                .collect();
            write!(f, " (at {})", rendered.join("."))?;
        }
        Ok(())
    }
}

/// Errors returned by generated client methods. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status.
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// The body is not a GraphQL response, or `data` does not match the
    /// generated types.
    #[error("invalid response: {reason}")]
    InvalidResponse { reason: String, body: String },

    /// The response carried one or more GraphQL errors.
    #[error("{}", render_multi(.0))]
    GraphQLMulti(Vec<GraphQLError>),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

fn render_multi(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ClientError {
    pub(crate) fn invalid(reason: impl Into<String>, body: impl Into<String>) -> Self {
        ClientError::InvalidResponse {
            reason: reason.into(),
            body: body.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn graphql_errors(&self) -> &[GraphQLError] {
        match self {
            ClientError::GraphQLMulti(errors) => errors,
            _ => &[],
        }
    }
}
