//! HTTP transport and response validation.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::{ClientError, GraphQLError, Variables};

/// A response as received from the server, before any GraphQL validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport shared by generated clients.
///
/// Cloning is cheap and clones share one connection pool, so a single client
/// can serve concurrent callers. The pool is released when the last clone is
/// dropped or closed.
#[derive(Debug, Clone)]
pub struct BaseClient {
    url: String,
    headers: HeaderMap,
    http: reqwest::Client,
}

impl BaseClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_http_client(url, reqwest::Client::new())
    }

    /// Use a preconfigured `reqwest::Client` (timeouts, proxies, TLS).
    pub fn with_http_client(url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            headers: HeaderMap::new(),
            http,
        }
    }

    /// Add a header sent with every request.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one operation. Unset variables are stripped from the payload.
    pub async fn execute(
        &self,
        query: &str,
        variables: Variables,
    ) -> Result<RawResponse, ClientError> {
        let payload = json!({
            "query": query,
            "variables": Value::Object(variables.into_json()),
        });
        tracing::debug!(url = %self.url, "executing GraphQL operation");

        let response = self
            .http
            .post(&self.url)
            .headers(self.headers.clone())
            .json(&payload)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }

    /// Validate a response and return its `data` object.
    ///
    /// Checks, in order: HTTP status, JSON shape, a `data` key, and a
    /// non-empty `errors` value (which wins even when `data` is present).
    pub fn get_data(&self, response: RawResponse) -> Result<Map<String, Value>, ClientError> {
        get_data(response)
    }

    /// Release the connection pool held by this handle.
    ///
    /// Other clones keep working; the pool closes with the last one.
    pub fn close(self) {
        tracing::debug!(url = %self.url, "closing GraphQL client");
        drop(self);
    }
}

/// Free-standing form of [`BaseClient::get_data`].
pub fn get_data(response: RawResponse) -> Result<Map<String, Value>, ClientError> {
    if !response.is_success() {
        return Err(ClientError::Http {
            status: response.status,
            body: response.body,
        });
    }

    let parsed: Value = match serde_json::from_str(&response.body) {
        Ok(value) => value,
        Err(err) => return Err(ClientError::invalid(err.to_string(), response.body)),
    };
    let Value::Object(mut root) = parsed else {
        return Err(ClientError::invalid("response is not an object", response.body));
    };

    let data = match root.remove("data") {
        Some(Value::Object(data)) => data,
        Some(Value::Null) if has_errors(&root) => Map::new(),
        Some(_) => return Err(ClientError::invalid("`data` is not an object", response.body)),
        None => return Err(ClientError::invalid("missing `data` key", response.body)),
    };

    let errors = match root.remove("errors") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries,
        Some(other) => vec![other],
    };
    if !errors.is_empty() {
        return Err(ClientError::GraphQLMulti(
            errors.into_iter().map(GraphQLError::from_entry).collect(),
        ));
    }

    Ok(data)
}

fn has_errors(root: &Map<String, Value>) -> bool {
    match root.get("errors") {
        None | Some(Value::Null) => false,
        Some(Value::Array(entries)) => !entries.is_empty(),
        Some(_) => true,
    }
}

/// Deserialize validated `data` into a generated type.
pub fn decode<T: DeserializeOwned>(data: Map<String, Value>) -> Result<T, ClientError> {
    let value = Value::Object(data);
    serde_json::from_value(value.clone())
        .map_err(|err| ClientError::invalid(err.to_string(), value.to_string()))
}
