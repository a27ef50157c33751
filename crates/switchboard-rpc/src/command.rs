//! Command envelope parsing.
//!
//! This module parses raw command text into a typed [`CommandEnvelope`]. The
//! envelope schema is deliberately small: a required `method` name, optional
//! `params` forwarded verbatim to the handler, and an optional `id` echoed in
//! the reply. Unknown members (such as the `jsonrpc` version marker emitted
//! by JSON-RPC clients) are ignored for forward compatibility.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Correlation id carried by a command and echoed verbatim in the reply.
///
/// Only JSON strings and integers are accepted; an id of any other JSON type
/// is treated as absent so the command can still be dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Numeric id, as produced by auto-incrementing clients.
    Number(i64),
    /// Textual id.
    Text(String),
}

impl RequestId {
    /// Extracts a request id from a JSON value.
    ///
    /// Returns `None` for JSON types the protocol does not accept as ids,
    /// including numbers with a fractional part.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().map(Self::Number),
            Value::String(text) => Some(Self::Text(text)),
            _ => None,
        }
    }
}

/// Errors surfaced while parsing command text.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Command text was empty or contained only whitespace.
    #[error("empty command text")]
    Empty,

    /// Command text could not be parsed as JSON.
    #[error("malformed command JSON: {source}")]
    MalformedJson {
        /// Underlying JSON parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// Command text parsed as JSON but the top level was not an object.
    #[error("command must be a JSON object, got {found}")]
    NotAnObject {
        /// JSON type found at the top level instead of an object.
        found: &'static str,
    },

    /// Command object carried no usable `method` member.
    #[error("command is missing a method name")]
    MissingMethod {
        /// Correlation id recovered before the rejection, kept for the reply.
        id: Option<RequestId>,
    },
}

impl EnvelopeError {
    /// Creates a malformed JSON error from a serde error.
    #[must_use]
    pub const fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedJson { source }
    }

    /// Returns the correlation id recovered before parsing failed, if any.
    ///
    /// Only [`EnvelopeError::MissingMethod`] carries one; every other failure
    /// happens before an id could be read.
    #[must_use]
    pub const fn request_id(&self) -> Option<&RequestId> {
        match self {
            Self::MissingMethod { id } => id.as_ref(),
            Self::Empty | Self::MalformedJson { .. } | Self::NotAnObject { .. } => None,
        }
    }
}

/// Parsed command received from a host.
///
/// # Example
///
/// ```
/// use switchboard_rpc::CommandEnvelope;
///
/// let command = CommandEnvelope::parse(r#"{"method":"echo","params":"abc","id":1}"#)
///     .expect("well-formed command");
/// assert_eq!(command.method(), "echo");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CommandEnvelope {
    method: String,
    params: Value,
    id: Option<RequestId>,
}

impl CommandEnvelope {
    /// Parses raw command text into an envelope.
    ///
    /// Surrounding whitespace is trimmed before parsing. Absent `params`
    /// default to JSON `null` so handlers always receive a value.
    ///
    /// # Errors
    ///
    /// Returns an [`EnvelopeError`] when the text is empty, is not valid
    /// JSON, is not a JSON object, or carries no non-blank `method` string.
    /// The missing-method rejection retains any correlation id the text
    /// carried so the reply can still echo it.
    pub fn parse(raw: &str) -> Result<Self, EnvelopeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EnvelopeError::Empty);
        }

        let value: Value =
            serde_json::from_str(trimmed).map_err(EnvelopeError::from_json_error)?;
        let found = json_kind(&value);
        let Value::Object(mut members) = value else {
            return Err(EnvelopeError::NotAnObject { found });
        };

        let id = members.remove("id").and_then(RequestId::from_value);
        let method = match members.remove("method") {
            Some(Value::String(name)) if !name.trim().is_empty() => name.trim().to_owned(),
            Some(_) | None => return Err(EnvelopeError::MissingMethod { id }),
        };
        let params = members.remove("params").unwrap_or(Value::Null);

        Ok(Self { method, params, id })
    }

    /// Returns the command method name, trimmed.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the command parameters (`null` when the command carried none).
    #[must_use]
    pub const fn params(&self) -> &Value {
        &self.params
    }

    /// Returns the correlation id, if the command carried one.
    #[must_use]
    pub const fn id(&self) -> Option<&RequestId> {
        self.id.as_ref()
    }

    /// Decomposes the envelope into its method, parameters and id.
    #[must_use]
    pub fn into_parts(self) -> (String, Value, Option<RequestId>) {
        (self.method, self.params, self.id)
    }
}

/// Names the JSON type of a value for diagnostics.
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
