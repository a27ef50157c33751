//! Reply envelope construction and encoding.
//!
//! A reply carries either a `result` or an `error` object, never both; the
//! constructors enforce the exclusivity so every encoded reply is well
//! formed. The correlation id from the originating command is echoed when
//! one was present and omitted otherwise.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::{EnvelopeError, RequestId};

/// Fallback reply text used when encoding a reply fails.
///
/// The literal is itself a well-formed error reply so the dispatcher can
/// honour its contract of always returning an envelope.
pub const INTERNAL_ERROR_REPLY: &str =
    r#"{"error":{"code":-32603,"message":"reply serialisation failed"}}"#;

/// Dispatch failure classification carried in the `error.code` member.
///
/// The numbering follows the JSON-RPC 2.0 convention so replies remain
/// intelligible to standard clients. `HandlerError` sits in the
/// server-defined range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Command text could not be parsed into an envelope (-32700).
    ParseError,
    /// Command was structurally valid but not acceptable, for example
    /// oversized (-32600).
    InvalidRequest,
    /// No handler is registered for the requested method (-32601).
    MethodNotFound,
    /// The handler reported a failure or panicked (-32000).
    HandlerError,
    /// The dispatcher itself failed while producing the reply (-32603).
    InternalError,
}

impl ErrorCode {
    /// Returns the wire value for this code.
    #[must_use]
    pub const fn value(self) -> i64 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::HandlerError => -32000,
            Self::InternalError => -32603,
        }
    }

    /// Classifies a wire value, returning `None` for codes outside the table.
    #[must_use]
    pub const fn from_value(code: i64) -> Option<Self> {
        match code {
            -32700 => Some(Self::ParseError),
            -32600 => Some(Self::InvalidRequest),
            -32601 => Some(Self::MethodNotFound),
            -32000 => Some(Self::HandlerError),
            -32603 => Some(Self::InternalError),
            _ => None,
        }
    }
}

/// Structured error carried by a failed reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    code: i64,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl ErrorObject {
    /// Creates an error object from a classified code and message.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.value(),
            message: message.into(),
            data: None,
        }
    }

    /// Attaches structured detail to the error.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Returns the raw wire code.
    #[must_use]
    pub const fn code(&self) -> i64 {
        self.code
    }

    /// Classifies the wire code against the dispatch taxonomy.
    #[must_use]
    pub const fn error_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_value(self.code)
    }

    /// Returns the human-readable failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the structured detail, if any was attached.
    #[must_use]
    pub const fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }
}

/// Encoded outcome of one dispatched command.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use switchboard_rpc::{ReplyEnvelope, RequestId};
///
/// let reply = ReplyEnvelope::success(json!("abc"), Some(RequestId::Number(1)));
/// assert_eq!(reply.to_json().expect("encode"), r#"{"result":"abc","id":1}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ErrorObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<RequestId>,
}

impl ReplyEnvelope {
    /// Creates a successful reply wrapping the handler's result.
    ///
    /// A `null` result is preserved: the encoded reply then carries an
    /// explicit `"result":null` member.
    #[must_use]
    pub const fn success(result: Value, id: Option<RequestId>) -> Self {
        Self {
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Creates a failed reply wrapping the given error object.
    #[must_use]
    pub const fn failure(error: ErrorObject, id: Option<RequestId>) -> Self {
        Self {
            result: None,
            error: Some(error),
            id,
        }
    }

    /// Returns `true` when the reply carries a result rather than an error.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_some()
    }

    /// Returns the result value of a successful reply.
    #[must_use]
    pub const fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Returns the error object of a failed reply.
    #[must_use]
    pub const fn error(&self) -> Option<&ErrorObject> {
        self.error.as_ref()
    }

    /// Returns the echoed correlation id, if the command carried one.
    #[must_use]
    pub const fn id(&self) -> Option<&RequestId> {
        self.id.as_ref()
    }

    /// Encodes the reply as a single JSON text blob.
    ///
    /// # Errors
    ///
    /// Returns the underlying serde error when encoding fails; callers that
    /// must always produce text fall back to [`INTERNAL_ERROR_REPLY`].
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses reply text received from a dispatcher.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::MalformedJson`] when the text is not a valid
    /// reply envelope.
    pub fn parse(raw: &str) -> Result<Self, EnvelopeError> {
        serde_json::from_str(raw.trim()).map_err(EnvelopeError::from_json_error)
    }
}
