//! Domain errors raised during extension loading and handler execution.
//!
//! Load-phase failures use `thiserror`-derived types with structured context
//! so hosts can inspect the failure programmatically and abort startup.
//! Handler failures are a separate type because they are never raised past
//! the dispatch boundary: the switchboard converts them into reply error
//! objects instead.

use std::any::Any;

use serde_json::Value;
use switchboard_rpc::{ErrorCode, ErrorObject};
use thiserror::Error;

/// Errors arising while populating the command registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A handler is already registered under the requested command name.
    #[error("command '{name}' is already registered")]
    DuplicateCommand {
        /// Name that clashed.
        name: String,
    },

    /// The requested command name was empty or contained only whitespace.
    #[error("command name is empty or blank")]
    BlankCommandName,

    /// An extension reported a failure of its own during `load`.
    #[error("extension '{name}' failed to load: {message}")]
    Extension {
        /// Extension that failed.
        name: String,
        /// Human-readable failure description.
        message: String,
    },
}

impl RegistryError {
    /// Creates a duplicate-command error.
    #[must_use]
    pub fn duplicate_command(name: impl Into<String>) -> Self {
        Self::DuplicateCommand { name: name.into() }
    }

    /// Creates an extension load error.
    #[must_use]
    pub fn extension(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extension {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Failure reported by a command handler.
///
/// The message travels verbatim in the reply's `error.message` member and the
/// optional detail in `error.data`, so handlers control exactly what their
/// callers see.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HandlerFailure {
    message: String,
    data: Option<Value>,
}

impl HandlerFailure {
    /// Creates a failure with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }

    /// Attaches structured detail forwarded in the reply's `error.data`.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the structured detail, if any was attached.
    #[must_use]
    pub const fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Converts the failure into a wire error object.
    #[must_use]
    pub fn into_error_object(self) -> ErrorObject {
        let Self { message, data } = self;
        let mut error = ErrorObject::new(ErrorCode::HandlerError, message);
        if let Some(detail) = data {
            error = error.with_data(detail);
        }
        error
    }
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_owned()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "opaque panic payload".to_owned()
    }
}
