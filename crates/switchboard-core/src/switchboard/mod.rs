//! Command dispatcher façade.
//!
//! The [`Switchboard`] owns the command registry and the event channel and
//! exposes the two host-facing operations: [`Switchboard::process_command`]
//! for the synchronous request path and [`Switchboard::set_event_callback`]
//! for the asynchronous event path. Setup and serving are separate phases:
//! extensions load through `&mut self`, dispatch runs through `&self`, so a
//! switchboard shared behind an `Arc` cannot gain handlers after it started
//! serving.
//!
//! Every command yields exactly one reply on the calling path. Parse
//! failures, unknown methods, handler failures and handler panics are all
//! encoded as reply error objects; nothing unwinds past
//! [`Switchboard::process_command`] and the returned text is always a
//! well-formed envelope.
//!
//! Dispatch is blocking and offers no timeout. A handler that never returns
//! blocks its caller indefinitely; hosts needing isolation run commands on
//! their own worker threads.

use std::panic::{self, AssertUnwindSafe};

use serde_json::json;
use tracing::{debug, error, warn};

use switchboard_rpc::{
    CommandEnvelope, ErrorCode, ErrorObject, INTERNAL_ERROR_REPLY, ReplyEnvelope,
};

use crate::channel::EventChannel;
use crate::config::SwitchboardConfig;
use crate::error::{RegistryError, panic_message};
use crate::extension::{Extension, ExtensionHost};
use crate::handler::CommandHandler;
use crate::registry::CommandRegistry;

pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Synchronous command dispatcher with an attached event channel.
///
/// # Example
///
/// ```
/// use serde_json::Value;
/// use switchboard_core::Switchboard;
///
/// let mut board = Switchboard::new();
/// board
///     .register_command("echo", |params: Value| Ok(params))
///     .expect("registration succeeds");
///
/// let reply = board.process_command(r#"{"method":"echo","params":"abc","id":1}"#);
/// assert_eq!(reply, r#"{"result":"abc","id":1}"#);
/// ```
#[derive(Debug)]
pub struct Switchboard {
    registry: CommandRegistry,
    events: EventChannel,
    max_command_bytes: usize,
}

impl Default for Switchboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Switchboard {
    /// Creates a switchboard with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&SwitchboardConfig::default())
    }

    /// Creates a switchboard from host configuration.
    #[must_use]
    pub fn with_config(config: &SwitchboardConfig) -> Self {
        Self {
            registry: CommandRegistry::new(),
            events: EventChannel::new(),
            max_command_bytes: config.max_command_bytes(),
        }
    }

    /// Loads an extension, letting it register handlers and capture the
    /// event channel.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] when the extension fails to load or one of
    /// its registrations clashes with an existing command name. Loading the
    /// same extension twice fails fast on its first duplicate registration.
    pub fn load_extension(&mut self, extension: &dyn Extension) -> Result<(), RegistryError> {
        debug!(target: DISPATCH_TARGET, extension = %extension.name(), "loading extension");
        let mut host = ExtensionHost::new(&mut self.registry, self.events.clone());
        extension.load(&mut host)
    }

    /// Registers a single handler directly, outside any extension.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] for blank or duplicate command names.
    pub fn register_command(
        &mut self,
        name: impl Into<String>,
        handler: impl CommandHandler + 'static,
    ) -> Result<(), RegistryError> {
        self.registry.register(name, handler)
    }

    /// Processes one command and returns the encoded reply.
    ///
    /// The reply is always a well-formed envelope carrying either a result
    /// or an error object; this function never panics past the boundary and
    /// never returns empty text.
    #[must_use]
    pub fn process_command(&self, raw: &str) -> String {
        encode_reply(&self.dispatch(raw))
    }

    /// Installs the event delivery callback, atomically replacing any
    /// previous one.
    ///
    /// Safe to call at any time, including from inside a running handler: no
    /// lock is held across delivery, so re-entrant installation cannot
    /// deadlock.
    pub fn set_event_callback(&self, callback: impl Fn(&str) + Send + Sync + 'static) {
        self.events.install(callback);
    }

    /// Removes the event delivery callback; subsequent emissions are dropped.
    pub fn clear_event_callback(&self) {
        self.events.clear();
    }

    /// Returns a clone of the event channel for direct emission.
    #[must_use]
    pub fn events(&self) -> EventChannel {
        self.events.clone()
    }

    /// Returns the registered command names in sorted order.
    #[must_use]
    pub fn command_names(&self) -> Vec<String> {
        self.registry.command_names()
    }

    fn dispatch(&self, raw: &str) -> ReplyEnvelope {
        if raw.len() > self.max_command_bytes {
            warn!(
                target: DISPATCH_TARGET,
                size = raw.len(),
                limit = self.max_command_bytes,
                "command too large"
            );
            let error = ErrorObject::new(
                ErrorCode::InvalidRequest,
                format!(
                    "command too large: {} bytes exceeds {} byte limit",
                    raw.len(),
                    self.max_command_bytes
                ),
            );
            return ReplyEnvelope::failure(error, None);
        }

        match CommandEnvelope::parse(raw) {
            Ok(command) => self.invoke(command),
            Err(rejection) => {
                warn!(target: DISPATCH_TARGET, error = %rejection, "malformed command");
                let id = rejection.request_id().cloned();
                let error = ErrorObject::new(ErrorCode::ParseError, rejection.to_string());
                ReplyEnvelope::failure(error, id)
            }
        }
    }

    fn invoke(&self, command: CommandEnvelope) -> ReplyEnvelope {
        let (method, params, id) = command.into_parts();
        let Some(handler) = self.registry.lookup(&method) else {
            warn!(target: DISPATCH_TARGET, method = %method, "unknown command method");
            let error = ErrorObject::new(
                ErrorCode::MethodNotFound,
                format!("no handler registered for '{method}'"),
            )
            .with_data(json!({"method": method}));
            return ReplyEnvelope::failure(error, id);
        };

        debug!(target: DISPATCH_TARGET, method = %method, "dispatching command");
        match panic::catch_unwind(AssertUnwindSafe(|| handler.handle(params))) {
            Ok(Ok(result)) => ReplyEnvelope::success(result, id),
            Ok(Err(failure)) => {
                warn!(
                    target: DISPATCH_TARGET,
                    method = %method,
                    error = %failure,
                    "command handler failed"
                );
                ReplyEnvelope::failure(failure.into_error_object(), id)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(
                    target: DISPATCH_TARGET,
                    method = %method,
                    panic = %message,
                    "command handler panicked"
                );
                let error = ErrorObject::new(
                    ErrorCode::HandlerError,
                    format!("handler for '{method}' panicked: {message}"),
                );
                ReplyEnvelope::failure(error, id)
            }
        }
    }
}

/// Encodes a reply, falling back to a canned internal error on failure.
fn encode_reply(reply: &ReplyEnvelope) -> String {
    reply.to_json().unwrap_or_else(|encode_error| {
        error!(target: DISPATCH_TARGET, error = %encode_error, "failed to encode reply");
        INTERNAL_ERROR_REPLY.to_owned()
    })
}
