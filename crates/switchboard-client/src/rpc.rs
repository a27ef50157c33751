//! Low-level JSON-RPC command client.
//!
//! [`RpcClient`] owns the envelope mechanics: it assigns monotonically
//! increasing command ids, serialises the JSON-RPC request, hands it to the
//! transport and decodes the reply, correlating the echoed id against the
//! one it sent. Higher-level surfaces such as
//! [`SwitchboardClient`](crate::SwitchboardClient) build on [`RpcClient::call`].

use std::sync::atomic::{AtomicI64, Ordering};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use switchboard_rpc::{EnvelopeError, ReplyEnvelope, RequestId};

use crate::transport::CommandTransport;

pub(crate) const CLIENT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::rpc");

/// Errors surfaced on the client side of a command exchange.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The command could not be encoded for transport.
    #[error("failed to encode command: {0}")]
    EncodeCommand(#[source] serde_json::Error),

    /// The reply text was not a well-formed envelope.
    #[error("malformed reply: {0}")]
    MalformedReply(#[source] EnvelopeError),

    /// The dispatcher answered with an error object.
    #[error("command failed with code {code}: {message}")]
    Rpc {
        /// Wire error code.
        code: i64,
        /// Failure description from the dispatcher or handler.
        message: String,
        /// Structured detail, when the handler attached any.
        data: Option<Value>,
    },

    /// The reply's correlation id did not match the command's.
    #[error("reply id mismatch: sent {sent}, received {received:?}")]
    IdMismatch {
        /// Id assigned to the command.
        sent: i64,
        /// Id found in the reply, if any.
        received: Option<RequestId>,
    },

    /// The reply carried neither a result nor an error object.
    #[error("reply carried neither result nor error")]
    EmptyReply,
}

/// JSON-RPC request as put on the wire.
#[derive(Debug, Serialize)]
struct OutboundCommand<'a> {
    jsonrpc: &'static str,
    id: i64,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
}

/// Client assigning command ids and decoding replies over a transport.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use serde_json::{Value, json};
/// use switchboard_client::{InProcessTransport, RpcClient};
/// use switchboard_core::Switchboard;
///
/// let mut board = Switchboard::new();
/// board
///     .register_command("echo", |params: Value| Ok(params))
///     .expect("registration succeeds");
///
/// let client = RpcClient::new(InProcessTransport::new(Arc::new(board)));
/// let result = client.call("echo", Some(json!("abc"))).expect("echo succeeds");
/// assert_eq!(result, json!("abc"));
/// ```
#[derive(Debug)]
pub struct RpcClient<T> {
    transport: T,
    next_id: AtomicI64,
}

impl<T: CommandTransport> RpcClient<T> {
    /// Creates a client over the given transport. Ids start at 1.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            next_id: AtomicI64::new(1),
        }
    }

    /// Sends one command and returns its id together with the raw reply text.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::EncodeCommand`] when the command cannot be
    /// serialised.
    pub fn send_command(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> Result<(i64, String), ClientError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let command = OutboundCommand {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        let raw = serde_json::to_string(&command).map_err(ClientError::EncodeCommand)?;
        debug!(target: CLIENT_TARGET, method, id, "sending command");
        Ok((id, self.transport.process_command(&raw)))
    }

    /// Sends one command and decodes the reply into its result value.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rpc`] when the dispatcher answered with an
    /// error object, [`ClientError::MalformedReply`] when the reply text
    /// does not parse, and [`ClientError::IdMismatch`] when the echoed id
    /// differs from the one sent.
    pub fn call(&self, method: &str, params: Option<Value>) -> Result<Value, ClientError> {
        let (sent, raw) = self.send_command(method, params)?;
        let reply = ReplyEnvelope::parse(&raw).map_err(ClientError::MalformedReply)?;
        decode_reply(sent, &reply)
    }

    /// Installs the event delivery callback on the underlying transport.
    pub fn on_event(&self, delivery: impl Fn(&str) + Send + Sync + 'static) {
        self.transport.set_event_callback(Box::new(delivery));
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }
}

fn decode_reply(sent: i64, reply: &ReplyEnvelope) -> Result<Value, ClientError> {
    if let Some(error) = reply.error() {
        return Err(ClientError::Rpc {
            code: error.code(),
            message: error.message().to_owned(),
            data: error.data().cloned(),
        });
    }
    match reply.id() {
        Some(&RequestId::Number(received)) if received == sent => {}
        other => {
            return Err(ClientError::IdMismatch {
                sent,
                received: other.cloned(),
            });
        }
    }
    reply.result().cloned().ok_or(ClientError::EmptyReply)
}
