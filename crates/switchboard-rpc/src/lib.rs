//! Wire envelope types for the switchboard command protocol.
//!
//! The `switchboard-rpc` crate defines the JSON-RPC shaped envelopes exchanged
//! between a host and the command dispatcher: a [`CommandEnvelope`] carrying a
//! method name, optional parameters and an optional correlation id, and a
//! [`ReplyEnvelope`] carrying either a result or an [`ErrorObject`], never
//! both. The schema mirrors the format produced by `switchboard-client`,
//! ensuring compatibility between embedders and the dispatcher.
//!
//! Error codes follow the JSON-RPC 2.0 numbering so replies remain
//! intelligible to off-the-shelf clients; see [`ErrorCode`] for the table.

pub mod command;
pub mod reply;

pub use self::command::{CommandEnvelope, EnvelopeError, RequestId};
pub use self::reply::{ErrorCode, ErrorObject, INTERNAL_ERROR_REPLY, ReplyEnvelope};
