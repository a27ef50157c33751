//! Caller-side library for the command/event switchboard.
//!
//! The dispatcher's inbound surface is deliberately narrow: raw command text
//! in, raw reply text out, plus one event callback slot. This crate layers
//! the caller's conveniences on top. [`RpcClient`] assigns command ids,
//! serialises requests and correlates replies; [`SwitchboardClient`] adds
//! the conventional typed operations (`getValue`, `setValue`, `callAction`
//! and the listener pair); [`CommandTransport`] abstracts how the text
//! reaches a dispatcher, with [`InProcessTransport`] binding to a
//! [`Switchboard`](switchboard_core::Switchboard) in the same process.
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use serde_json::Value;
//! use switchboard_client::{InProcessTransport, RpcClient};
//! use switchboard_core::Switchboard;
//!
//! let mut board = Switchboard::new();
//! let events = board.events();
//! board
//!     .register_command("bell.ring", move |_params: Value| {
//!         events.emit(r#"{"event":"bell.rang"}"#);
//!         Ok(Value::Null)
//!     })
//!     .expect("registration succeeds");
//!
//! let client = RpcClient::new(InProcessTransport::new(Arc::new(board)));
//! let heard = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&heard);
//! client.on_event(move |event| sink.lock().expect("recorder lock").push(event.to_owned()));
//!
//! client.call("bell.ring", None).expect("ring succeeds");
//! assert_eq!(
//!     *heard.lock().expect("recorder lock"),
//!     vec![r#"{"event":"bell.rang"}"#.to_owned()],
//! );
//! ```

pub mod client;
pub mod rpc;
pub mod transport;

#[cfg(test)]
mod tests;

pub use client::SwitchboardClient;
pub use rpc::{ClientError, RpcClient};
pub use transport::{CommandTransport, EventDelivery, InProcessTransport};
