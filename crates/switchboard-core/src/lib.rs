//! Embedded command/event switchboard.
//!
//! The `switchboard-core` crate implements a synchronous request-response
//! dispatcher with an independent event path. Hosts hand raw command text to
//! [`Switchboard::process_command`] and always get one well-formed reply
//! back; extensions registered during the load phase supply the handlers the
//! dispatcher routes to, and push unsolicited events to the host through the
//! single-slot [`EventChannel`].
//!
//! # Architecture
//!
//! Setup and serving are distinct phases. During setup the host loads each
//! [`Extension`] exactly once; the extension registers its handlers in the
//! [`CommandRegistry`] through an [`ExtensionHost`] and may keep a clone of
//! the event channel. Registration needs `&mut Switchboard`, dispatch only
//! `&Switchboard`, so sharing the finished dispatcher (typically behind an
//! `Arc`) makes late registration unrepresentable. Dispatch failures of any
//! kind, from unparseable text to a panicking handler, are encoded as reply
//! error objects rather than raised.
//!
//! # Example
//!
//! ```rust
//! use serde_json::{Value, json};
//! use switchboard_core::Switchboard;
//!
//! let mut board = Switchboard::new();
//! board
//!     .register_command("status", |_params: Value| Ok(json!({"state": "ready"})))
//!     .expect("registration succeeds");
//!
//! let reply = board.process_command(r#"{"method":"status","id":1}"#);
//! assert_eq!(reply, r#"{"result":{"state":"ready"},"id":1}"#);
//!
//! let unknown = board.process_command(r#"{"method":"reboot"}"#);
//! assert!(unknown.contains(r#""code":-32601"#));
//! ```

pub mod channel;
pub mod config;
pub mod error;
pub mod extension;
pub mod handler;
pub mod registry;
pub mod switchboard;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use self::channel::{EventCallback, EventChannel};
pub use self::config::{LogFormat, SwitchboardConfig};
pub use self::error::{HandlerFailure, RegistryError};
pub use self::extension::{Extension, ExtensionHost};
pub use self::handler::CommandHandler;
pub use self::registry::CommandRegistry;
pub use self::switchboard::Switchboard;
