//! Typed operations over the command protocol.
//!
//! [`SwitchboardClient`] wraps an [`RpcClient`] and exposes the switchboard's
//! conventional operations as methods. Each method assembles the wire
//! parameter object for its command; the field names are part of the
//! protocol and must not drift.

use serde_json::{Value, json};

use crate::rpc::{ClientError, RpcClient};
use crate::transport::CommandTransport;

/// High-level client for the switchboard command set.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use serde_json::{Value, json};
/// use switchboard_client::{InProcessTransport, SwitchboardClient};
/// use switchboard_core::Switchboard;
///
/// let mut board = Switchboard::new();
/// board
///     .register_command("getValue", |params: Value| {
///         let key = params
///             .get("key")
///             .and_then(|key| key.as_str())
///             .unwrap_or_default();
///         Ok(json!({ "key": key, "value": 0.5 }))
///     })
///     .expect("registration succeeds");
///
/// let client = SwitchboardClient::new(InProcessTransport::new(Arc::new(board)));
/// let reply = client
///     .get_value("mixer", "outputGain")
///     .expect("getValue succeeds");
/// assert_eq!(reply, json!({ "key": "outputGain", "value": 0.5 }));
/// ```
#[derive(Debug)]
pub struct SwitchboardClient<T> {
    rpc: RpcClient<T>,
}

impl<T: CommandTransport> SwitchboardClient<T> {
    /// Creates a client over the given transport.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self {
            rpc: RpcClient::new(transport),
        }
    }

    /// Reads the value stored under `key` on the addressed object.
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] from the exchange.
    pub fn get_value(&self, object_uri: &str, key: &str) -> Result<Value, ClientError> {
        self.rpc.call(
            "getValue",
            Some(json!({ "objectURI": object_uri, "key": key })),
        )
    }

    /// Writes `value` under `key` on the addressed object.
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] from the exchange.
    pub fn set_value(
        &self,
        object_uri: &str,
        key: &str,
        value: Value,
    ) -> Result<Value, ClientError> {
        self.rpc.call(
            "setValue",
            Some(json!({ "objectURI": object_uri, "key": key, "value": value })),
        )
    }

    /// Invokes the named action on the addressed object.
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] from the exchange.
    pub fn call_action(
        &self,
        object_uri: &str,
        action_name: &str,
        params: Value,
    ) -> Result<Value, ClientError> {
        self.rpc.call(
            "callAction",
            Some(json!({
                "objectURI": object_uri,
                "actionName": action_name,
                "params": params,
            })),
        )
    }

    /// Subscribes to `event_name` on the addressed object.
    ///
    /// Returns whatever the dispatcher's handler answers, conventionally a
    /// numeric listener id usable with [`Self::remove_event_listener`].
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] from the exchange.
    pub fn add_event_listener(
        &self,
        object_uri: &str,
        event_name: &str,
    ) -> Result<Value, ClientError> {
        self.rpc.call(
            "addEventListener",
            Some(json!({ "objectURI": object_uri, "eventName": event_name })),
        )
    }

    /// Cancels the subscription identified by `listener_id`.
    ///
    /// The id is the number minted by [`Self::add_event_listener`] and
    /// travels as a JSON number.
    ///
    /// # Errors
    ///
    /// Propagates any [`ClientError`] from the exchange.
    pub fn remove_event_listener(
        &self,
        object_uri: &str,
        listener_id: i64,
    ) -> Result<Value, ClientError> {
        self.rpc.call(
            "removeEventListener",
            Some(json!({ "objectURI": object_uri, "listenerID": listener_id })),
        )
    }

    /// Installs the event delivery callback on the underlying transport.
    pub fn on_event(&self, delivery: impl Fn(&str) + Send + Sync + 'static) {
        self.rpc.on_event(delivery);
    }

    /// Returns the underlying command client.
    #[must_use]
    pub const fn rpc(&self) -> &RpcClient<T> {
        &self.rpc
    }
}
