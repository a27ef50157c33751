//! Transport abstraction between a client and a dispatcher.
//!
//! The trait mirrors the dispatcher's inbound surface seen from the caller's
//! side: one synchronous command exchange and one event callback slot. The
//! production implementation is [`InProcessTransport`], which binds the
//! client to a dispatcher in the same process; tests inject a mock instead.

use std::sync::Arc;

use switchboard_core::Switchboard;

/// Boxed delivery function handed to a transport.
pub type EventDelivery = Box<dyn Fn(&str) + Send + Sync>;

/// Carries commands to a dispatcher and replies back.
pub trait CommandTransport {
    /// Sends one encoded command and returns the encoded reply.
    fn process_command(&self, raw: &str) -> String;

    /// Installs the event delivery callback, replacing any previous one.
    fn set_event_callback(&self, delivery: EventDelivery);
}

/// Transport bound to a [`Switchboard`] in the same process.
#[derive(Debug, Clone)]
pub struct InProcessTransport {
    switchboard: Arc<Switchboard>,
}

impl InProcessTransport {
    /// Creates a transport over a shared dispatcher.
    #[must_use]
    pub const fn new(switchboard: Arc<Switchboard>) -> Self {
        Self { switchboard }
    }
}

impl CommandTransport for InProcessTransport {
    fn process_command(&self, raw: &str) -> String {
        self.switchboard.process_command(raw)
    }

    fn set_event_callback(&self, delivery: EventDelivery) {
        self.switchboard.set_event_callback(delivery);
    }
}
