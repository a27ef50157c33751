//! Event channel for asynchronous host notification.
//!
//! The channel holds a single swappable delivery callback. Emission snapshots
//! the installed callback under the read side of the lock and invokes it only
//! after the lock is released: an in-flight emission uses the old or the new
//! callback wholly, never a torn mixture, and a callback that installs its
//! own replacement cannot deadlock. Delivery failures are contained here and
//! never reach the emitting extension.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{trace, warn};

use crate::error::panic_message;

pub(crate) const EVENT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::events");

/// Delivery function invoked with each emitted event.
pub type EventCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Cloneable handle to the single-slot event delivery path.
///
/// Clones share one slot: extensions receive a clone at load time and may
/// emit from any thread, while the host installs or replaces the delivery
/// callback through the dispatcher at any time.
#[derive(Clone, Default)]
pub struct EventChannel {
    slot: Arc<RwLock<Option<EventCallback>>>,
}

impl EventChannel {
    /// Creates a channel with no callback installed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a delivery callback, atomically replacing any previous one.
    pub fn install(&self, callback: impl Fn(&str) + Send + Sync + 'static) {
        self.replace(Some(Arc::new(callback)));
    }

    /// Empties the slot; subsequent emissions are dropped.
    pub fn clear(&self) {
        self.replace(None);
    }

    /// Returns `true` when a delivery callback is installed.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Delivers an event to the installed callback.
    ///
    /// With no callback installed the event is dropped silently; there is no
    /// queueing, so a callback installed later does not see earlier events.
    /// A panicking callback is contained and logged, never unwound into the
    /// emitter.
    pub fn emit(&self, event: &str) {
        let Some(delivery) = self.snapshot() else {
            trace!(target: EVENT_TARGET, "event dropped, no callback installed");
            return;
        };
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| delivery(event))) {
            warn!(
                target: EVENT_TARGET,
                panic = %panic_message(payload.as_ref()),
                "event callback panicked"
            );
        }
    }

    fn replace(&self, callback: Option<EventCallback>) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = callback;
    }

    fn snapshot(&self) -> Option<EventCallback> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("installed", &self.is_installed())
            .finish()
    }
}
