//! Extension contract and load-time host surface.
//!
//! Extensions are external collaborators that plug commands into the
//! switchboard. Each extension is loaded exactly once during setup; its
//! `load` implementation registers handlers through the [`ExtensionHost`]
//! and may keep a clone of the event channel for later emission, including
//! from background threads it spawns.

use crate::channel::EventChannel;
use crate::error::RegistryError;
use crate::handler::CommandHandler;
use crate::registry::CommandRegistry;

/// Capabilities granted to an extension while it loads.
///
/// The host borrows the registry mutably for the duration of the load phase,
/// which is what keeps registration impossible once the dispatcher is shared
/// with callers.
#[derive(Debug)]
pub struct ExtensionHost<'a> {
    registry: &'a mut CommandRegistry,
    events: EventChannel,
}

impl<'a> ExtensionHost<'a> {
    pub(crate) const fn new(registry: &'a mut CommandRegistry, events: EventChannel) -> Self {
        Self { registry, events }
    }

    /// Registers a handler under the given command name.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] when the name is blank or already taken;
    /// extensions should propagate it so name clashes abort the load.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: impl CommandHandler + 'static,
    ) -> Result<(), RegistryError> {
        self.registry.register(name, handler)
    }

    /// Returns a clone of the dispatcher's event channel.
    ///
    /// The clone stays valid after loading completes, so extensions can emit
    /// long after `load` returned. Once the host clears the callback slot the
    /// clone degrades to a silent no-op.
    #[must_use]
    pub fn events(&self) -> EventChannel {
        self.events.clone()
    }
}

/// An external collaborator that plugs commands into the switchboard.
///
/// # Example
///
/// ```
/// use serde_json::{Value, json};
/// use switchboard_core::{Extension, ExtensionHost, RegistryError};
///
/// struct PingExtension;
///
/// impl Extension for PingExtension {
///     fn name(&self) -> &str {
///         "ping"
///     }
///
///     fn load(&self, host: &mut ExtensionHost<'_>) -> Result<(), RegistryError> {
///         host.register("ping", |_params: Value| Ok(json!("pong")))
///     }
/// }
/// ```
pub trait Extension {
    /// Diagnostic label used in load-phase logging and errors.
    fn name(&self) -> &str;

    /// Registers the extension's handlers and captures any channel handles.
    ///
    /// Called exactly once per extension during switchboard setup.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] when registration fails or the extension
    /// cannot initialise; the host treats either as fatal for the load.
    fn load(&self, host: &mut ExtensionHost<'_>) -> Result<(), RegistryError>;
}
