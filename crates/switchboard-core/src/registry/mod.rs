//! Command registry for handler storage and lookup.
//!
//! The [`CommandRegistry`] stores handlers keyed by command name. It is
//! populated during the load phase and read-only afterwards: registration
//! needs `&mut self` while lookup takes `&self`, so a registry shared behind
//! the dispatcher cannot gain late entries. Duplicate registrations for the
//! same command name are rejected.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::RegistryError;
use crate::handler::CommandHandler;

pub(crate) const REGISTRY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::registry");

/// Registry of command handlers keyed by name.
///
/// # Example
///
/// ```
/// use serde_json::Value;
/// use switchboard_core::CommandRegistry;
///
/// let mut registry = CommandRegistry::new();
/// registry
///     .register("echo", |params: Value| Ok(params))
///     .expect("registration succeeds");
/// assert!(registry.lookup("echo").is_some());
/// ```
#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under the given command name.
    ///
    /// The name is stored trimmed, matching how inbound method names are
    /// parsed.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::BlankCommandName`] when the name is empty or
    /// whitespace, and [`RegistryError::DuplicateCommand`] when a handler is
    /// already registered under it. Registration fails fast so name clashes
    /// surface at load time rather than shadowing silently.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: impl CommandHandler + 'static,
    ) -> Result<(), RegistryError> {
        let raw = name.into();
        let command = raw.trim();
        if command.is_empty() {
            return Err(RegistryError::BlankCommandName);
        }
        if self.handlers.contains_key(command) {
            return Err(RegistryError::duplicate_command(command));
        }
        debug!(target: REGISTRY_TARGET, command = %command, "registered command handler");
        self.handlers.insert(command.to_owned(), Arc::new(handler));
        Ok(())
    }

    /// Looks up the handler registered under a command name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn CommandHandler>> {
        self.handlers.get(name)
    }

    /// Returns the registered command names in sorted order.
    #[must_use]
    pub fn command_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` when no commands are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.command_names())
            .finish()
    }
}
