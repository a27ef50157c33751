//! Command handler contract.
//!
//! A handler is a callable bound to a command name. Handlers receive the
//! parsed `params` value and either return a result value or report a
//! [`HandlerFailure`]; both outcomes are encoded into the reply by the
//! dispatcher. The blanket implementation for closures keeps registration a
//! flat name-to-callable mapping.

use serde_json::Value;

use crate::error::HandlerFailure;

/// A callable bound to a command name.
///
/// Implementations must be `Send + Sync`: the dispatcher serves concurrent
/// callers and invokes handlers from whichever thread carried the command.
///
/// # Example
///
/// ```
/// use serde_json::{Value, json};
/// use switchboard_core::{CommandHandler, HandlerFailure};
///
/// struct Doubler;
///
/// impl CommandHandler for Doubler {
///     fn handle(&self, params: Value) -> Result<Value, HandlerFailure> {
///         params
///             .as_i64()
///             .map(|n| json!(n * 2))
///             .ok_or_else(|| HandlerFailure::new("expected an integer"))
///     }
/// }
/// ```
pub trait CommandHandler: Send + Sync {
    /// Executes the command with its parsed parameters.
    ///
    /// Absent parameters arrive as JSON `null`.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerFailure`] when the command cannot be carried out;
    /// the dispatcher encodes it into the reply instead of propagating it.
    fn handle(&self, params: Value) -> Result<Value, HandlerFailure>;
}

impl<F> CommandHandler for F
where
    F: Fn(Value) -> Result<Value, HandlerFailure> + Send + Sync,
{
    fn handle(&self, params: Value) -> Result<Value, HandlerFailure> {
        self(params)
    }
}
