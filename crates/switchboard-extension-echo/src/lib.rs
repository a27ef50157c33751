//! Demonstration extension proving the registration contract end to end.
//!
//! [`EchoExtension`] registers two commands: `echo` returns its parameters
//! unchanged, and `reverse` reverses a string parameter while emitting a
//! fixed marker event through a retained channel clone. Hosts use it to
//! smoke-test their switchboard wiring; the crate's tests use it as the
//! reference extension.
//!
//! # Example
//!
//! ```rust
//! use switchboard_core::Switchboard;
//! use switchboard_extension_echo::EchoExtension;
//!
//! let mut board = Switchboard::new();
//! board.load_extension(&EchoExtension).expect("load echo extension");
//!
//! let reply = board.process_command(r#"{"method":"reverse","params":"abc","id":1}"#);
//! assert_eq!(reply, r#"{"result":"cba","id":1}"#);
//! ```

use serde_json::{Value, json};

use switchboard_core::{Extension, ExtensionHost, HandlerFailure, RegistryError};

/// Marker event emitted after every successful `reverse` command.
pub const REVERSE_EVENT: &str = "reverse.completed";

/// Extension registering the `echo` and `reverse` commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoExtension;

impl Extension for EchoExtension {
    fn name(&self) -> &str {
        "echo"
    }

    fn load(&self, host: &mut ExtensionHost<'_>) -> Result<(), RegistryError> {
        host.register("echo", |params: Value| Ok(params))?;

        let events = host.events();
        host.register("reverse", move |params: Value| {
            let Value::String(text) = params else {
                return Err(HandlerFailure::new("reverse expects a string parameter")
                    .with_data(json!({"expected": "string"})));
            };
            let reversed: String = text.chars().rev().collect();
            events.emit(REVERSE_EVENT);
            Ok(Value::String(reversed))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rstest::{fixture, rstest};
    use switchboard_core::Switchboard;
    use switchboard_rpc::ReplyEnvelope;

    use super::*;

    #[fixture]
    fn board() -> Switchboard {
        let mut board = Switchboard::new();
        board
            .load_extension(&EchoExtension)
            .expect("load echo extension");
        board
    }

    #[rstest]
    fn registers_both_commands(board: Switchboard) {
        assert_eq!(board.command_names(), vec!["echo", "reverse"]);
    }

    #[rstest]
    fn echo_returns_params_unchanged(board: Switchboard) {
        let reply = board.process_command(r#"{"method":"echo","params":{"a":[1,2]},"id":1}"#);
        assert_eq!(reply, r#"{"result":{"a":[1,2]},"id":1}"#);
    }

    #[rstest]
    fn reverse_reverses_and_emits_marker(board: Switchboard) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        board.set_event_callback(move |event: &str| {
            sink.lock().expect("recorder lock").push(event.to_owned());
        });

        let reply = board.process_command(r#"{"method":"reverse","params":"live","id":2}"#);
        assert_eq!(reply, r#"{"result":"evil","id":2}"#);
        assert_eq!(
            received.lock().expect("recorder lock").clone(),
            vec![REVERSE_EVENT]
        );
    }

    #[rstest]
    fn reverse_handles_multibyte_text(board: Switchboard) {
        let reply = board.process_command(r#"{"method":"reverse","params":"héllo"}"#);
        let parsed = ReplyEnvelope::parse(&reply).expect("reply parses");
        assert_eq!(parsed.result(), Some(&Value::String("olléh".into())));
    }

    #[rstest]
    fn reverse_rejects_non_string_params(board: Switchboard) {
        let reply = board.process_command(r#"{"method":"reverse","params":5,"id":3}"#);
        let parsed = ReplyEnvelope::parse(&reply).expect("reply parses");
        let error = parsed.error().expect("error object");
        assert_eq!(error.code(), -32000);
        assert!(error.message().contains("string parameter"));
        assert_eq!(error.data(), Some(&json!({"expected": "string"})));
    }

    #[rstest]
    fn reverse_failure_emits_no_event(board: Switchboard) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        board.set_event_callback(move |event: &str| {
            sink.lock().expect("recorder lock").push(event.to_owned());
        });

        drop(board.process_command(r#"{"method":"reverse","params":[]}"#));
        assert!(received.lock().expect("recorder lock").is_empty());
    }

    #[test]
    fn double_load_is_rejected() {
        let mut board = Switchboard::new();
        board
            .load_extension(&EchoExtension)
            .expect("first load succeeds");
        let err = board
            .load_extension(&EchoExtension)
            .expect_err("second load must fail");
        assert!(err.to_string().contains("already registered"));
    }
}
