//! Crate-level integration and BDD tests.

use serde_json::Value;

use crate::error::{HandlerFailure, RegistryError};
use crate::extension::{Extension, ExtensionHost};
use crate::switchboard::Switchboard;


/// Extension used across the crate-level tests: an echo command, a failing
/// command and an event-emitting command.
pub(crate) struct DemoExtension;

impl Extension for DemoExtension {
    fn name(&self) -> &str {
        "demo"
    }

    fn load(&self, host: &mut ExtensionHost<'_>) -> Result<(), RegistryError> {
        host.register("echo", |params: Value| Ok(params))?;
        host.register("fail", |_params: Value| {
            Err(HandlerFailure::new("boom"))
        })?;
        let events = host.events();
        host.register("chime", move |_params: Value| {
            events.emit("chime.first");
            events.emit("chime.second");
            Ok(Value::Null)
        })?;
        Ok(())
    }
}

pub(crate) fn demo_switchboard() -> Switchboard {
    let mut board = Switchboard::new();
    board
        .load_extension(&DemoExtension)
        .expect("load demo extension");
    board
}

#[test]
fn extension_commands_dispatch_end_to_end() {
    let board = demo_switchboard();
    assert_eq!(board.command_names(), vec!["chime", "echo", "fail"]);
    let reply = board.process_command(r#"{"method":"echo","params":{"k":1},"id":1}"#);
    assert_eq!(reply, r#"{"result":{"k":1},"id":1}"#);
}

#[test]
fn loading_an_extension_twice_fails_fast() {
    let mut board = demo_switchboard();
    let err = board
        .load_extension(&DemoExtension)
        .expect_err("second load must fail");
    match err {
        RegistryError::DuplicateCommand { name } => assert_eq!(name, "echo"),
        other => panic!("expected DuplicateCommand, got: {other}"),
    }
}

#[test]
fn extension_self_reported_failure_propagates() {
    struct BrokenExtension;

    impl Extension for BrokenExtension {
        fn name(&self) -> &str {
            "broken"
        }

        fn load(&self, _host: &mut ExtensionHost<'_>) -> Result<(), RegistryError> {
            Err(RegistryError::extension("broken", "missing credential"))
        }
    }

    let mut board = Switchboard::new();
    let err = board
        .load_extension(&BrokenExtension)
        .expect_err("broken extension must fail");
    assert!(err.to_string().contains("missing credential"));
    assert!(board.command_names().is_empty());
}

#[test]
fn failed_load_keeps_earlier_registrations() {
    struct HalfExtension;

    impl Extension for HalfExtension {
        fn name(&self) -> &str {
            "half"
        }

        fn load(&self, host: &mut ExtensionHost<'_>) -> Result<(), RegistryError> {
            host.register("first", |params: Value| Ok(params))?;
            host.register("first", |params: Value| Ok(params))?;
            Ok(())
        }
    }

    let mut board = Switchboard::new();
    let err = board
        .load_extension(&HalfExtension)
        .expect_err("duplicate within one load must fail");
    assert!(matches!(err, RegistryError::DuplicateCommand { .. }));
    // The first registration stands; partial loads are the host's decision.
    assert_eq!(board.command_names(), vec!["first"]);
}

#[test]
fn extension_keeps_emitting_after_load() {
    use std::sync::{Arc, Mutex};

    let board = demo_switchboard();
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    board.set_event_callback(move |event: &str| {
        sink.lock().expect("recorder lock").push(event.to_owned());
    });

    drop(board.process_command(r#"{"method":"chime"}"#));
    assert_eq!(
        received.lock().expect("recorder lock").clone(),
        vec!["chime.first", "chime.second"]
    );
}

#[test]
fn handler_failure_encodes_as_reply_error() {
    let board = demo_switchboard();
    let reply = board.process_command(r#"{"method":"fail","params":null,"id":"job-1"}"#);
    assert!(reply.contains(r#""code":-32000"#));
    assert!(reply.contains(r#""message":"boom""#));
    assert!(reply.contains(r#""id":"job-1""#));
}
