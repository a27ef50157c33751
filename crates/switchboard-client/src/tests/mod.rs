//! Cross-module tests exercising a client against a live dispatcher.
//!
//! Unit tests inside `rpc` and `client` isolate the envelope mechanics with
//! a mocked transport; the tests here wire a real [`Switchboard`] behind an
//! [`InProcessTransport`] and drive it through the public client surface.

use std::sync::{Arc, Mutex};

use rstest::{fixture, rstest};
use serde_json::{Value, json};

use switchboard_core::Switchboard;
use switchboard_extension_echo::{EchoExtension, REVERSE_EVENT};

use crate::rpc::ClientError;
use crate::transport::{CommandTransport, InProcessTransport};
use crate::{RpcClient, SwitchboardClient};

/// Dispatcher with the echo extension loaded.
fn echo_board() -> Arc<Switchboard> {
    let mut board = Switchboard::new();
    board
        .load_extension(&EchoExtension)
        .expect("load echo extension");
    Arc::new(board)
}

#[fixture]
fn echo_client() -> RpcClient<InProcessTransport> {
    RpcClient::new(InProcessTransport::new(echo_board()))
}

/// Client over a dispatcher whose handlers return their parameters
/// unchanged, so every assertion sees exactly what the client sent.
fn reflecting_client() -> SwitchboardClient<InProcessTransport> {
    let mut board = Switchboard::new();
    for name in [
        "getValue",
        "setValue",
        "callAction",
        "addEventListener",
        "removeEventListener",
    ] {
        board
            .register_command(name, |params: Value| Ok(params))
            .expect("registration succeeds");
    }
    SwitchboardClient::new(InProcessTransport::new(Arc::new(board)))
}

fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) + Send + Sync + 'static) {
    let recorded = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&recorded);
    let callback = move |event: &str| {
        sink.lock().expect("recorder lock").push(event.to_owned());
    };
    (recorded, callback)
}

// ---- RpcClient over a live dispatcher ----

#[rstest]
fn echo_round_trips_through_the_client(echo_client: RpcClient<InProcessTransport>) {
    let result = echo_client
        .call("echo", Some(json!({"n": 1})))
        .expect("echo succeeds");
    assert_eq!(result, json!({"n": 1}));
}

#[rstest]
fn reverse_round_trips_through_the_client(echo_client: RpcClient<InProcessTransport>) {
    let result = echo_client
        .call("reverse", Some(json!("switchboard")))
        .expect("reverse succeeds");
    assert_eq!(result, json!("draobhctiws"));
}

#[rstest]
fn reply_ids_track_the_client_counter(echo_client: RpcClient<InProcessTransport>) {
    let (first_id, first_reply) = echo_client.send_command("echo", None).expect("first echo");
    let (second_id, second_reply) = echo_client.send_command("echo", None).expect("second echo");
    assert_eq!((first_id, first_reply.as_str()), (1, r#"{"result":null,"id":1}"#));
    assert_eq!((second_id, second_reply.as_str()), (2, r#"{"result":null,"id":2}"#));
}

#[rstest]
fn transport_accessor_reaches_the_dispatcher(echo_client: RpcClient<InProcessTransport>) {
    let reply = echo_client
        .transport()
        .process_command(r#"{"method":"echo","params":"raw","id":99}"#);
    assert_eq!(reply, r#"{"result":"raw","id":99}"#);
}

#[rstest]
fn reverse_event_reaches_the_client_callback(echo_client: RpcClient<InProcessTransport>) {
    let (recorded, callback) = recorder();
    echo_client.on_event(callback);

    echo_client
        .call("reverse", Some(json!("ab")))
        .expect("reverse succeeds");

    assert_eq!(*recorded.lock().expect("recorder lock"), vec![REVERSE_EVENT]);
}

#[rstest]
fn handler_rejection_surfaces_as_rpc_error(echo_client: RpcClient<InProcessTransport>) {
    let err = echo_client
        .call("reverse", Some(json!(5)))
        .expect_err("reverse must reject a number");
    match err {
        ClientError::Rpc { code, message, data } => {
            assert_eq!(code, -32000);
            assert!(message.contains("string"));
            assert_eq!(data, Some(json!({"expected": "string"})));
        }
        other => panic!("expected Rpc error, got: {other}"),
    }
}

#[rstest]
fn unknown_method_surfaces_as_rpc_error(echo_client: RpcClient<InProcessTransport>) {
    let err = echo_client
        .call("shout", None)
        .expect_err("unknown method must fail");
    assert!(matches!(err, ClientError::Rpc { code: -32601, .. }));
}

// ---- SwitchboardClient operation shapes ----

#[rstest]
fn get_value_parameters_reach_the_handler_intact() {
    let received = reflecting_client()
        .get_value("mixer", "outputGain")
        .expect("getValue succeeds");
    assert_eq!(received, json!({"objectURI": "mixer", "key": "outputGain"}));
}

#[rstest]
fn set_value_parameters_reach_the_handler_intact() {
    let received = reflecting_client()
        .set_value("mixer", "outputGain", json!(0.25))
        .expect("setValue succeeds");
    assert_eq!(
        received,
        json!({"objectURI": "mixer", "key": "outputGain", "value": 0.25}),
    );
}

#[rstest]
fn call_action_parameters_reach_the_handler_intact() {
    let received = reflecting_client()
        .call_action("player", "start", json!({"loop": true}))
        .expect("callAction succeeds");
    assert_eq!(
        received,
        json!({"objectURI": "player", "actionName": "start", "params": {"loop": true}}),
    );
}

#[rstest]
fn listener_parameters_reach_the_handler_intact() {
    let client = reflecting_client();
    let added = client
        .add_event_listener("recorder", "clipped")
        .expect("addEventListener succeeds");
    let removed = client
        .remove_event_listener("recorder", 7)
        .expect("removeEventListener succeeds");
    assert_eq!(added, json!({"objectURI": "recorder", "eventName": "clipped"}));
    assert_eq!(removed, json!({"objectURI": "recorder", "listenerID": 7}));
}

#[rstest]
fn listener_id_crosses_the_wire_as_a_number() {
    let removed = reflecting_client()
        .remove_event_listener("*", 7)
        .expect("removeEventListener succeeds");
    let listener_id = removed.get("listenerID").expect("listenerID member");
    assert!(listener_id.is_number(), "listenerID was: {listener_id}");
}

#[rstest]
fn typed_client_observes_events() {
    let client = SwitchboardClient::new(InProcessTransport::new(echo_board()));
    let (recorded, callback) = recorder();
    client.on_event(callback);

    client
        .rpc()
        .call("reverse", Some(json!("ab")))
        .expect("reverse succeeds");

    assert_eq!(*recorded.lock().expect("recorder lock"), vec![REVERSE_EVENT]);
}
