use super::*;

#[test]
fn logout_message_wire_shape() {
    let json = HostMessage::LogoutRequested { timestamp: 1_700_000_000_000 }
        .to_json()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["type"], "logout_requested");
    assert_eq!(value["timestamp"], 1_700_000_000_000_i64);
    assert_eq!(value.as_object().unwrap().len(), 2);
}

#[test]
fn logout_message_decodes_from_host_json() {
    let msg: HostMessage = serde_json::from_str(r#"{"type":"logout_requested","timestamp":5}"#).unwrap();
    assert_eq!(msg, HostMessage::LogoutRequested { timestamp: 5 });
}

#[test]
fn host_auth_events_cover_both_names() {
    assert_eq!(HOST_AUTH_EVENTS, ["authTokenReady", "flutterAuthReady"]);
}

#[test]
fn detached_bridge_is_absent_and_rejects_messages() {
    let bridge = DetachedBridge;
    assert!(!bridge.is_present());
    let err = bridge
        .post_message(&HostMessage::LogoutRequested { timestamp: 0 })
        .unwrap_err();
    assert!(matches!(err, BridgeError::Unavailable));
}

#[test]
fn detached_bridge_listen_returns_inactive_registration() {
    let reg = DetachedBridge.listen(AUTH_TOKEN_READY_EVENT, std::rc::Rc::new(|_| {}));
    assert!(!reg.is_active());
}
