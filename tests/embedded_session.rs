//! End-to-end sessions through the public API, with in-memory collaborators.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dual_signin::auth::reconciler::{AuthReconciler, Collaborators, SignIn};
use dual_signin::auth::user::NormalizedUser;
use dual_signin::net::bridge::{BridgeError, HostBridge, HostEventHandler, HostMessage};
use dual_signin::net::registration::Registration;
use dual_signin::net::storage::{ACCESS_TOKEN_KEY, KeyValueStore, MemoryStore, USER_INFO_KEY};
use dual_signin::state::auth::{AuthLifecycle, EnvironmentMode};

/// Host channel that records posted JSON and keeps one handler per event.
#[derive(Default)]
struct RecordingBridge {
    present: Cell<bool>,
    posted: RefCell<Vec<String>>,
    handlers: Rc<RefCell<Vec<(String, HostEventHandler)>>>,
}

impl RecordingBridge {
    fn fire(&self, event: &str, detail: serde_json::Value) {
        let matching: Vec<HostEventHandler> = self
            .handlers
            .borrow()
            .iter()
            .filter(|(name, _)| name == event)
            .map(|(_, h)| h.clone())
            .collect();
        for handler in matching {
            handler(Some(detail.clone()));
        }
    }
}

impl HostBridge for RecordingBridge {
    fn is_present(&self) -> bool {
        self.present.get()
    }

    fn post_message(&self, message: &HostMessage) -> Result<(), BridgeError> {
        self.posted.borrow_mut().push(message.to_json()?);
        Ok(())
    }

    fn listen(&self, event: &str, handler: HostEventHandler) -> Registration {
        self.handlers.borrow_mut().push((event.to_owned(), handler));
        let handlers = self.handlers.clone();
        let event = event.to_owned();
        Registration::new(move || handlers.borrow_mut().retain(|(name, _)| *name != event))
    }
}

struct Session {
    bridge: Rc<RecordingBridge>,
    local: Rc<MemoryStore>,
    session: Rc<MemoryStore>,
    reconciler: AuthReconciler,
}

fn open(bridge_present: bool, local_entries: &[(&str, &str)]) -> Session {
    let bridge = Rc::new(RecordingBridge::default());
    bridge.present.set(bridge_present);
    let local = Rc::new(MemoryStore::with_entries(local_entries.iter().copied()));
    let session = Rc::new(MemoryStore::with_entries([("nonce", "n-1")]));

    let mut env = Collaborators::detached();
    env.bridge = bridge.clone();
    env.local = local.clone();
    env.session = session.clone();

    let reconciler = AuthReconciler::new(env.clone(), &env.detector(), Rc::new(|_| {}));
    if let Some(init) = reconciler.mount() {
        futures::executor::block_on(init);
    }
    Session { bridge, local, session, reconciler }
}

#[test]
fn stored_user_without_verified_flag_restores_as_verified() {
    let s = open(
        false,
        &[(USER_INFO_KEY, r#"{"id":"u1","name":"Ann","email":"a@x.com","picture":"http://x/p.png"}"#)],
    );
    assert_eq!(s.reconciler.mode(), EnvironmentMode::Standalone);

    // Without the token or bridge the page is standalone and ignores user_info.
    assert_eq!(s.reconciler.state().lifecycle, AuthLifecycle::SignedOut);

    let s = open(
        true,
        &[(USER_INFO_KEY, r#"{"id":"u1","name":"Ann","email":"a@x.com","picture":"http://x/p.png"}"#)],
    );
    assert_eq!(
        s.reconciler.state().lifecycle,
        AuthLifecycle::SignedIn(NormalizedUser {
            id: "u1".to_owned(),
            display_name: Some("Ann".to_owned()),
            email: Some("a@x.com".to_owned()),
            avatar_url: Some("http://x/p.png".to_owned()),
            email_verified: true,
        })
    );
}

#[test]
fn plain_browser_without_backend_user_is_signed_out() {
    let s = open(false, &[]);
    assert_eq!(s.reconciler.mode(), EnvironmentMode::Standalone);
    assert_eq!(s.reconciler.state().lifecycle, AuthLifecycle::SignedOut);
}

#[test]
fn malformed_user_info_signs_out_and_clears_keys() {
    let s = open(false, &[(ACCESS_TOKEN_KEY, "tok"), (USER_INFO_KEY, "{\"id\":")]);
    assert_eq!(s.reconciler.mode(), EnvironmentMode::Embedded);
    assert_eq!(s.reconciler.state().lifecycle, AuthLifecycle::SignedOut);
    assert!(s.local.get(ACCESS_TOKEN_KEY).is_none());
    assert!(s.local.get(USER_INFO_KEY).is_none());
}

#[test]
fn embedded_sign_out_clears_storage_and_notifies_host() {
    let s = open(true, &[(ACCESS_TOKEN_KEY, "tok"), (USER_INFO_KEY, r#"{"id":"u1"}"#)]);
    assert!(s.reconciler.state().user().is_some());

    assert!(s.reconciler.sign_out().is_none());

    assert_eq!(s.reconciler.state().lifecycle, AuthLifecycle::SignedOut);
    assert!(s.local.is_empty());
    assert!(s.session.is_empty());

    let posted = s.bridge.posted.borrow();
    assert_eq!(posted.len(), 1);
    let message: serde_json::Value = serde_json::from_str(&posted[0]).unwrap();
    assert_eq!(message["type"], "logout_requested");
    assert!(message["timestamp"].is_i64());
}

#[test]
fn embedded_sign_in_leaves_state_alone() {
    let s = open(true, &[]);
    let before = s.reconciler.state();
    assert!(matches!(s.reconciler.sign_in(), SignIn::HostManaged(_)));
    assert_eq!(s.reconciler.state(), before);
}

#[test]
fn host_event_after_unmount_changes_nothing() {
    let s = open(true, &[]);
    let handlers: Vec<HostEventHandler> = s.bridge.handlers.borrow().iter().map(|(_, h)| h.clone()).collect();
    assert_eq!(handlers.len(), 2);

    s.reconciler.unmount();
    assert!(s.bridge.handlers.borrow().is_empty());

    s.bridge.fire("authTokenReady", serde_json::json!({"userInfo": {"id": "late"}}));
    for handler in handlers {
        handler(Some(serde_json::json!({"userInfo": {"id": "late"}})));
    }
    assert_eq!(s.reconciler.state().lifecycle, AuthLifecycle::SignedOut);
}
