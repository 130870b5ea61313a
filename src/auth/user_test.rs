use super::*;

fn host_info(verified_email: Option<bool>) -> HostUserInfo {
    HostUserInfo {
        id: "u1".to_owned(),
        name: Some("Ann".to_owned()),
        email: Some("a@x.com".to_owned()),
        picture: Some("http://x/p.png".to_owned()),
        verified_email,
    }
}

// =============================================================
// Normalization
// =============================================================

#[test]
fn host_user_normalizes_field_by_field() {
    let user = UserSource::Host(host_info(None)).normalize();
    assert_eq!(
        user,
        NormalizedUser {
            id: "u1".to_owned(),
            display_name: Some("Ann".to_owned()),
            email: Some("a@x.com".to_owned()),
            avatar_url: Some("http://x/p.png".to_owned()),
            email_verified: true,
        }
    );
}

#[test]
fn host_user_explicit_false_stays_unverified() {
    assert!(!UserSource::Host(host_info(Some(false))).normalize().email_verified);
    assert!(UserSource::Host(host_info(Some(true))).normalize().email_verified);
}

#[test]
fn backend_user_normalizes_field_by_field() {
    let user = UserSource::Backend(BackendUser {
        uid: "fb1".to_owned(),
        display_name: Some("Bo".to_owned()),
        email: Some("b@y.com".to_owned()),
        photo_url: None,
        email_verified: false,
    })
    .normalize();
    assert_eq!(user.id, "fb1");
    assert_eq!(user.display_name.as_deref(), Some("Bo"));
    assert_eq!(user.email.as_deref(), Some("b@y.com"));
    assert!(user.avatar_url.is_none());
    assert!(!user.email_verified);
}

// =============================================================
// Stored record
// =============================================================

#[test]
fn parse_stored_user_accepts_host_record() {
    let info = parse_stored_user(r#"{"id":"u1","name":"Ann","email":"a@x.com","picture":"http://x/p.png"}"#).unwrap();
    assert_eq!(info, host_info(None));
}

#[test]
fn parse_stored_user_rejects_malformed_json() {
    for raw in ["", "{", "not json", "[1,2]", "null", r#"{"name":"no id"}"#] {
        assert!(parse_stored_user(raw).is_err(), "accepted {raw:?}");
    }
}

// =============================================================
// Event detail
// =============================================================

#[test]
fn event_detail_with_user_info() {
    let detail = serde_json::json!({"userInfo": {"id": "u1", "name": "Ann"}});
    let info = user_from_event_detail(Some(detail)).unwrap();
    assert_eq!(info.id, "u1");
    assert_eq!(info.name.as_deref(), Some("Ann"));
}

#[test]
fn event_detail_other_shapes_are_ignored() {
    assert!(user_from_event_detail(None).is_none());
    assert!(user_from_event_detail(Some(serde_json::json!("token"))).is_none());
    assert!(user_from_event_detail(Some(serde_json::json!({}))).is_none());
    assert!(user_from_event_detail(Some(serde_json::json!({"userInfo": null}))).is_none());
    assert!(user_from_event_detail(Some(serde_json::json!({"userInfo": {"name": "no id"}}))).is_none());
    assert!(user_from_event_detail(Some(serde_json::json!({"user": {"id": "u1"}}))).is_none());
}
