use super::*;

fn ann() -> NormalizedUser {
    NormalizedUser {
        id: "u1".to_owned(),
        display_name: Some("Ann".to_owned()),
        email: Some("a@x.com".to_owned()),
        avatar_url: None,
        email_verified: true,
    }
}

fn state(mode: EnvironmentMode, lifecycle: AuthLifecycle, awaiting_redirect: bool) -> AuthState {
    AuthState { mode, lifecycle, awaiting_redirect }
}

#[test]
fn initializing_renders_loading() {
    assert_eq!(view_for(&AuthState::default()), SignInView::Loading);
    assert_eq!(view_for(&AuthState::new(EnvironmentMode::Embedded)), SignInView::Loading);
}

#[test]
fn awaiting_redirect_renders_loading() {
    let s = state(EnvironmentMode::Standalone, AuthLifecycle::SignedOut, true);
    assert_eq!(view_for(&s), SignInView::Loading);
}

#[test]
fn signed_out_standalone_has_no_embedded_note() {
    let s = state(EnvironmentMode::Standalone, AuthLifecycle::SignedOut, false);
    assert_eq!(view_for(&s), SignInView::SignedOut { embedded: false });
}

#[test]
fn signed_out_embedded_shows_note() {
    let s = state(EnvironmentMode::Embedded, AuthLifecycle::SignedOut, false);
    assert_eq!(view_for(&s), SignInView::SignedOut { embedded: true });
}

#[test]
fn signed_in_carries_user_and_method() {
    let s = state(EnvironmentMode::Embedded, AuthLifecycle::SignedIn(ann()), false);
    assert_eq!(view_for(&s), SignInView::SignedIn { user: ann(), method: AuthMethod::HostApp });

    let s = state(EnvironmentMode::Standalone, AuthLifecycle::SignedIn(ann()), false);
    assert_eq!(view_for(&s), SignInView::SignedIn { user: ann(), method: AuthMethod::IdentityBackend });
}
