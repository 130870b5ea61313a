//! Sign-in page: loading, signed-in card, or sign-in button.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page's lifetime is the reconciler's lifetime. It builds the
//! collaborators, mounts the reconciler, mirrors every state write into the
//! shared `RwSignal<AuthState>`, and unmounts on cleanup.

#[cfg(test)]
#[path = "signin_test.rs"]
mod signin_test;

use std::rc::Rc;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::auth::reconciler::{AuthReconciler, Collaborators, SignIn};
use crate::auth::user::{AuthMethod, NormalizedUser};
use crate::components::user_card::UserCard;
use crate::state::auth::{AuthLifecycle, AuthState, EnvironmentMode};

/// Shown under the sign-in button when embedded.
pub const EMBEDDED_NOTE: &str = "Running inside the host app";

/// What the page renders for a given auth state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignInView {
    Loading,
    SignedIn { user: NormalizedUser, method: AuthMethod },
    SignedOut { embedded: bool },
}

pub fn view_for(state: &AuthState) -> SignInView {
    if state.is_loading() {
        return SignInView::Loading;
    }
    match &state.lifecycle {
        AuthLifecycle::SignedIn(user) => SignInView::SignedIn { user: user.clone(), method: state.auth_method() },
        AuthLifecycle::Initializing | AuthLifecycle::SignedOut => {
            SignInView::SignedOut { embedded: state.mode == EnvironmentMode::Embedded }
        }
    }
}

fn collaborators() -> Collaborators {
    #[cfg(feature = "csr")]
    {
        crate::web::browser_collaborators()
    }
    #[cfg(not(feature = "csr"))]
    {
        Collaborators::detached()
    }
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let notice = RwSignal::new(None::<String>);

    let env = collaborators();
    let detector = env.detector();
    let reconciler = AuthReconciler::new(env, &detector, Rc::new(move |state: &AuthState| auth.set(state.clone())));
    auth.set(reconciler.state());
    if let Some(init) = reconciler.mount() {
        leptos::task::spawn_local(init);
    }

    let reconciler = StoredValue::new_local(reconciler);
    on_cleanup(move || {
        reconciler.try_with_value(AuthReconciler::unmount);
    });

    let on_sign_in = move |_| {
        notice.set(None);
        match reconciler.try_with_value(AuthReconciler::sign_in) {
            Some(SignIn::HostManaged(text)) => notice.set(Some(text.to_owned())),
            Some(SignIn::Redirect(redirect)) => leptos::task::spawn_local(async move {
                if let Err(e) = redirect.await {
                    notice.set(Some(format!("Sign-in failed: {e}")));
                }
            }),
            None => {}
        }
    };

    let on_sign_out = Callback::new(move |()| {
        notice.set(None);
        if let Some(Some(task)) = reconciler.try_with_value(AuthReconciler::sign_out) {
            leptos::task::spawn_local(task);
        }
    });

    view! {
        <div class="signin-page">
            {move || match view_for(&auth.get()) {
                SignInView::Loading => view! { <p class="signin-loading">"Loading..."</p> }.into_any(),
                SignInView::SignedIn { user, method } => {
                    view! { <UserCard user=user method=method on_sign_out=on_sign_out/> }.into_any()
                }
                SignInView::SignedOut { embedded } => {
                    view! {
                        <div class="signin-panel">
                            <button class="signin-button" on:click=on_sign_in>
                                "Sign in with Google"
                            </button>
                            <Show when=move || embedded>
                                <p class="signin-note">{EMBEDDED_NOTE}</p>
                            </Show>
                            <Show when=move || notice.get().is_some()>
                                <p class="signin-notice">{move || notice.get().unwrap_or_default()}</p>
                            </Show>
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
