//! Root application component.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::pages::signin::SignInPage;
use crate::state::auth::AuthState;

/// Root application component.
///
/// Provides the shared auth state context and renders the sign-in page.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);

    view! {
        <Title text="Sign in"/>
        <SignInPage/>
    }
}
