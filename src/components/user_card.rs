//! Signed-in profile card.

#[cfg(test)]
#[path = "user_card_test.rs"]
mod user_card_test;

use leptos::prelude::*;

use crate::auth::user::{AuthMethod, NormalizedUser};

/// Badge text naming the sign-in path.
pub fn auth_method_label(method: AuthMethod) -> &'static str {
    match method {
        AuthMethod::HostApp => "Host app sign-in",
        AuthMethod::IdentityBackend => "Google sign-in",
    }
}

/// Heading for the card: display name, else email, else a generic label.
pub fn card_title(user: &NormalizedUser) -> String {
    non_blank(user.display_name.as_ref())
        .or_else(|| non_blank(user.email.as_ref()))
        .map_or_else(|| "Signed in".to_owned(), str::to_owned)
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

/// Avatar, name, email, auth badge and a sign-out button.
#[component]
pub fn UserCard(user: NormalizedUser, method: AuthMethod, on_sign_out: Callback<()>) -> impl IntoView {
    let title = card_title(&user);
    let email = user.email.clone().unwrap_or_default();
    let avatar = user.avatar_url.clone();
    let unverified = !user.email_verified;

    view! {
        <div class="signin-card">
            {avatar.map(|src| view! { <img class="signin-card__avatar" src=src alt="Profile"/> })}
            <h2 class="signin-card__name">{title}</h2>
            <p class="signin-card__email">{email}</p>
            <Show when=move || unverified>
                <p class="signin-card__warning">"Email not verified"</p>
            </Show>
            <p class="signin-card__method">{auth_method_label(method)}</p>
            <button class="signin-button" on:click=move |_| on_sign_out.run(())>
                "Sign Out"
            </button>
        </div>
    }
}
