//! Login Gate Component
//!
//! Shared-secret check before the panel is exposed.

use leptos::prelude::*;
use log::warn;

use crate::context::use_admin;

#[component]
pub fn LoginGate(on_unlock: Callback<()>) -> impl IntoView {
    let ctx = use_admin();
    let (password, set_password) = signal(String::new());
    let (failed, set_failed) = signal(false);

    // Enter submits the form
    let check = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let expected = ctx.config.get_value().admin_password;
        if password.get() == expected {
            set_failed.set(false);
            on_unlock.run(());
        } else {
            warn!("Admin: wrong password entered");
            set_failed.set(true);
            set_password.set(String::new());
        }
    };

    view! {
        <form class="login-section" on:submit=check>
            <input
                type="password"
                placeholder="Password"
                prop:value=password
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit">"Enter"</button>
            <Show when=move || failed.get()>
                <p class="error-msg">"Incorrect password"</p>
            </Show>
        </form>
    }
}
