//! Sync Settings Component
//!
//! Credential entry for the remote mirror, with a connection test.

use leptos::prelude::*;
use leptos::task::spawn_local;
use prediction_sync::SyncCredentials;

use crate::context::{use_admin, Notice};

#[component]
pub fn SyncSettings() -> impl IntoView {
    let ctx = use_admin();

    let (owner, set_owner) = signal(String::new());
    let (repo, set_repo) = signal(String::new());
    let (token, set_token) = signal(String::new());
    let (testing, set_testing) = signal(false);

    let destination = {
        let target = ctx.repo().sync_target().clone();
        match target.branch {
            Some(branch) => format!("Writes {} on {}", target.file_path, branch),
            None => format!("Writes {} on the default branch", target.file_path),
        }
    };

    // Prefill from the store
    Effect::new(move |_| match ctx.repo().credentials() {
        Ok(Some(saved)) => {
            set_owner.set(saved.owner);
            set_repo.set(saved.repo);
            set_token.set(saved.token);
        }
        Ok(None) => {}
        Err(e) => ctx.notify(Notice::Error(format!("Could not read sync settings: {}", e))),
    });

    let current = move || SyncCredentials::new(owner.get(), repo.get(), token.get());

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let credentials = current();
        if !credentials.is_complete() {
            ctx.notify(Notice::Error("Owner, repository and token are all required.".into()));
            return;
        }
        match ctx.repo().save_credentials(&credentials) {
            Ok(()) => {
                ctx.notify(Notice::Info("Sync settings saved.".into()));
                spawn_local(async move { ctx.mirror().await });
            }
            Err(e) => ctx.notify(Notice::Error(format!("Could not save sync settings: {}", e))),
        }
    };

    let test = move |_| {
        let credentials = current();
        set_testing.set(true);
        spawn_local(async move {
            let notice = match ctx.repo().test_connection(&credentials).await {
                Ok(()) => Notice::Info(format!(
                    "Connected to {}/{}.",
                    credentials.owner, credentials.repo
                )),
                Err(e) => Notice::Error(format!("Connection failed: {}", e)),
            };
            ctx.notify(notice);
            set_testing.set(false);
        });
    };

    let clear = move |_| match ctx.repo().clear_credentials() {
        Ok(()) => {
            set_owner.set(String::new());
            set_repo.set(String::new());
            set_token.set(String::new());
            ctx.notify(Notice::Info("Sync settings cleared.".into()));
        }
        Err(e) => ctx.notify(Notice::Error(format!("Could not clear sync settings: {}", e))),
    };

    view! {
        <form class="sync-settings" on:submit=save>
            <h3>"Remote Sync"</h3>
            <p class="sync-target">{destination}</p>
            <input type="text" placeholder="Owner" prop:value=owner on:input=move |ev| set_owner.set(event_target_value(&ev)) />
            <input type="text" placeholder="Repository" prop:value=repo on:input=move |ev| set_repo.set(event_target_value(&ev)) />
            <input type="password" placeholder="Access token" prop:value=token on:input=move |ev| set_token.set(event_target_value(&ev)) />
            <div class="sync-actions">
                <button type="submit">"Save"</button>
                <button type="button" disabled=testing on:click=test>
                    {move || if testing.get() { "Testing..." } else { "Test connection" }}
                </button>
                <button type="button" class="cancel-btn" on:click=clear>"Clear"</button>
            </div>
        </form>
    }
}
