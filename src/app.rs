//! Weather Admin App
//!
//! Password gate in front of the admin panel.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{
    ActivityLog, AnalyticsCard, LoginGate, PredictionForm, PredictionList, SyncSettings,
};
use crate::context::{use_admin, AdminContext, Notice};

#[component]
pub fn App() -> impl IntoView {
    let (unlocked, set_unlocked) = signal(false);

    match AdminContext::bootstrap() {
        Ok(ctx) => {
            provide_context(ctx);
            view! {
                <main class="admin-layout">
                    <h1>"Weather Predictions Admin"</h1>
                    <Show
                        when=move || unlocked.get()
                        fallback=move || view! {
                            <LoginGate on_unlock=Callback::new(move |_| set_unlocked.set(true)) />
                        }
                    >
                        <AdminPanel />
                    </Show>
                </main>
            }
            .into_any()
        }
        Err(e) => view! {
            <main class="admin-layout">
                <p class="error-msg">{format!("Admin panel unavailable: {}", e)}</p>
            </main>
        }
        .into_any(),
    }
}

/// Everything behind the gate
#[component]
fn AdminPanel() -> impl IntoView {
    let ctx = use_admin();

    // Load predictions once the panel is shown
    Effect::new(move |_| {
        spawn_local(async move {
            ctx.refresh().await;
        });
    });

    view! {
        <section class="admin-panel">
            {move || ctx.notice.get().map(|notice| match notice {
                Notice::Info(text) => view! { <p class="notice info">{text}</p> }.into_any(),
                Notice::Error(text) => view! { <p class="notice error">{text}</p> }.into_any(),
            })}

            <AnalyticsCard />
            <SyncSettings />
            <PredictionForm />
            <PredictionList />
            <ActivityLog />
        </section>
    }
}
