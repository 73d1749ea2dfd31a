//! Analytics Card Component
//!
//! Today's page views, refreshed on a fixed interval.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use prediction_sync::analytics::display_date;
use prediction_sync::domain::PageViews;

use crate::context::use_admin;

#[component]
pub fn AnalyticsCard() -> impl IntoView {
    let ctx = use_admin();
    let (views, set_views) = signal::<Option<PageViews>>(None);
    let refresh_ms = ctx.config.get_value().analytics_refresh_ms;

    // Poll until the card is disposed
    spawn_local(async move {
        loop {
            let current = match ctx.counter().today_local() {
                Ok(current) => Some(current),
                Err(e) => {
                    warn!("Admin: could not read page views: {}", e);
                    None
                }
            };
            if set_views.try_set(current).is_some() {
                break;
            }
            TimeoutFuture::new(refresh_ms).await;
        }
    });

    view! {
        <div class="analytics-card">
            <h3>"Today's Views"</h3>
            <p class="view-count">{move || views.get().map(|v| v.count).unwrap_or(0)}</p>
            <p class="analytics-date">{move || views.get().map(|v| display_date(&v)).unwrap_or_default()}</p>
        </div>
    }
}
