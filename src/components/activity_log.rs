//! Activity Log Component
//!
//! Recent lines from the rolling logger, newest first.

use leptos::prelude::*;
use log::Level;

use crate::context::use_admin;

const SHOWN_LINES: usize = 15;

#[component]
pub fn ActivityLog() -> impl IntoView {
    let ctx = use_admin();

    let lines = move || {
        // Every notice follows new log output
        ctx.notice.track();
        rolling_logger::recent_lines()
            .into_iter()
            .rev()
            .take(SHOWN_LINES)
            .map(|line| {
                let class = match line.level {
                    Level::Error => "log-line error",
                    Level::Warn => "log-line warn",
                    _ => "log-line",
                };
                view! { <li class=class>{line.text}</li> }
            })
            .collect_view()
    };

    view! {
        <details class="activity-log">
            <summary>"Activity"</summary>
            <ul>{lines}</ul>
        </details>
    }
}
