//! Prediction List Component
//!
//! Most recent first, each card with an inline delete.

use leptos::prelude::*;
use leptos::task::spawn_local;
use prediction_sync::{Prediction, PredictionId};

use super::DeleteConfirmButton;
use crate::context::{use_admin, AdminContext, Notice};

fn delete_prediction(ctx: AdminContext, id: PredictionId) {
    spawn_local(async move {
        match ctx.repo().commit_delete(&id).await {
            Ok(removed) => {
                ctx.notify(Notice::Info(format!("Deleted {}.", removed.condition)));
                ctx.refresh().await;
                ctx.mirror().await;
            }
            Err(e) => ctx.notify(Notice::Error(format!("Could not delete prediction: {}", e))),
        }
    });
}

#[component]
pub fn PredictionList() -> impl IntoView {
    let ctx = use_admin();

    view! {
        <div class="predictions-admin-list">
            <Show
                when=move || !ctx.predictions.get().is_empty()
                fallback=|| view! { <p class="empty-list">"No predictions yet."</p> }
            >
                <For
                    each=move || ctx.predictions.get()
                    key=|prediction: &Prediction| prediction.id.clone()
                    children=move |prediction: Prediction| {
                        let id = prediction.id.clone();
                        view! {
                            <div class="admin-prediction-card">
                                <div class="admin-pred-info">
                                    <h4>{prediction.condition.clone()}</h4>
                                    <p><strong>"Date: "</strong>{prediction.date_range()}</p>
                                    <p><strong>"Temperature: "</strong>{format!("{}°C", prediction.temperature)}</p>
                                    {prediction.notes.clone().map(|notes| view! {
                                        <p><strong>"Notes: "</strong>{notes}</p>
                                    })}
                                </div>
                                <DeleteConfirmButton on_confirm=Callback::new(move |_| delete_prediction(ctx, id.clone())) />
                            </div>
                        }
                    }
                />
            </Show>
        </div>
    }
}
