//! Prediction Form Component
//!
//! Date (optionally a range), temperature, condition and notes.

use leptos::prelude::*;
use leptos::task::spawn_local;
use prediction_sync::{DomainError, PredictionDraft};

use crate::context::{use_admin, Notice};

#[component]
pub fn PredictionForm() -> impl IntoView {
    let ctx = use_admin();

    let (date, set_date) = signal(String::new());
    let (to_date, set_to_date) = signal(String::new());
    let (temperature, set_temperature) = signal(String::new());
    let (condition, set_condition) = signal(String::new());
    let (notes, set_notes) = signal(String::new());

    let clear = move || {
        set_date.set(String::new());
        set_to_date.set(String::new());
        set_temperature.set(String::new());
        set_condition.set(String::new());
        set_notes.set(String::new());
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = PredictionDraft {
            date: date.get(),
            to_date: to_date.get(),
            temperature: temperature.get(),
            condition: condition.get(),
            notes: notes.get(),
        };

        spawn_local(async move {
            match ctx.repo().commit_add(draft).await {
                Ok(_) => {
                    clear();
                    ctx.notify(Notice::Info("Prediction added.".into()));
                    ctx.refresh().await;
                    ctx.mirror().await;
                }
                Err(DomainError::Validation(_)) => {
                    ctx.notify(Notice::Error(
                        "Please fill in Date, Temperature, and Condition".into(),
                    ));
                }
                Err(e) => ctx.notify(Notice::Error(format!("Could not add prediction: {}", e))),
            }
        });
    };

    view! {
        <form class="prediction-form" on:submit=submit>
            <h3>"Add Prediction"</h3>
            <label>
                "Date"
                <input type="date" prop:value=date on:input=move |ev| set_date.set(event_target_value(&ev)) />
            </label>
            <label>
                "To date (optional)"
                <input type="date" prop:value=to_date on:input=move |ev| set_to_date.set(event_target_value(&ev)) />
            </label>
            <label>
                "Temperature (°C)"
                <input type="number" step="any" prop:value=temperature on:input=move |ev| set_temperature.set(event_target_value(&ev)) />
            </label>
            <label>
                "Condition"
                <input type="text" placeholder="Sunny, Rain, Snow..." prop:value=condition on:input=move |ev| set_condition.set(event_target_value(&ev)) />
            </label>
            <label>
                "Notes"
                <textarea prop:value=notes on:input=move |ev| set_notes.set(event_target_value(&ev))></textarea>
            </label>
            <button type="submit">"Add Prediction"</button>
        </form>
    }
}
