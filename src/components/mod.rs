//! UI Components
//!
//! Panel sections of the admin page.

mod activity_log;
mod analytics_card;
mod delete_confirm_button;
mod login_gate;
mod prediction_form;
mod prediction_list;
mod sync_settings;

pub use activity_log::ActivityLog;
pub use analytics_card::AnalyticsCard;
pub use delete_confirm_button::DeleteConfirmButton;
pub use login_gate::LoginGate;
pub use prediction_form::PredictionForm;
pub use prediction_list::PredictionList;
pub use sync_settings::SyncSettings;
