mod auth;
mod data;
mod users;
mod records;
mod insights;

pub use auth::{handle_login, handle_logout, current_session};
pub use data::{get_data, health, catalog, time_study};
pub use users::{create_user, update_user, delete_user};
pub use records::{create_record, update_record, delete_record, preview_record};
pub use insights::ask_insights;
