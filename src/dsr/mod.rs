use crate::state::AppState;
use axum::Router;
use time::Date;

// Calendar dates cross the wire as ISO-8601 strings ("2024-01-10"); the bare
// `time::Date` serde impl uses a numeric array, so wire fields opt into this.
time::serde::format_description!(wire_date, Date, "[year]-[month]-[day]");

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

pub fn router() -> Router<AppState> {
    handlers::dsr_routes()
}
