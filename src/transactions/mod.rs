pub mod dto;
pub mod handlers;
pub mod model;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::router()
}
