use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{create_checkin, get_today};
use crate::state::AppState;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/today", get(get_today))
}

pub fn checkin_routes() -> Router<AppState> {
    Router::new().route("/", post(create_checkin))
}
