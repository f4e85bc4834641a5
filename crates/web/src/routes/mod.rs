use axum::Router;

use crate::features::{attendance, graduation};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/students", graduation::routes::student_routes())
        .nest("/promotions", graduation::routes::promotion_routes())
        .nest("/belts", graduation::routes::belt_routes())
        .nest("/dashboard", attendance::routes::dashboard_routes())
        .nest("/checkins", attendance::routes::checkin_routes());

    Router::new().nest("/api", api).with_state(state)
}
