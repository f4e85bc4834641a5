use axum::{
    Router,
    routing::{delete, get},
};

use super::handlers::{
    create_promotion, delete_promotion, get_graduation, get_ladder, list_promotions,
};
use crate::state::AppState;

pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/:student_id/graduation", get(get_graduation))
        .route(
            "/:student_id/promotions",
            get(list_promotions).post(create_promotion),
        )
}

pub fn promotion_routes() -> Router<AppState> {
    Router::new().route("/:promotion_id", delete(delete_promotion))
}

pub fn belt_routes() -> Router<AppState> {
    Router::new().route("/:age_group", get(get_ladder))
}
