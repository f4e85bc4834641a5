use academy::dto::attendance::{CheckinResponse, CreateCheckinRequest, DashboardOverview};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::ApiResult;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/dashboard/today",
    responses(
        (status = 200, description = "Today's classes with live status and attendance", body = DashboardOverview)
    ),
    tag = "attendance"
)]
pub async fn get_today(State(state): State<AppState>) -> ApiResult<Response> {
    let overview = state.attendance.today().await?;

    Ok(Json(overview).into_response())
}

#[utoipa::path(
    post,
    path = "/api/checkins",
    request_body = CreateCheckinRequest,
    responses(
        (status = 201, description = "Check-in recorded", body = CheckinResponse),
        (status = 404, description = "Class not found"),
        (status = 409, description = "Student already checked into this class today")
    ),
    tag = "attendance"
)]
pub async fn create_checkin(
    State(state): State<AppState>,
    Json(req): Json<CreateCheckinRequest>,
) -> ApiResult<Response> {
    let record = state
        .attendance
        .register_checkin(req.student_id, req.class_id, req.method)
        .await?;

    Ok((StatusCode::CREATED, Json(CheckinResponse::from(record))).into_response())
}
