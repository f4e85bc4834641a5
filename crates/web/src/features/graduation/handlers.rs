use academy::{
    AcademyError, BeltTaxonomy,
    dto::graduation::{
        CreatePromotionRequest, GraduationResponse, LadderEntry, PromotionResponse,
        ladder_entries,
    },
    models::AgeGroup,
    repository::StudentRepository,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiResult, WebError};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/students/{student_id}/graduation",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Current graduation with the next natural step", body = GraduationResponse),
        (status = 404, description = "Student not found")
    ),
    tag = "graduation"
)]
pub async fn get_graduation(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> ApiResult<Response> {
    let student = state
        .students
        .get(student_id)
        .await
        .map_err(AcademyError::from)?
        .ok_or_else(|| AcademyError::not_found("student", student_id))?;

    let current = state.ledger.current_rank_of(student_id).await?;
    let age_group = BeltTaxonomy::age_group_of(student.birth_date, state.clock.today());

    Ok(Json(GraduationResponse::new(student_id, current, age_group)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/students/{student_id}/promotions",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Promotion history, most recent first", body = Vec<PromotionResponse>),
        (status = 404, description = "Student not found")
    ),
    tag = "graduation"
)]
pub async fn list_promotions(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> ApiResult<Response> {
    let history = state.ledger.history_of(student_id).await?;

    let response: Vec<PromotionResponse> =
        history.into_iter().map(PromotionResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/students/{student_id}/promotions",
    params(
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    request_body = CreatePromotionRequest,
    responses(
        (status = 201, description = "Promotion recorded", body = PromotionResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Student was promoted concurrently"),
        (status = 422, description = "Belt or degree not allowed for the student's age group")
    ),
    tag = "graduation"
)]
pub async fn create_promotion(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
    Json(req): Json<CreatePromotionRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let command = req.into_command(state.clock.today());
    let record = state.ledger.promote(student_id, command).await?;

    Ok((StatusCode::CREATED, Json(PromotionResponse::from(record))).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/promotions/{promotion_id}",
    params(
        ("promotion_id" = Uuid, Path, description = "Promotion ID")
    ),
    responses(
        (status = 204, description = "Promotion deleted and current rank recomputed"),
        (status = 404, description = "Promotion not found")
    ),
    tag = "graduation"
)]
pub async fn delete_promotion(
    State(state): State<AppState>,
    Path(promotion_id): Path<Uuid>,
) -> ApiResult<Response> {
    state.ledger.delete(promotion_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/belts/{age_group}",
    params(
        ("age_group" = String, Path, description = "kids or adult")
    ),
    responses(
        (status = 200, description = "Belt ladder with maximum degrees", body = Vec<LadderEntry>),
        (status = 400, description = "Unknown age group")
    ),
    tag = "graduation"
)]
pub async fn get_ladder(Path(age_group): Path<String>) -> ApiResult<Response> {
    let age_group: AgeGroup = age_group.parse().map_err(WebError::BadRequest)?;

    Ok(Json(ladder_entries(age_group)).into_response())
}
