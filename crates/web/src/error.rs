use academy::AcademyError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Academy(AcademyError),
    Validation(ValidationErrors),
    BadRequest(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Academy(e) => write!(f, "Academy error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
        }
    }
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Academy(AcademyError::UnknownRank(_))
            | Self::Academy(AcademyError::DegreeOutOfRange { .. })
            | Self::Academy(AcademyError::PromotionBeforeLatest { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Academy(AcademyError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Academy(AcademyError::ConcurrentModification(_))
            | Self::Academy(AcademyError::DuplicateCheckin { .. }) => StatusCode::CONFLICT,
            Self::Academy(AcademyError::Repository(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::Academy(e @ AcademyError::UnknownRank(_)) => {
                json!({
                    "error": e.to_string(),
                    "field": "belt"
                })
            }
            Self::Academy(e @ AcademyError::DegreeOutOfRange { max, .. }) => {
                json!({
                    "error": e.to_string(),
                    "field": "degree",
                    "max_degree": max
                })
            }
            Self::Academy(e @ AcademyError::PromotionBeforeLatest { latest, .. }) => {
                json!({
                    "error": e.to_string(),
                    "field": "promotion_date",
                    "latest_promotion_date": latest
                })
            }
            Self::Academy(e @ AcademyError::ConcurrentModification(_)) => {
                json!({
                    "error": e.to_string(),
                    "retryable": true
                })
            }
            Self::Academy(e @ AcademyError::Repository(_)) => {
                tracing::error!("Repository error: {:?}", e);
                json!({
                    "error": "An internal error occurred",
                    "retryable": e.is_retryable()
                })
            }
            Self::Academy(e) => {
                json!({
                    "error": e.to_string()
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<AcademyError> for WebError {
    fn from(error: AcademyError) -> Self {
        Self::Academy(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type ApiResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;
    use academy::repository::RepositoryError;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                WebError::from(AcademyError::UnknownRank("Dourada".to_string())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                WebError::from(AcademyError::PromotionBeforeLatest {
                    date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                    latest: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                WebError::from(AcademyError::not_found("student", Uuid::nil())),
                StatusCode::NOT_FOUND,
            ),
            (
                WebError::from(AcademyError::ConcurrentModification(Uuid::nil())),
                StatusCode::CONFLICT,
            ),
            (
                WebError::from(AcademyError::from(RepositoryError::Unavailable(
                    "timeout".to_string(),
                ))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                WebError::BadRequest("bad age group".to_string()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
