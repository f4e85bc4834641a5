use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum AcademyError {
    #[error("Unknown rank: {0}")]
    UnknownRank(String),

    #[error("Degree {degree} is out of range for {belt} (allowed 0 to {max})")]
    DegreeOutOfRange { belt: String, degree: i64, max: u8 },

    #[error("Promotion date {date} is before the latest promotion on {latest}")]
    PromotionBeforeLatest { date: NaiveDate, latest: NaiveDate },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Student {0} was modified concurrently, re-read the current rank and retry")]
    ConcurrentModification(Uuid),

    #[error("Student {student_id} already checked into class {class_id} on {date}")]
    DuplicateCheckin {
        student_id: Uuid,
        class_id: Uuid,
        date: NaiveDate,
    },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

pub type Result<T> = std::result::Result<T, AcademyError>;

impl AcademyError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Rejections produced by the promotion rules rather than by the stores.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AcademyError::UnknownRank(_)
                | AcademyError::DegreeOutOfRange { .. }
                | AcademyError::PromotionBeforeLatest { .. }
        )
    }

    /// The caller may retry after re-reading state.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AcademyError::ConcurrentModification(_)
                | AcademyError::Repository(RepositoryError::Unavailable(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_kinds() {
        assert!(AcademyError::UnknownRank("Dourada".to_string()).is_validation());
        assert!(
            AcademyError::DegreeOutOfRange {
                belt: "Preta".to_string(),
                degree: 11,
                max: 10,
            }
            .is_validation()
        );
        assert!(
            AcademyError::PromotionBeforeLatest {
                date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                latest: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            }
            .is_validation()
        );
        assert!(!AcademyError::ConcurrentModification(Uuid::nil()).is_validation());
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(AcademyError::ConcurrentModification(Uuid::nil()).is_retryable());
        assert!(
            AcademyError::from(RepositoryError::Unavailable("timeout".to_string())).is_retryable()
        );
        assert!(
            !AcademyError::from(RepositoryError::Rejected("bad row".to_string())).is_retryable()
        );
        assert!(!AcademyError::not_found("student", Uuid::nil()).is_retryable());
    }

    #[test]
    fn test_degree_message_names_field() {
        let err = AcademyError::DegreeOutOfRange {
            belt: "Preta".to_string(),
            degree: 11,
            max: 10,
        };
        assert_eq!(
            err.to_string(),
            "Degree 11 is out of range for Preta (allowed 0 to 10)"
        );
    }
}
