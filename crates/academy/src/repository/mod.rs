//! Store interfaces the engine consumes.
//!
//! Implementations live outside the engine (HTTP clients, databases); the
//! [`memory`] module provides map-backed versions for tests and local runs.

pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{CheckinRecord, ClassDefinition, Graduation, PromotionRecord, Student};

pub use memory::{
    MemoryCheckinRepository, MemoryClassRepository, MemoryPromotionRepository,
    MemoryStudentRepository,
};

/// Failure reported by a store, i.e. the `success: false` half of a store response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store rejected the request: {0}")]
    Rejected(String),
}

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn get(&self, student_id: Uuid) -> RepositoryResult<Option<Student>>;

    async fn update_rank(&self, student_id: Uuid, graduation: Graduation) -> RepositoryResult<()>;
}

#[async_trait]
pub trait PromotionRepository: Send + Sync {
    async fn append(&self, record: PromotionRecord) -> RepositoryResult<PromotionRecord>;

    async fn get(&self, promotion_id: Uuid) -> RepositoryResult<Option<PromotionRecord>>;

    /// Records of one student, oldest first.
    async fn list_by_student(&self, student_id: Uuid) -> RepositoryResult<Vec<PromotionRecord>>;

    async fn delete(&self, promotion_id: Uuid) -> RepositoryResult<()>;
}

#[async_trait]
pub trait ClassRepository: Send + Sync {
    async fn list_active(&self) -> RepositoryResult<Vec<ClassDefinition>>;

    async fn get(&self, class_id: Uuid) -> RepositoryResult<Option<ClassDefinition>>;
}

#[async_trait]
pub trait CheckinRepository: Send + Sync {
    async fn list_for_date(&self, date: NaiveDate) -> RepositoryResult<Vec<CheckinRecord>>;

    async fn list_for_class_and_date(
        &self,
        class_id: Uuid,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<CheckinRecord>>;

    /// Check-ins of a class from `since` through `until`, both inclusive.
    async fn list_for_class_between(
        &self,
        class_id: Uuid,
        since: NaiveDate,
        until: NaiveDate,
    ) -> RepositoryResult<Vec<CheckinRecord>>;

    async fn append(&self, record: CheckinRecord) -> RepositoryResult<CheckinRecord>;
}
