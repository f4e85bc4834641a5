use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::belt::{AgeGroup, Belt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClassStatus {
    Active,
    Inactive,
}

/// Recurring weekly class template, owned by class management.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub class_id: Uuid,
    pub name: String,
    /// Weekday indices, 0 = Sunday through 6 = Saturday.
    pub days_of_week: Vec<u8>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub max_students: u32,
    pub belt_requirement: Option<Belt>,
    pub age_group: AgeGroup,
    pub status: ClassStatus,
}

impl ClassDefinition {
    pub fn is_active(&self) -> bool {
        self.status == ClassStatus::Active
    }

    pub fn runs_on(&self, weekday_index: u8) -> bool {
        self.days_of_week.contains(&weekday_index)
    }
}
