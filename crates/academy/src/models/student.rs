use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::belt::{Belt, Graduation};

/// The slice of a student the graduation engine reads and writes.
///
/// `belt`/`belt_degree` are a denormalized copy of the latest promotion;
/// `enrollment_*` is the rank the student joined with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: Uuid,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub belt: Belt,
    pub belt_degree: u8,
    pub enrollment_belt: Belt,
    pub enrollment_degree: u8,
}

impl Student {
    /// Registers a student whose current rank is the enrollment rank.
    pub fn enroll(
        full_name: impl Into<String>,
        birth_date: NaiveDate,
        enrollment: Graduation,
    ) -> Self {
        Self {
            student_id: Uuid::new_v4(),
            full_name: full_name.into(),
            birth_date,
            belt: enrollment.belt,
            belt_degree: enrollment.degree,
            enrollment_belt: enrollment.belt,
            enrollment_degree: enrollment.degree,
        }
    }

    pub fn graduation(&self) -> Graduation {
        Graduation::new(self.belt, self.belt_degree)
    }

    pub fn enrollment(&self) -> Graduation {
        Graduation::new(self.enrollment_belt, self.enrollment_degree)
    }
}
