use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use super::attendance::AttendanceAggregator;
use super::schedule::ScheduleProjector;
use crate::clock::Clock;
use crate::dto::attendance::{ClassInstanceResponse, DashboardOverview};
use crate::error::{AcademyError, Result};
use crate::models::{CheckinMethod, CheckinRecord, ScheduledInstance};
use crate::repository::{CheckinRepository, ClassRepository, StudentRepository};

/// Days of check-in history that count a student as enrolled in a class.
pub const ENROLLMENT_WINDOW_DAYS: i64 = 30;

/// Denominator of a class's attendance percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttendanceBasis {
    /// The class's configured `max_students`.
    #[default]
    Capacity,
    /// Distinct students seen in the class over the enrollment window.
    Enrolled,
}

impl FromStr for AttendanceBasis {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "capacity" => Ok(Self::Capacity),
            "enrolled" => Ok(Self::Enrolled),
            other => Err(format!(
                "unknown attendance basis '{}', expected 'capacity' or 'enrolled'",
                other
            )),
        }
    }
}

impl fmt::Display for AttendanceBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capacity => f.write_str("capacity"),
            Self::Enrolled => f.write_str("enrolled"),
        }
    }
}

pub struct AttendanceService {
    students: Arc<dyn StudentRepository>,
    classes: Arc<dyn ClassRepository>,
    checkins: Arc<dyn CheckinRepository>,
    clock: Arc<dyn Clock>,
    basis: AttendanceBasis,
    registration: Mutex<()>,
}

impl AttendanceService {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        classes: Arc<dyn ClassRepository>,
        checkins: Arc<dyn CheckinRepository>,
        clock: Arc<dyn Clock>,
        basis: AttendanceBasis,
    ) -> Self {
        Self {
            students,
            classes,
            checkins,
            clock,
            basis,
            registration: Mutex::new(()),
        }
    }

    pub fn basis(&self) -> AttendanceBasis {
        self.basis
    }

    /// Dashboard for the injected clock's current moment.
    pub async fn today(&self) -> Result<DashboardOverview> {
        self.overview_at(self.clock.now()).await
    }

    pub async fn overview_at(&self, now: NaiveDateTime) -> Result<DashboardOverview> {
        let today = now.date();
        let definitions = self.classes.list_active().await?;
        let mut checkins = self.checkins.list_for_date(today).await?;

        let mut instances = ScheduleProjector::project_carryover(&definitions, today);
        if !instances.is_empty() {
            if let Some(yesterday) = today.pred_opt() {
                checkins.extend(self.checkins.list_for_date(yesterday).await?);
            }
        }
        instances.extend(ScheduleProjector::project_today(&definitions, today));

        let mut classes = Vec::new();
        for instance in instances {
            let total = self.total_for(&instance).await?;
            let attendance = AttendanceAggregator::attendance_for(&instance, &checkins, total, now);
            classes.push(ClassInstanceResponse::new(instance, attendance));
        }

        Ok(DashboardOverview::new(now, classes))
    }

    async fn total_for(&self, instance: &ScheduledInstance) -> Result<u32> {
        match self.basis {
            AttendanceBasis::Capacity => Ok(instance.max_students),
            AttendanceBasis::Enrolled => {
                let since = instance.date - Duration::days(ENROLLMENT_WINDOW_DAYS - 1);
                let seen = self
                    .checkins
                    .list_for_class_between(instance.class_id, since, instance.date)
                    .await?;
                Ok(seen
                    .iter()
                    .map(|c| c.student_id)
                    .collect::<HashSet<Uuid>>()
                    .len() as u32)
            }
        }
    }

    /// Records that a student is attending a class today.
    pub async fn register_checkin(
        &self,
        student_id: Uuid,
        class_id: Uuid,
        method: CheckinMethod,
    ) -> Result<CheckinRecord> {
        let _guard = self.registration.lock().await;
        let now = self.clock.now();

        self.students
            .get(student_id)
            .await?
            .ok_or_else(|| AcademyError::not_found("student", student_id))?;

        self.classes
            .get(class_id)
            .await?
            .ok_or_else(|| AcademyError::not_found("class", class_id))?;

        let existing = self
            .checkins
            .list_for_class_and_date(class_id, now.date())
            .await?;
        if existing.iter().any(|c| c.student_id == student_id) {
            warn!(
                "Duplicate check-in of student {} for class {} on {}",
                student_id,
                class_id,
                now.date()
            );
            return Err(AcademyError::DuplicateCheckin {
                student_id,
                class_id,
                date: now.date(),
            });
        }

        let record = self
            .checkins
            .append(CheckinRecord::new(student_id, class_id, now, method))
            .await?;
        info!(
            "Checked in student {} to class {} via {:?}",
            student_id, class_id, method
        );

        Ok(record)
    }
}
