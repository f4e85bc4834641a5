use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{
    Attendance, CheckinMethod, CheckinRecord, InstanceStatus, ScheduledInstance,
};

/// A class occurring today with its live attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClassInstanceResponse {
    pub class_id: Uuid,
    pub class_name: String,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub status: InstanceStatus,
    pub checked_in_count: u32,
    pub total_count: u32,
    pub attendance_percentage: u32,
}

impl ClassInstanceResponse {
    pub fn new(instance: ScheduledInstance, attendance: Attendance) -> Self {
        Self {
            class_id: instance.class_id,
            class_name: instance.class_name,
            start_at: instance.start_at,
            end_at: instance.end_at,
            status: attendance.status,
            checked_in_count: attendance.checked_in_count,
            total_count: attendance.total_count,
            attendance_percentage: attendance.attendance_percentage,
        }
    }
}

/// Today's classes as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardOverview {
    pub date: NaiveDate,
    pub generated_at: NaiveDateTime,
    pub classes: Vec<ClassInstanceResponse>,
    pub total_classes: u32,
    pub in_progress: u32,
    pub finished: u32,
    pub total_checkins: u32,
}

impl DashboardOverview {
    pub fn new(now: NaiveDateTime, classes: Vec<ClassInstanceResponse>) -> Self {
        let count = |status: InstanceStatus| {
            classes.iter().filter(|c| c.status == status).count() as u32
        };
        let in_progress = count(InstanceStatus::InProgress);
        let finished = count(InstanceStatus::Finished);

        Self {
            date: now.date(),
            generated_at: now,
            total_classes: classes.len() as u32,
            in_progress,
            finished,
            total_checkins: classes.iter().map(|c| c.checked_in_count).sum(),
            classes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCheckinRequest {
    pub student_id: Uuid,
    pub class_id: Uuid,
    #[serde(default = "default_method")]
    pub method: CheckinMethod,
}

fn default_method() -> CheckinMethod {
    CheckinMethod::Manual
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckinResponse {
    pub checkin_id: Uuid,
    pub student_id: Uuid,
    pub class_id: Uuid,
    pub checkin_date: NaiveDate,
    pub checkin_time: NaiveTime,
    pub method: CheckinMethod,
}

impl From<CheckinRecord> for CheckinResponse {
    fn from(record: CheckinRecord) -> Self {
        Self {
            checkin_id: record.checkin_id,
            student_id: record.student_id,
            class_id: record.class_id,
            checkin_date: record.checkin_date,
            checkin_time: record.checkin_time,
            method: record.method,
        }
    }
}
