use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::checkin::CheckinRecord;

/// Lifecycle of a class occurrence relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    Scheduled,
    InProgress,
    Finished,
}

/// A class definition pinned to a concrete date. Derived on every query, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledInstance {
    pub class_id: Uuid,
    pub class_name: String,
    pub date: NaiveDate,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub max_students: u32,
}

impl ScheduledInstance {
    /// Ends on a later date than it starts.
    pub fn is_overnight(&self) -> bool {
        self.end_at.date() > self.date
    }

    /// Whether a check-in belongs to this occurrence: same class, on the start date or,
    /// for an overnight class, after midnight up to the end.
    pub fn includes(&self, checkin: &CheckinRecord) -> bool {
        if checkin.class_id != self.class_id {
            return false;
        }
        checkin.checkin_date == self.date
            || (self.is_overnight()
                && checkin.checkin_date == self.end_at.date()
                && checkin.at() <= self.end_at)
    }
}

/// Attendance figures for one instance at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Attendance {
    pub status: InstanceStatus,
    pub checked_in_count: u32,
    pub total_count: u32,
    pub attendance_percentage: u32,
}
