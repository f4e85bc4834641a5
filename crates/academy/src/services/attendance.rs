use std::collections::HashSet;

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::models::{Attendance, CheckinRecord, InstanceStatus, ScheduledInstance};

pub struct AttendanceAggregator;

impl AttendanceAggregator {
    /// The only place a class instance's lifecycle is derived from the clock.
    pub fn status_of(instance: &ScheduledInstance, now: NaiveDateTime) -> InstanceStatus {
        if now < instance.start_at {
            InstanceStatus::Scheduled
        } else if now <= instance.end_at {
            InstanceStatus::InProgress
        } else {
            InstanceStatus::Finished
        }
    }

    /// Distinct students checked into the instance, whatever the method.
    pub fn checked_in_count(instance: &ScheduledInstance, checkins: &[CheckinRecord]) -> u32 {
        checkins
            .iter()
            .filter(|c| instance.includes(c))
            .map(|c| c.student_id)
            .collect::<HashSet<Uuid>>()
            .len() as u32
    }

    /// `checked_in / total` as a whole percentage, rounded half up; 0 when `total` is 0.
    pub fn percentage(checked_in: u32, total: u32) -> u32 {
        if total == 0 {
            return 0;
        }
        let checked_in = checked_in as u64;
        let total = total as u64;
        ((checked_in * 200 + total) / (total * 2)) as u32
    }

    pub fn attendance_for(
        instance: &ScheduledInstance,
        checkins: &[CheckinRecord],
        total_count: u32,
        now: NaiveDateTime,
    ) -> Attendance {
        let checked_in_count = Self::checked_in_count(instance, checkins);
        Attendance {
            status: Self::status_of(instance, now),
            checked_in_count,
            total_count,
            attendance_percentage: Self::percentage(checked_in_count, total_count),
        }
    }
}
