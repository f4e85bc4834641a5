use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckinMethod {
    Manual,
    QrCode,
    App,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinRecord {
    pub checkin_id: Uuid,
    pub student_id: Uuid,
    pub class_id: Uuid,
    pub checkin_date: NaiveDate,
    pub checkin_time: NaiveTime,
    pub method: CheckinMethod,
}

impl CheckinRecord {
    pub fn new(student_id: Uuid, class_id: Uuid, at: NaiveDateTime, method: CheckinMethod) -> Self {
        Self {
            checkin_id: Uuid::new_v4(),
            student_id,
            class_id,
            checkin_date: at.date(),
            checkin_time: at.time(),
            method,
        }
    }

    pub fn at(&self) -> NaiveDateTime {
        self.checkin_date.and_time(self.checkin_time)
    }

    pub fn is_for(&self, class_id: Uuid, date: NaiveDate) -> bool {
        self.class_id == class_id && self.checkin_date == date
    }
}
