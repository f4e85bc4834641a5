use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::belt::{Belt, Graduation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PromotionType {
    Regular,
    SkipDegree,
    Honorary,
    Correction,
}

impl PromotionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::SkipDegree => "skip_degree",
            Self::Honorary => "honorary",
            Self::Correction => "correction",
        }
    }
}

impl fmt::Display for PromotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checklist the instructor ticks before a promotion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RequirementsMet {
    #[serde(default)]
    pub minimum_time: bool,
    #[serde(default)]
    pub minimum_attendance: bool,
    #[serde(default)]
    pub technical_evaluation: bool,
    #[serde(default)]
    pub instructor_approval: bool,
}

impl RequirementsMet {
    pub fn all() -> Self {
        Self {
            minimum_time: true,
            minimum_attendance: true,
            technical_evaluation: true,
            instructor_approval: true,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.minimum_time
            && self.minimum_attendance
            && self.technical_evaluation
            && self.instructor_approval
    }
}

/// One promotion event. Never updated once appended to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionRecord {
    pub promotion_id: Uuid,
    pub student_id: Uuid,
    pub previous_belt: Belt,
    pub previous_degree: u8,
    pub new_belt: Belt,
    pub new_degree: u8,
    pub promotion_type: PromotionType,
    pub promotion_date: NaiveDate,
    pub requirements_met: RequirementsMet,
    pub notes: Option<String>,
    pub promoted_by: String,
    pub created_at: NaiveDateTime,
    /// Position in the student's ledger, assigned on append. Orders same-day promotions.
    #[serde(default)]
    pub sequence: u64,
}

impl PromotionRecord {
    pub fn previous(&self) -> Graduation {
        Graduation::new(self.previous_belt, self.previous_degree)
    }

    pub fn promoted_to(&self) -> Graduation {
        Graduation::new(self.new_belt, self.new_degree)
    }

    /// Sort key for reconstructing history; same-day promotions keep ledger order.
    pub fn chronological_key(&self) -> (NaiveDate, u64, NaiveDateTime) {
        (self.promotion_date, self.sequence, self.created_at)
    }
}

/// Orders records oldest first.
pub fn sort_chronologically(records: &mut [PromotionRecord]) {
    records.sort_by_key(PromotionRecord::chronological_key);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: NaiveDate, created_hour: u32) -> PromotionRecord {
        PromotionRecord {
            promotion_id: Uuid::new_v4(),
            student_id: Uuid::nil(),
            previous_belt: Belt::Branca,
            previous_degree: 0,
            new_belt: Belt::Branca,
            new_degree: 1,
            promotion_type: PromotionType::Regular,
            promotion_date: date,
            requirements_met: RequirementsMet::default(),
            notes: None,
            promoted_by: "Prof. Ana".to_string(),
            created_at: date.and_hms_opt(created_hour, 0, 0).unwrap(),
            sequence: 0,
        }
    }

    #[test]
    fn test_sort_orders_by_date_then_creation() {
        let d1 = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let late_same_day = record(d1, 20);
        let early_same_day = record(d1, 8);
        let later = record(d2, 9);

        let mut records = vec![later.clone(), late_same_day.clone(), early_same_day.clone()];
        sort_chronologically(&mut records);

        assert_eq!(records[0].promotion_id, early_same_day.promotion_id);
        assert_eq!(records[1].promotion_id, late_same_day.promotion_id);
        assert_eq!(records[2].promotion_id, later.promotion_id);
    }

    #[test]
    fn test_sequence_orders_same_day_records() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let mut first = record(day, 10);
        first.sequence = 1;
        let mut second = record(day, 10);
        second.sequence = 2;
        let mut third = record(day, 9);
        third.sequence = 3;

        let mut records = vec![third.clone(), first.clone(), second.clone()];
        sort_chronologically(&mut records);

        assert_eq!(records[0].promotion_id, first.promotion_id);
        assert_eq!(records[1].promotion_id, second.promotion_id);
        assert_eq!(records[2].promotion_id, third.promotion_id);
    }

    #[test]
    fn test_requirements_completeness() {
        assert!(RequirementsMet::all().is_complete());
        let partial = RequirementsMet {
            technical_evaluation: false,
            ..RequirementsMet::all()
        };
        assert!(!partial.is_complete());
    }

    #[test]
    fn test_promotion_type_wire_names() {
        let parsed: PromotionType = serde_json::from_str(r#""skip_degree""#).unwrap();
        assert_eq!(parsed, PromotionType::SkipDegree);
        assert_eq!(PromotionType::Correction.to_string(), "correction");
    }
}
