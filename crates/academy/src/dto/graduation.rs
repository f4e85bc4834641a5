use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    AgeGroup, Graduation, PromotionRecord, PromotionType, ProposedGraduation, RequirementsMet,
};
use crate::services::{BeltTaxonomy, PromotionCommand};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GraduationInfo {
    pub belt: String,
    pub degree: u8,
}

impl From<Graduation> for GraduationInfo {
    fn from(graduation: Graduation) -> Self {
        Self {
            belt: graduation.belt.to_string(),
            degree: graduation.degree,
        }
    }
}

/// A student's current graduation with what comes next.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GraduationResponse {
    pub student_id: Uuid,
    pub age_group: AgeGroup,
    pub current: GraduationInfo,
    pub max_degree: u8,
    pub next_step: Option<GraduationInfo>,
}

impl GraduationResponse {
    pub fn new(student_id: Uuid, current: Graduation, age_group: AgeGroup) -> Self {
        Self {
            student_id,
            age_group,
            current: current.into(),
            max_degree: BeltTaxonomy::max_degree(current.belt, age_group),
            next_step: BeltTaxonomy::next_step(current, age_group).map(GraduationInfo::from),
        }
    }
}

/// One rung of a belt ladder.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LadderEntry {
    pub position: u32,
    pub belt: String,
    pub max_degree: u8,
}

pub fn ladder_entries(age_group: AgeGroup) -> Vec<LadderEntry> {
    BeltTaxonomy::ladder(age_group)
        .iter()
        .enumerate()
        .map(|(position, belt)| LadderEntry {
            position: position as u32,
            belt: belt.to_string(),
            max_degree: BeltTaxonomy::max_degree(*belt, age_group),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PromotionResponse {
    pub promotion_id: Uuid,
    pub student_id: Uuid,
    pub previous_belt: String,
    pub previous_degree: u8,
    pub new_belt: String,
    pub new_degree: u8,
    pub promotion_type: PromotionType,
    pub promotion_date: NaiveDate,
    pub requirements_met: RequirementsMet,
    pub notes: Option<String>,
    pub promoted_by: String,
    pub created_at: NaiveDateTime,
    pub sequence: u64,
}

impl From<PromotionRecord> for PromotionResponse {
    fn from(record: PromotionRecord) -> Self {
        Self {
            promotion_id: record.promotion_id,
            student_id: record.student_id,
            previous_belt: record.previous_belt.to_string(),
            previous_degree: record.previous_degree,
            new_belt: record.new_belt.to_string(),
            new_degree: record.new_degree,
            promotion_type: record.promotion_type,
            promotion_date: record.promotion_date,
            requirements_met: record.requirements_met,
            notes: record.notes,
            promoted_by: record.promoted_by,
            created_at: record.created_at,
            sequence: record.sequence,
        }
    }
}

/// Request payload for promoting a student
///
/// `belt` and `degree` are checked against the student's ladder by the ledger,
/// so they only get shape checks here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePromotionRequest {
    #[validate(length(min = 1, max = 64, message = "Belt must be between 1 and 64 characters"))]
    pub belt: String,

    pub degree: i64,

    #[serde(default = "default_promotion_type")]
    pub promotion_type: PromotionType,

    /// Defaults to today.
    pub promotion_date: Option<NaiveDate>,

    #[serde(default)]
    pub requirements_met: RequirementsMet,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Promoted by must be between 1 and 255 characters"
    ))]
    pub promoted_by: String,
}

fn default_promotion_type() -> PromotionType {
    PromotionType::Regular
}

impl CreatePromotionRequest {
    pub fn into_command(self, today: NaiveDate) -> PromotionCommand {
        PromotionCommand {
            proposed: ProposedGraduation::new(self.belt, self.degree),
            promotion_type: self.promotion_type,
            requirements_met: self.requirements_met,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            promoted_by: self.promoted_by,
            promotion_date: self.promotion_date.unwrap_or(today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Belt;

    #[test]
    fn test_request_defaults() {
        let req: CreatePromotionRequest = serde_json::from_str(
            r#"{"belt": "Azul", "degree": 1, "promoted_by": "Prof. Ana", "notes": "  "}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());

        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let command = req.into_command(today);
        assert_eq!(command.promotion_type, PromotionType::Regular);
        assert_eq!(command.promotion_date, today);
        assert_eq!(command.notes, None);
        assert_eq!(command.proposed, ProposedGraduation::new("Azul", 1));
        assert!(!command.requirements_met.is_complete());
    }

    #[test]
    fn test_request_requires_promoter() {
        let req: CreatePromotionRequest =
            serde_json::from_str(r#"{"belt": "Azul", "degree": 1, "promoted_by": ""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_graduation_response_for_black_belt() {
        let response = GraduationResponse::new(
            Uuid::nil(),
            Graduation::new(Belt::Preta, 10),
            AgeGroup::Adult,
        );
        assert_eq!(response.max_degree, 10);
        assert_eq!(
            response.next_step,
            Some(GraduationInfo {
                belt: "Coral".to_string(),
                degree: 0,
            })
        );
    }

    #[test]
    fn test_kids_ladder_entries() {
        let entries = ladder_entries(AgeGroup::Kids);
        assert_eq!(entries.len(), 13);
        assert_eq!(entries[1].belt, "Cinza e Branca");
        assert!(entries.iter().all(|e| e.max_degree == 4));
    }
}
