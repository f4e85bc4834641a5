use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tokio::sync::OwnedMutexGuard;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::promotion_validator::PromotionValidator;
use super::taxonomy::BeltTaxonomy;
use crate::clock::Clock;
use crate::error::{AcademyError, Result};
use crate::models::{
    Graduation, PromotionRecord, PromotionType, ProposedGraduation, RequirementsMet, Student,
    sort_chronologically,
};
use crate::repository::{PromotionRepository, StudentRepository};

/// Everything needed to record one promotion, apart from the student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionCommand {
    pub proposed: ProposedGraduation,
    pub promotion_type: PromotionType,
    pub requirements_met: RequirementsMet,
    pub notes: Option<String>,
    pub promoted_by: String,
    pub promotion_date: NaiveDate,
}

/// One async lock per student so writes to the same history never interleave.
#[derive(Default)]
struct StudentLocks {
    locks: Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>,
}

impl StudentLocks {
    async fn acquire(&self, student_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.entry(student_id).or_default().clone()
        };
        lock.lock_owned().await
    }
}

/// Append-only promotion history and the source of a student's current rank.
pub struct PromotionLedger {
    students: Arc<dyn StudentRepository>,
    promotions: Arc<dyn PromotionRepository>,
    clock: Arc<dyn Clock>,
    locks: StudentLocks,
}

impl PromotionLedger {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        promotions: Arc<dyn PromotionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            students,
            promotions,
            clock,
            locks: StudentLocks::default(),
        }
    }

    async fn student(&self, student_id: Uuid) -> Result<Student> {
        self.students
            .get(student_id)
            .await?
            .ok_or_else(|| AcademyError::not_found("student", student_id))
    }

    async fn chronological_history(&self, student_id: Uuid) -> Result<Vec<PromotionRecord>> {
        let mut history = self.promotions.list_by_student(student_id).await?;
        sort_chronologically(&mut history);
        Ok(history)
    }

    fn current_from(student: &Student, history: &[PromotionRecord]) -> Graduation {
        history
            .last()
            .map(PromotionRecord::promoted_to)
            .unwrap_or_else(|| student.enrollment())
    }

    /// Graduation set by the latest promotion, or the enrollment rank.
    pub async fn current_rank_of(&self, student_id: Uuid) -> Result<Graduation> {
        let student = self.student(student_id).await?;
        let history = self.chronological_history(student_id).await?;
        Ok(Self::current_from(&student, &history))
    }

    /// Promotions of a student, most recent first.
    pub async fn history_of(&self, student_id: Uuid) -> Result<Vec<PromotionRecord>> {
        let mut history = self.history_chronological(student_id).await?;
        history.reverse();
        Ok(history)
    }

    /// Promotions of a student, oldest first.
    pub async fn history_chronological(&self, student_id: Uuid) -> Result<Vec<PromotionRecord>> {
        self.student(student_id).await?;
        self.chronological_history(student_id).await
    }

    /// Validates and records a promotion, then updates the student's current rank.
    ///
    /// Either both the ledger entry and the rank update are applied, or neither is.
    pub async fn promote(
        &self,
        student_id: Uuid,
        command: PromotionCommand,
    ) -> Result<PromotionRecord> {
        let _guard = self.locks.acquire(student_id).await;

        let student = self.student(student_id).await?;
        let history = self.chronological_history(student_id).await?;
        let current = Self::current_from(&student, &history);

        if let Some(latest) = history
            .last()
            .filter(|latest| command.promotion_date < latest.promotion_date)
        {
            warn!(
                "Rejected promotion for student {} dated {}, latest is {}",
                student_id, command.promotion_date, latest.promotion_date
            );
            return Err(AcademyError::PromotionBeforeLatest {
                date: command.promotion_date,
                latest: latest.promotion_date,
            });
        }
        let sequence = history.iter().map(|r| r.sequence).max().map_or(1, |s| s + 1);

        let age_group = BeltTaxonomy::age_group_of(student.birth_date, command.promotion_date);

        let promoted_to = PromotionValidator::validate(
            &current,
            &command.proposed,
            age_group,
            command.promotion_type,
        )
        .inspect_err(|e| {
            warn!(
                "Rejected {} promotion for student {}: {}",
                command.promotion_type, student_id, e
            )
        })?;

        let record = PromotionRecord {
            promotion_id: Uuid::new_v4(),
            student_id,
            previous_belt: current.belt,
            previous_degree: current.degree,
            new_belt: promoted_to.belt,
            new_degree: promoted_to.degree,
            promotion_type: command.promotion_type,
            promotion_date: command.promotion_date,
            requirements_met: command.requirements_met,
            notes: command.notes,
            promoted_by: command.promoted_by,
            created_at: self.clock.now(),
            sequence,
        };

        let record = self.promotions.append(record).await?;

        let seen: HashSet<Uuid> = history.iter().map(|r| r.promotion_id).collect();
        let after = match self.chronological_history(student_id).await {
            Ok(after) => after,
            Err(e) => {
                self.compensate_append(&record).await;
                return Err(e);
            }
        };
        let foreign_writes = after
            .iter()
            .any(|r| r.promotion_id != record.promotion_id && !seen.contains(&r.promotion_id));
        if foreign_writes {
            warn!(
                "Concurrent promotion detected for student {}, discarding {}",
                student_id, record.promotion_id
            );
            self.compensate_append(&record).await;
            return Err(AcademyError::ConcurrentModification(student_id));
        }

        let new_current = Self::current_from(&student, &after);
        if let Err(e) = self.students.update_rank(student_id, new_current).await {
            self.compensate_append(&record).await;
            return Err(e.into());
        }

        info!(
            "Promoted student {} from {} to {} ({})",
            student_id,
            record.previous(),
            record.promoted_to(),
            record.promotion_type
        );
        if !record.requirements_met.is_complete() {
            info!(
                "Promotion {} recorded with incomplete requirements: {:?}",
                record.promotion_id, record.requirements_met
            );
        }

        Ok(record)
    }

    async fn compensate_append(&self, record: &PromotionRecord) {
        if let Err(e) = self.promotions.delete(record.promotion_id).await {
            error!(
                "Failed to roll back promotion {} for student {}: {}",
                record.promotion_id, record.student_id, e
            );
        }
    }

    /// Removes a promotion; when it was the latest, the student's current rank
    /// falls back to the previous record or the enrollment rank.
    pub async fn delete(&self, promotion_id: Uuid) -> Result<PromotionRecord> {
        let record = self
            .promotions
            .get(promotion_id)
            .await?
            .ok_or_else(|| AcademyError::not_found("promotion", promotion_id))?;
        let student_id = record.student_id;

        let _guard = self.locks.acquire(student_id).await;

        let student = self.student(student_id).await?;
        let history = self.chronological_history(student_id).await?;
        if !history.iter().any(|r| r.promotion_id == promotion_id) {
            return Err(AcademyError::not_found("promotion", promotion_id));
        }
        let was_latest = history
            .last()
            .is_some_and(|latest| latest.promotion_id == promotion_id);

        self.promotions.delete(promotion_id).await?;

        if was_latest {
            let remaining: Vec<PromotionRecord> = history
                .into_iter()
                .filter(|r| r.promotion_id != promotion_id)
                .collect();
            let fallback = Self::current_from(&student, &remaining);

            if let Err(e) = self.students.update_rank(student_id, fallback).await {
                if let Err(restore) = self.promotions.append(record.clone()).await {
                    error!(
                        "Failed to restore promotion {} for student {}: {}",
                        promotion_id, student_id, restore
                    );
                }
                return Err(e.into());
            }

            info!(
                "Deleted latest promotion {} of student {}, current rank is now {}",
                promotion_id, student_id, fallback
            );
        } else {
            info!(
                "Deleted promotion {} of student {}",
                promotion_id, student_id
            );
        }

        Ok(record)
    }
}
