use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    CheckinRepository, ClassRepository, PromotionRepository, RepositoryError, RepositoryResult,
    StudentRepository,
};
use crate::models::{
    CheckinRecord, ClassDefinition, Graduation, PromotionRecord, Student, sort_chronologically,
};

#[derive(Debug, Default)]
pub struct MemoryStudentRepository {
    students: RwLock<HashMap<Uuid, Student>>,
}

impl MemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, student: Student) {
        self.students
            .write()
            .await
            .insert(student.student_id, student);
    }
}

#[async_trait]
impl StudentRepository for MemoryStudentRepository {
    async fn get(&self, student_id: Uuid) -> RepositoryResult<Option<Student>> {
        Ok(self.students.read().await.get(&student_id).cloned())
    }

    async fn update_rank(&self, student_id: Uuid, graduation: Graduation) -> RepositoryResult<()> {
        let mut students = self.students.write().await;
        let student = students.get_mut(&student_id).ok_or_else(|| {
            RepositoryError::Rejected(format!("student {} does not exist", student_id))
        })?;
        student.belt = graduation.belt;
        student.belt_degree = graduation.degree;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryPromotionRepository {
    records: RwLock<HashMap<Uuid, PromotionRecord>>,
}

impl MemoryPromotionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PromotionRepository for MemoryPromotionRepository {
    async fn append(&self, record: PromotionRecord) -> RepositoryResult<PromotionRecord> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.promotion_id) {
            return Err(RepositoryError::Rejected(format!(
                "promotion {} already exists",
                record.promotion_id
            )));
        }
        records.insert(record.promotion_id, record.clone());
        Ok(record)
    }

    async fn get(&self, promotion_id: Uuid) -> RepositoryResult<Option<PromotionRecord>> {
        Ok(self.records.read().await.get(&promotion_id).cloned())
    }

    async fn list_by_student(&self, student_id: Uuid) -> RepositoryResult<Vec<PromotionRecord>> {
        let mut history: Vec<PromotionRecord> = self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect();
        sort_chronologically(&mut history);
        Ok(history)
    }

    async fn delete(&self, promotion_id: Uuid) -> RepositoryResult<()> {
        self.records
            .write()
            .await
            .remove(&promotion_id)
            .map(|_| ())
            .ok_or_else(|| {
                RepositoryError::Rejected(format!("promotion {} does not exist", promotion_id))
            })
    }
}

#[derive(Debug, Default)]
pub struct MemoryClassRepository {
    classes: RwLock<HashMap<Uuid, ClassDefinition>>,
}

impl MemoryClassRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, class: ClassDefinition) {
        self.classes.write().await.insert(class.class_id, class);
    }
}

#[async_trait]
impl ClassRepository for MemoryClassRepository {
    async fn list_active(&self) -> RepositoryResult<Vec<ClassDefinition>> {
        let mut classes: Vec<ClassDefinition> = self
            .classes
            .read()
            .await
            .values()
            .filter(|c| c.is_active())
            .cloned()
            .collect();
        classes.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.name.cmp(&b.name)));
        Ok(classes)
    }

    async fn get(&self, class_id: Uuid) -> RepositoryResult<Option<ClassDefinition>> {
        Ok(self.classes.read().await.get(&class_id).cloned())
    }
}

#[derive(Debug, Default)]
pub struct MemoryCheckinRepository {
    checkins: RwLock<Vec<CheckinRecord>>,
}

impl MemoryCheckinRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered(&self, keep: impl Fn(&CheckinRecord) -> bool) -> Vec<CheckinRecord> {
        self.checkins
            .read()
            .await
            .iter()
            .filter(|&c| keep(c))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CheckinRepository for MemoryCheckinRepository {
    async fn list_for_date(&self, date: NaiveDate) -> RepositoryResult<Vec<CheckinRecord>> {
        Ok(self.filtered(|c| c.checkin_date == date).await)
    }

    async fn list_for_class_and_date(
        &self,
        class_id: Uuid,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<CheckinRecord>> {
        Ok(self.filtered(|c| c.is_for(class_id, date)).await)
    }

    async fn list_for_class_between(
        &self,
        class_id: Uuid,
        since: NaiveDate,
        until: NaiveDate,
    ) -> RepositoryResult<Vec<CheckinRecord>> {
        Ok(self
            .filtered(|c| c.class_id == class_id && c.checkin_date >= since && c.checkin_date <= until)
            .await)
    }

    async fn append(&self, record: CheckinRecord) -> RepositoryResult<CheckinRecord> {
        self.checkins.write().await.push(record.clone());
        Ok(record)
    }
}
