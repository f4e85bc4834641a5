use std::path::Path;

use academy::models::{CheckinRecord, ClassDefinition, PromotionRecord, Student};
use academy::repository::{
    CheckinRepository, MemoryClassRepository, MemoryStudentRepository, PromotionRepository,
};
use anyhow::Context;
use serde::Deserialize;

/// Initial contents of the in-memory stores.
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub classes: Vec<ClassDefinition>,
    #[serde(default)]
    pub checkins: Vec<CheckinRecord>,
    #[serde(default)]
    pub promotions: Vec<PromotionRecord>,
}

impl SeedData {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read seed file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid seed file {}", path.display()))
    }

    pub async fn load(
        self,
        students: &MemoryStudentRepository,
        promotions: &dyn PromotionRepository,
        classes: &MemoryClassRepository,
        checkins: &dyn CheckinRepository,
    ) -> anyhow::Result<()> {
        tracing::info!(
            "Seeding {} students, {} classes, {} check-ins, {} promotions",
            self.students.len(),
            self.classes.len(),
            self.checkins.len(),
            self.promotions.len()
        );

        for student in self.students {
            students.insert(student).await;
        }
        for class in self.classes {
            classes.insert(class).await;
        }
        for checkin in self.checkins {
            checkins
                .append(checkin)
                .await
                .context("Failed to seed check-in")?;
        }
        for promotion in self.promotions {
            promotions
                .append(promotion)
                .await
                .context("Failed to seed promotion")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_sections_are_optional() {
        let seed: SeedData = serde_json::from_str(
            r#"{
                "students": [{
                    "student_id": "6f1c2a9e-3b7d-4c1e-9a55-2f1d8e4b7c10",
                    "full_name": "Marina Alves",
                    "birth_date": "1998-04-12",
                    "belt": "Azul",
                    "belt_degree": 2,
                    "enrollment_belt": "Branca",
                    "enrollment_degree": 0
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(seed.students.len(), 1);
        assert_eq!(seed.students[0].belt.as_str(), "Azul");
        assert!(seed.classes.is_empty());
        assert!(seed.promotions.is_empty());
    }
}
