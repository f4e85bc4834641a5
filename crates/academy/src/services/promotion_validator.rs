use tracing::debug;

use super::taxonomy::BeltTaxonomy;
use crate::error::{AcademyError, Result};
use crate::models::{AgeGroup, Belt, Graduation, PromotionType, ProposedGraduation};

pub struct PromotionValidator;

impl PromotionValidator {
    /// Checks a proposed graduation against the ladder of `age_group`.
    ///
    /// Returns the parsed graduation when the belt belongs to the ladder and
    /// the degree lies within `0..=max_degree`. Moving down the ladder is
    /// accepted for every promotion type.
    pub fn validate(
        current: &Graduation,
        proposed: &ProposedGraduation,
        age_group: AgeGroup,
        promotion_type: PromotionType,
    ) -> Result<Graduation> {
        let belt: Belt = proposed.belt.parse()?;
        if !BeltTaxonomy::contains(age_group, belt) {
            return Err(AcademyError::UnknownRank(format!(
                "{} is not part of the {} ladder",
                belt, age_group
            )));
        }

        let max = BeltTaxonomy::max_degree(belt, age_group);
        if proposed.degree < 0 || proposed.degree > max as i64 {
            return Err(AcademyError::DegreeOutOfRange {
                belt: belt.to_string(),
                degree: proposed.degree,
                max,
            });
        }

        let validated = Graduation::new(belt, proposed.degree as u8);

        if promotion_type != PromotionType::Correction
            && Self::is_demotion(current, &validated, age_group)
        {
            debug!(
                "{} promotion moves down the {} ladder: {} -> {}",
                promotion_type, age_group, current, validated
            );
        }

        Ok(validated)
    }

    fn is_demotion(current: &Graduation, proposed: &Graduation, age_group: AgeGroup) -> bool {
        match (
            BeltTaxonomy::position(age_group, current.belt),
            BeltTaxonomy::position(age_group, proposed.belt),
        ) {
            (Some(from), Some(to)) => (to, proposed.degree) < (from, current.degree),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adult_validate(current: Graduation, belt: &str, degree: i64) -> Result<Graduation> {
        PromotionValidator::validate(
            &current,
            &ProposedGraduation::new(belt, degree),
            AgeGroup::Adult,
            PromotionType::Regular,
        )
    }

    #[test]
    fn test_accepts_every_degree_up_to_max() {
        for age_group in [AgeGroup::Kids, AgeGroup::Adult] {
            for belt in BeltTaxonomy::ladder(age_group) {
                let max = BeltTaxonomy::max_degree(*belt, age_group);
                for degree in 0..=max {
                    let result = PromotionValidator::validate(
                        &Graduation::new(Belt::Branca, 0),
                        &ProposedGraduation::new(belt.as_str(), degree as i64),
                        age_group,
                        PromotionType::Regular,
                    );
                    assert_eq!(result.unwrap(), Graduation::new(*belt, degree));
                }
            }
        }
    }

    #[test]
    fn test_rejects_degree_above_max() {
        for age_group in [AgeGroup::Kids, AgeGroup::Adult] {
            for belt in BeltTaxonomy::ladder(age_group) {
                let max = BeltTaxonomy::max_degree(*belt, age_group);
                let result = PromotionValidator::validate(
                    &Graduation::new(Belt::Branca, 0),
                    &ProposedGraduation::new(belt.as_str(), max as i64 + 1),
                    age_group,
                    PromotionType::Regular,
                );
                assert!(matches!(
                    result,
                    Err(AcademyError::DegreeOutOfRange { max: m, .. }) if m == max
                ));
            }
        }
    }

    #[test]
    fn test_rejects_negative_degree() {
        let result = adult_validate(Graduation::new(Belt::Branca, 0), "Azul", -1);
        assert!(matches!(
            result,
            Err(AcademyError::DegreeOutOfRange { degree: -1, .. })
        ));
    }

    #[test]
    fn test_black_belt_eleventh_degree_rejected() {
        let result = adult_validate(Graduation::new(Belt::Preta, 9), "Preta", 11);
        match result {
            Err(AcademyError::DegreeOutOfRange { belt, degree, max }) => {
                assert_eq!(belt, "Preta");
                assert_eq!(degree, 11);
                assert_eq!(max, 10);
            }
            other => panic!("expected DegreeOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_coral_takes_no_stripes() {
        assert!(adult_validate(Graduation::new(Belt::Preta, 7), "Coral", 0).is_ok());
        assert!(adult_validate(Graduation::new(Belt::Preta, 7), "Coral", 1).is_err());
    }

    #[test]
    fn test_rejects_belt_from_other_ladder() {
        let kids = PromotionValidator::validate(
            &Graduation::new(Belt::Branca, 0),
            &ProposedGraduation::new("Azul", 0),
            AgeGroup::Kids,
            PromotionType::Regular,
        );
        assert!(matches!(kids, Err(AcademyError::UnknownRank(_))));

        let adult = adult_validate(Graduation::new(Belt::Branca, 0), "Laranja", 0);
        assert!(matches!(adult, Err(AcademyError::UnknownRank(_))));
    }

    #[test]
    fn test_rejects_unknown_belt_name() {
        let result = adult_validate(Graduation::new(Belt::Branca, 0), "Dourada", 0);
        assert!(matches!(result, Err(AcademyError::UnknownRank(name)) if name == "Dourada"));
    }

    #[test]
    fn test_rank_order_is_not_enforced() {
        let result = adult_validate(Graduation::new(Belt::Roxa, 2), "Azul", 4);
        assert_eq!(result.unwrap(), Graduation::new(Belt::Azul, 4));
    }
}
