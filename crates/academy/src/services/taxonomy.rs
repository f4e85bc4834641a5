use chrono::NaiveDate;

use crate::models::{AgeGroup, Belt, Graduation};

/// Students younger than this (in full years) train on the kids ladder.
pub const KIDS_AGE_LIMIT: u32 = 16;

pub const KIDS_LADDER: [Belt; 13] = [
    Belt::Branca,
    Belt::CinzaBranca,
    Belt::Cinza,
    Belt::CinzaPreta,
    Belt::AmarelaBranca,
    Belt::Amarela,
    Belt::AmarelaPreta,
    Belt::LaranjaBranca,
    Belt::Laranja,
    Belt::LaranjaPreta,
    Belt::VerdeBranca,
    Belt::Verde,
    Belt::VerdePreta,
];

pub const ADULT_LADDER: [Belt; 7] = [
    Belt::Branca,
    Belt::Azul,
    Belt::Roxa,
    Belt::Marrom,
    Belt::Preta,
    Belt::Coral,
    Belt::Vermelha,
];

/// Maximum degree per `(age group, belt)`. Pairs missing here allow no stripes.
pub const MAX_DEGREES: [(AgeGroup, Belt, u8); 20] = [
    (AgeGroup::Kids, Belt::Branca, 4),
    (AgeGroup::Kids, Belt::CinzaBranca, 4),
    (AgeGroup::Kids, Belt::Cinza, 4),
    (AgeGroup::Kids, Belt::CinzaPreta, 4),
    (AgeGroup::Kids, Belt::AmarelaBranca, 4),
    (AgeGroup::Kids, Belt::Amarela, 4),
    (AgeGroup::Kids, Belt::AmarelaPreta, 4),
    (AgeGroup::Kids, Belt::LaranjaBranca, 4),
    (AgeGroup::Kids, Belt::Laranja, 4),
    (AgeGroup::Kids, Belt::LaranjaPreta, 4),
    (AgeGroup::Kids, Belt::VerdeBranca, 4),
    (AgeGroup::Kids, Belt::Verde, 4),
    (AgeGroup::Kids, Belt::VerdePreta, 4),
    (AgeGroup::Adult, Belt::Branca, 4),
    (AgeGroup::Adult, Belt::Azul, 4),
    (AgeGroup::Adult, Belt::Roxa, 4),
    (AgeGroup::Adult, Belt::Marrom, 4),
    (AgeGroup::Adult, Belt::Preta, 10),
    (AgeGroup::Adult, Belt::Coral, 0),
    (AgeGroup::Adult, Belt::Vermelha, 0),
];

/// Static belt ladders and stripe limits.
pub struct BeltTaxonomy;

impl BeltTaxonomy {
    /// Belts of an age group, lowest first.
    pub fn ladder(age_group: AgeGroup) -> &'static [Belt] {
        match age_group {
            AgeGroup::Kids => &KIDS_LADDER,
            AgeGroup::Adult => &ADULT_LADDER,
        }
    }

    pub fn contains(age_group: AgeGroup, belt: Belt) -> bool {
        Self::ladder(age_group).contains(&belt)
    }

    /// Position of `belt` in the ladder of `age_group`, if it belongs there.
    pub fn position(age_group: AgeGroup, belt: Belt) -> Option<usize> {
        Self::ladder(age_group).iter().position(|b| *b == belt)
    }

    /// Zero for belts outside the age group's ladder; callers needing strict
    /// membership check [`BeltTaxonomy::contains`] first.
    pub fn max_degree(belt: Belt, age_group: AgeGroup) -> u8 {
        MAX_DEGREES
            .iter()
            .find(|(group, b, _)| *group == age_group && *b == belt)
            .map(|(_, _, max)| *max)
            .unwrap_or(0)
    }

    /// Full years between `birth_date` and `as_of`; zero for future birth dates.
    pub fn age_on(birth_date: NaiveDate, as_of: NaiveDate) -> u32 {
        as_of.years_since(birth_date).unwrap_or(0)
    }

    pub fn age_group_of(birth_date: NaiveDate, as_of: NaiveDate) -> AgeGroup {
        if Self::age_on(birth_date, as_of) < KIDS_AGE_LIMIT {
            AgeGroup::Kids
        } else {
            AgeGroup::Adult
        }
    }

    /// The natural next step: one more degree, or the next belt at degree 0.
    /// `None` at the top of the ladder or for a belt outside it.
    pub fn next_step(current: Graduation, age_group: AgeGroup) -> Option<Graduation> {
        let position = Self::position(age_group, current.belt)?;
        if current.degree < Self::max_degree(current.belt, age_group) {
            return Some(Graduation::new(current.belt, current.degree + 1));
        }
        Self::ladder(age_group)
            .get(position + 1)
            .map(|belt| Graduation::new(*belt, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_every_ladder_entry_has_a_table_row() {
        for age_group in [AgeGroup::Kids, AgeGroup::Adult] {
            for belt in BeltTaxonomy::ladder(age_group) {
                assert!(
                    MAX_DEGREES
                        .iter()
                        .any(|(g, b, _)| *g == age_group && b == belt),
                    "{} missing for {}",
                    belt,
                    age_group
                );
            }
        }
        assert_eq!(MAX_DEGREES.len(), KIDS_LADDER.len() + ADULT_LADDER.len());
    }

    #[test]
    fn test_max_degree_is_stable() {
        for (age_group, belt, max) in MAX_DEGREES {
            assert_eq!(BeltTaxonomy::max_degree(belt, age_group), max);
            assert_eq!(BeltTaxonomy::max_degree(belt, age_group), max);
        }
    }

    #[test]
    fn test_adult_degree_rules() {
        for belt in [Belt::Branca, Belt::Azul, Belt::Roxa, Belt::Marrom] {
            assert_eq!(BeltTaxonomy::max_degree(belt, AgeGroup::Adult), 4);
        }
        assert_eq!(BeltTaxonomy::max_degree(Belt::Preta, AgeGroup::Adult), 10);
        assert_eq!(BeltTaxonomy::max_degree(Belt::Coral, AgeGroup::Adult), 0);
        assert_eq!(BeltTaxonomy::max_degree(Belt::Vermelha, AgeGroup::Adult), 0);
    }

    #[test]
    fn test_kids_degree_rule_is_flat() {
        for belt in KIDS_LADDER {
            assert_eq!(BeltTaxonomy::max_degree(belt, AgeGroup::Kids), 4);
        }
    }

    #[test]
    fn test_cross_ladder_lookups_yield_zero() {
        assert_eq!(BeltTaxonomy::max_degree(Belt::Preta, AgeGroup::Kids), 0);
        assert_eq!(BeltTaxonomy::max_degree(Belt::Laranja, AgeGroup::Adult), 0);
        assert!(!BeltTaxonomy::contains(AgeGroup::Kids, Belt::Azul));
        assert!(BeltTaxonomy::contains(AgeGroup::Kids, Belt::Branca));
        assert!(BeltTaxonomy::contains(AgeGroup::Adult, Belt::Branca));
    }

    #[test]
    fn test_ladders_are_ordered() {
        assert_eq!(BeltTaxonomy::ladder(AgeGroup::Kids).len(), 13);
        assert_eq!(BeltTaxonomy::ladder(AgeGroup::Adult).len(), 7);
        assert_eq!(
            BeltTaxonomy::position(AgeGroup::Adult, Belt::Preta),
            Some(4)
        );
        assert_eq!(
            BeltTaxonomy::ladder(AgeGroup::Kids).last(),
            Some(&Belt::VerdePreta)
        );
    }

    #[test]
    fn test_age_group_switches_on_sixteenth_birthday() {
        let birth = date(2010, 5, 20);
        assert_eq!(
            BeltTaxonomy::age_group_of(birth, date(2026, 5, 19)),
            AgeGroup::Kids
        );
        assert_eq!(
            BeltTaxonomy::age_group_of(birth, date(2026, 5, 20)),
            AgeGroup::Adult
        );
    }

    #[test]
    fn test_future_birth_date_counts_as_kid() {
        assert_eq!(BeltTaxonomy::age_on(date(2030, 1, 1), date(2026, 1, 1)), 0);
        assert_eq!(
            BeltTaxonomy::age_group_of(date(2030, 1, 1), date(2026, 1, 1)),
            AgeGroup::Kids
        );
    }

    #[test]
    fn test_next_step() {
        let adult = AgeGroup::Adult;
        assert_eq!(
            BeltTaxonomy::next_step(Graduation::new(Belt::Azul, 2), adult),
            Some(Graduation::new(Belt::Azul, 3))
        );
        assert_eq!(
            BeltTaxonomy::next_step(Graduation::new(Belt::Azul, 4), adult),
            Some(Graduation::new(Belt::Roxa, 0))
        );
        assert_eq!(
            BeltTaxonomy::next_step(Graduation::new(Belt::Coral, 0), adult),
            Some(Graduation::new(Belt::Vermelha, 0))
        );
        assert_eq!(
            BeltTaxonomy::next_step(Graduation::new(Belt::Vermelha, 0), adult),
            None
        );
        assert_eq!(
            BeltTaxonomy::next_step(Graduation::new(Belt::Verde, 1), adult),
            None
        );
    }
}
