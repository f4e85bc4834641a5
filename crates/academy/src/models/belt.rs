use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AcademyError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Kids,
    Adult,
}

impl AgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kids => "kids",
            Self::Adult => "adult",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kids" | "kid" | "infantil" => Ok(Self::Kids),
            "adult" | "adults" | "adulto" => Ok(Self::Adult),
            other => Err(format!("unknown age group: {}", other)),
        }
    }
}

/// Every belt known to the academy, across both ladders.
///
/// Membership in a ladder is decided by
/// [`BeltTaxonomy::ladder`](crate::services::BeltTaxonomy::ladder); `Branca`
/// opens both ladders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Belt {
    Branca,
    CinzaBranca,
    Cinza,
    CinzaPreta,
    AmarelaBranca,
    Amarela,
    AmarelaPreta,
    LaranjaBranca,
    Laranja,
    LaranjaPreta,
    VerdeBranca,
    Verde,
    VerdePreta,
    Azul,
    Roxa,
    Marrom,
    Preta,
    Coral,
    Vermelha,
}

impl Belt {
    pub const ALL: [Belt; 19] = [
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
        Belt::Azul,
        Belt::Roxa,
        Belt::Marrom,
        Belt::Preta,
        Belt::Coral,
        Belt::Vermelha,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Branca => "Branca",
            Self::CinzaBranca => "Cinza e Branca",
            Self::Cinza => "Cinza",
            Self::CinzaPreta => "Cinza e Preta",
            Self::AmarelaBranca => "Amarela e Branca",
            Self::Amarela => "Amarela",
            Self::AmarelaPreta => "Amarela e Preta",
            Self::LaranjaBranca => "Laranja e Branca",
            Self::Laranja => "Laranja",
            Self::LaranjaPreta => "Laranja e Preta",
            Self::VerdeBranca => "Verde e Branca",
            Self::Verde => "Verde",
            Self::VerdePreta => "Verde e Preta",
            Self::Azul => "Azul",
            Self::Roxa => "Roxa",
            Self::Marrom => "Marrom",
            Self::Preta => "Preta",
            Self::Coral => "Coral",
            Self::Vermelha => "Vermelha",
        }
    }
}

// "cinza_e_branca", "Cinza-e-Branca" and "CINZA E BRANCA" all name the same belt
fn normalize(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>()
        .join(" ")
}

impl FromStr for Belt {
    type Err = AcademyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Belt::ALL
            .into_iter()
            .find(|belt| normalize(belt.as_str()) == wanted)
            .ok_or_else(|| AcademyError::UnknownRank(s.trim().to_string()))
    }
}

impl TryFrom<String> for Belt {
    type Error = AcademyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Belt> for String {
    fn from(belt: Belt) -> Self {
        belt.as_str().to_string()
    }
}

impl fmt::Display for Belt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A belt together with its degree (stripes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Graduation {
    pub belt: Belt,
    pub degree: u8,
}

impl Graduation {
    pub fn new(belt: Belt, degree: u8) -> Self {
        Self { belt, degree }
    }
}

impl fmt::Display for Graduation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} degree)", self.belt, self.degree)
    }
}

/// A graduation as submitted by a caller, before it has been checked against a ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedGraduation {
    pub belt: String,
    pub degree: i64,
}

impl ProposedGraduation {
    pub fn new(belt: impl Into<String>, degree: i64) -> Self {
        Self {
            belt: belt.into(),
            degree,
        }
    }
}

impl From<Graduation> for ProposedGraduation {
    fn from(graduation: Graduation) -> Self {
        Self {
            belt: graduation.belt.as_str().to_string(),
            degree: graduation.degree as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_belt_parsing_is_lenient_on_separators() {
        assert_eq!("Cinza e Branca".parse::<Belt>().unwrap(), Belt::CinzaBranca);
        assert_eq!("cinza_e_branca".parse::<Belt>().unwrap(), Belt::CinzaBranca);
        assert_eq!("  PRETA ".parse::<Belt>().unwrap(), Belt::Preta);
        assert_eq!("verde-e-preta".parse::<Belt>().unwrap(), Belt::VerdePreta);
    }

    #[test]
    fn test_unknown_belt_is_rejected() {
        let err = "Dourada".parse::<Belt>().unwrap_err();
        assert!(matches!(err, AcademyError::UnknownRank(name) if name == "Dourada"));
    }

    #[test]
    fn test_every_belt_round_trips_through_its_name() {
        for belt in Belt::ALL {
            assert_eq!(belt.as_str().parse::<Belt>().unwrap(), belt);
        }
    }

    #[test]
    fn test_belt_serializes_as_display_name() {
        let json = serde_json::to_string(&Graduation::new(Belt::LaranjaPreta, 2)).unwrap();
        assert_eq!(json, r#"{"belt":"Laranja e Preta","degree":2}"#);

        let parsed: Graduation = serde_json::from_str(r#"{"belt":"azul","degree":1}"#).unwrap();
        assert_eq!(parsed, Graduation::new(Belt::Azul, 1));
    }

    #[test]
    fn test_age_group_parsing() {
        assert_eq!("Kids".parse::<AgeGroup>().unwrap(), AgeGroup::Kids);
        assert_eq!("adulto".parse::<AgeGroup>().unwrap(), AgeGroup::Adult);
        assert!("seniors".parse::<AgeGroup>().is_err());
    }
}
