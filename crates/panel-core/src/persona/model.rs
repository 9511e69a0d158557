//! Persona domain model.
//!
//! Represents a synthetic consumer that answers survey questions.
//! Tag fields use closed vocabularies so a malformed panel fails at load time.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Health concern tags used for `state_primary` / `state_secondary`.
#[derive(
    Deserialize,
    Serialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConcernTag {
    Stress,
    Sleep,
    Energy,
    Focus,
    Immunity,
    Recovery,
}

impl ConcernTag {
    /// Display label shown by the frontend.
    pub fn label(&self) -> &'static str {
        match self {
            ConcernTag::Stress => "Стрес",
            ConcernTag::Sleep => "Сон",
            ConcernTag::Energy => "Енергія",
            ConcernTag::Focus => "Фокус",
            ConcernTag::Immunity => "Імунітет",
            ConcernTag::Recovery => "Відновлення",
        }
    }
}

/// Lifestyle segment tags.
#[derive(
    Deserialize,
    Serialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Lifestyle {
    HighAchiever,
    CreativeProfessional,
    Biohacker,
    WellnessEnthusiast,
    FitnessFocused,
    HolisticBeliever,
    ConsciousConsumer,
    Skeptic,
}

impl Lifestyle {
    /// Display label shown by the frontend.
    pub fn label(&self) -> &'static str {
        match self {
            Lifestyle::HighAchiever => "High Achievers",
            Lifestyle::CreativeProfessional => "Креативні",
            Lifestyle::Biohacker => "Біохакери",
            Lifestyle::WellnessEnthusiast => "Wellness",
            Lifestyle::FitnessFocused => "Фітнес",
            Lifestyle::HolisticBeliever => "Холістики",
            Lifestyle::ConsciousConsumer => "Свідомі споживачі",
            Lifestyle::Skeptic => "Скептики",
        }
    }
}

/// Prior experience with CBD products.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CbdExperience {
    None,
    Beginner,
    Intermediate,
    Experienced,
}

impl CbdExperience {
    pub fn is_experienced(&self) -> bool {
        matches!(self, CbdExperience::Experienced)
    }

    /// `none` and `beginner` both count as novices.
    pub fn is_novice(&self) -> bool {
        matches!(self, CbdExperience::None | CbdExperience::Beginner)
    }
}

/// How strongly price drives the persona's decisions.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PriceSensitivity {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl PriceSensitivity {
    pub fn is_high(&self) -> bool {
        matches!(self, PriceSensitivity::High | PriceSensitivity::VeryHigh)
    }

    pub fn is_low(&self) -> bool {
        matches!(self, PriceSensitivity::Low | PriceSensitivity::VeryLow)
    }
}

/// A synthetic respondent with fixed demographic and behavioral attributes.
///
/// Identity is `id`; personas are never mutated after the panel is loaded.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    /// Unique positive identifier
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub city: String,
    pub occupation: String,
    /// Monthly income bracket label, e.g. `35000-50000`
    pub income: String,
    pub state_primary: ConcernTag,
    pub state_secondary: ConcernTag,
    pub lifestyle: Lifestyle,
    pub cbd_experience: CbdExperience,
    pub price_sensitivity: PriceSensitivity,
    /// Free-text character sketch
    pub personality: String,
}

impl Persona {
    pub fn is_young(&self) -> bool {
        self.age < 35
    }

    pub fn is_older(&self) -> bool {
        self.age >= 50
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_tags_round_trip_through_snake_case() {
        assert_eq!(ConcernTag::Recovery.as_ref(), "recovery");
        assert_eq!(Lifestyle::from_str("conscious_consumer").unwrap(), Lifestyle::ConsciousConsumer);
        assert_eq!(
            serde_json::to_value(PriceSensitivity::VeryHigh).unwrap(),
            serde_json::json!("very_high")
        );
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let result = serde_json::from_str::<ConcernTag>("\"anxiety\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_experience_buckets() {
        assert!(CbdExperience::None.is_novice());
        assert!(CbdExperience::Beginner.is_novice());
        assert!(!CbdExperience::Intermediate.is_novice());
        assert!(!CbdExperience::Intermediate.is_experienced());
        assert!(CbdExperience::Experienced.is_experienced());
    }

    #[test]
    fn test_price_buckets_exclude_medium() {
        assert!(!PriceSensitivity::Medium.is_high());
        assert!(!PriceSensitivity::Medium.is_low());
        assert!(PriceSensitivity::VeryLow.is_low());
        assert!(PriceSensitivity::High.is_high());
    }
}
