//! Segment filtering over the persona panel.

use super::model::Persona;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

/// A dimension personas can be grouped or filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum SegmentField {
    /// Primary health concern (`state_primary`)
    State,
    Lifestyle,
    City,
}

impl SegmentField {
    /// Returns the persona's tag value for this dimension.
    pub fn value_of<'a>(&self, persona: &'a Persona) -> &'a str {
        match self {
            SegmentField::State => persona.state_primary.as_ref(),
            SegmentField::Lifestyle => persona.lifestyle.as_ref(),
            SegmentField::City => persona.city.as_str(),
        }
    }
}

/// Segment filter as submitted by callers.
///
/// Dimensions are ANDed together, values within one dimension are ORed.
/// An absent or empty dimension does not filter. Keys other than `state`,
/// `lifestyle` and `city` are ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<Vec<String>>,
}

impl SegmentFilter {
    /// A filter that admits every persona.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: SegmentField, values: &[&str]) -> Self {
        let values = Some(values.iter().map(|v| v.to_string()).collect());
        match field {
            SegmentField::State => self.state = values,
            SegmentField::Lifestyle => self.lifestyle = values,
            SegmentField::City => self.city = values,
        }
        self
    }

    fn allowed(&self, field: SegmentField) -> Option<&[String]> {
        let values = match field {
            SegmentField::State => self.state.as_deref(),
            SegmentField::Lifestyle => self.lifestyle.as_deref(),
            SegmentField::City => self.city.as_deref(),
        };
        values.filter(|v| !v.is_empty())
    }

    /// Returns true if no dimension restricts the panel.
    pub fn is_unrestricted(&self) -> bool {
        [SegmentField::State, SegmentField::Lifestyle, SegmentField::City]
            .iter()
            .all(|field| self.allowed(*field).is_none())
    }

    pub fn matches(&self, persona: &Persona) -> bool {
        [SegmentField::State, SegmentField::Lifestyle, SegmentField::City]
            .iter()
            .all(|field| match self.allowed(*field) {
                Some(values) => {
                    let actual = field.value_of(persona);
                    values.iter().any(|v| v == actual)
                }
                None => true,
            })
    }
}
