//! Survey request and answer models.

use crate::error::{PanelError, Result};
use crate::persona::{Persona, SegmentFilter};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Kind of question put to the panel.
#[derive(
    Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QuestionType {
    /// 1-10 rating
    #[default]
    Scale,
    /// Single-select over the supplied options
    Choice,
}

/// Hypothesis test request as submitted by API callers.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct HypothesisRequest {
    pub hypothesis: String,
    #[serde(default)]
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub segments: Option<SegmentFilter>,
}

impl HypothesisRequest {
    pub fn scale(hypothesis: impl Into<String>) -> Self {
        Self {
            hypothesis: hypothesis.into(),
            question_type: QuestionType::Scale,
            options: None,
            segments: None,
        }
    }

    pub fn choice(hypothesis: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            hypothesis: hypothesis.into(),
            question_type: QuestionType::Choice,
            options: Some(options),
            segments: None,
        }
    }

    pub fn with_segments(mut self, segments: SegmentFilter) -> Self {
        self.segments = Some(segments);
        self
    }

    /// Validates the request and extracts the question shared by all personas.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the hypothesis is blank or a choice question has
    /// no options.
    pub fn question(&self) -> Result<Question> {
        if self.hypothesis.trim().is_empty() {
            return Err(PanelError::invalid_input("Hypothesis must not be empty"));
        }

        let options = self.options.clone().unwrap_or_default();
        if self.question_type == QuestionType::Choice && options.is_empty() {
            return Err(PanelError::invalid_input(
                "Choice questions require at least one option",
            ));
        }

        Ok(Question {
            hypothesis: self.hypothesis.clone(),
            kind: self.question_type,
            options,
        })
    }

    pub fn segment_filter(&self) -> SegmentFilter {
        self.segments.clone().unwrap_or_default()
    }
}

/// The validated question every persona in a test answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub hypothesis: String,
    pub kind: QuestionType,
    /// Ordered options; empty for scale questions
    pub options: Vec<String>,
}

impl Question {
    pub fn scale(hypothesis: impl Into<String>) -> Self {
        Self {
            hypothesis: hypothesis.into(),
            kind: QuestionType::Scale,
            options: Vec::new(),
        }
    }

    pub fn choice(hypothesis: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            hypothesis: hypothesis.into(),
            kind: QuestionType::Choice,
            options,
        }
    }

    /// Returns the text of the 1-based `choice`, if it names an option.
    pub fn option_text(&self, choice: usize) -> Option<&str> {
        choice
            .checked_sub(1)
            .and_then(|idx| self.options.get(idx))
            .map(String::as_str)
    }
}

/// The type-specific part of a persona's answer.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Verdict {
    Scale {
        score: u8,
        reasoning: String,
    },
    Choice {
        /// 1-based option index
        choice: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        choice_text: Option<String>,
        #[serde(default)]
        reasoning: String,
    },
}

/// One persona's answer to a question.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PersonaAnswer {
    pub persona_id: u32,
    pub persona_name: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl PersonaAnswer {
    pub fn scale(persona: &Persona, score: u8, reasoning: impl Into<String>) -> Self {
        Self {
            persona_id: persona.id,
            persona_name: persona.name.clone(),
            verdict: Verdict::Scale {
                score,
                reasoning: reasoning.into(),
            },
        }
    }

    pub fn choice(
        persona: &Persona,
        choice: usize,
        choice_text: Option<String>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            persona_id: persona.id,
            persona_name: persona.name.clone(),
            verdict: Verdict::Choice {
                choice,
                choice_text,
                reasoning: reasoning.into(),
            },
        }
    }

    pub fn score(&self) -> Option<u8> {
        match self.verdict {
            Verdict::Scale { score, .. } => Some(score),
            Verdict::Choice { .. } => None,
        }
    }

    pub fn choice_index(&self) -> Option<usize> {
        match self.verdict {
            Verdict::Choice { choice, .. } => Some(choice),
            Verdict::Scale { .. } => None,
        }
    }

    pub fn reasoning(&self) -> &str {
        match &self.verdict {
            Verdict::Scale { reasoning, .. } | Verdict::Choice { reasoning, .. } => reasoning,
        }
    }
}
