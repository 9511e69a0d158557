//! Extraction of structured answers from free-form model replies.

use crate::error::ReasoningError;
use once_cell::sync::Lazy;
use panel_core::persona::Persona;
use panel_core::survey::{PersonaAnswer, Question, QuestionType};
use regex::Regex;
use serde::Deserialize;

static FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^}]+\}").expect("fragment pattern is valid"));

#[derive(Deserialize, Debug, Default)]
struct RawReply {
    score: Option<f64>,
    choice: Option<f64>,
    #[serde(default)]
    reasoning: Option<String>,
}

/// Parses the first brace-delimited fragment of `text` into an answer.
///
/// Scores outside 1-10 and choices that name no option are rejected so the
/// caller can fall back to simulation.
pub fn parse_reply(
    text: &str,
    persona: &Persona,
    question: &Question,
) -> Result<PersonaAnswer, ReasoningError> {
    let fragment = FRAGMENT
        .find(text)
        .ok_or_else(|| ReasoningError::parse("no JSON object in reply"))?;
    let raw: RawReply = serde_json::from_str(fragment.as_str())
        .map_err(|e| ReasoningError::parse(format!("invalid JSON object: {e}")))?;
    let reasoning = raw.reasoning.unwrap_or_default();

    match question.kind {
        QuestionType::Scale => {
            let score = whole_number(raw.score, "score")?;
            if !(1..=10).contains(&score) {
                return Err(ReasoningError::parse(format!("score {score} outside 1-10")));
            }
            Ok(PersonaAnswer::scale(persona, score as u8, reasoning))
        }
        QuestionType::Choice => {
            let choice = whole_number(raw.choice, "choice")?;
            let text = usize::try_from(choice)
                .ok()
                .and_then(|idx| question.option_text(idx))
                .ok_or_else(|| {
                    ReasoningError::parse(format!(
                        "choice {choice} outside 1-{}",
                        question.options.len()
                    ))
                })?;
            Ok(PersonaAnswer::choice(
                persona,
                choice as usize,
                Some(text.to_string()),
                reasoning,
            ))
        }
    }
}

fn whole_number(value: Option<f64>, field: &str) -> Result<i64, ReasoningError> {
    let value = value.ok_or_else(|| ReasoningError::parse(format!("missing '{field}'")))?;
    if value.fract() != 0.0 || !value.is_finite() {
        return Err(ReasoningError::parse(format!("'{field}' is not a whole number")));
    }
    Ok(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_core::persona::{CbdExperience, ConcernTag, Lifestyle, PriceSensitivity};
    use panel_core::survey::Verdict;

    fn persona() -> Persona {
        Persona {
            id: 3,
            name: "Ірина".to_string(),
            age: 35,
            gender: "жінка".to_string(),
            city: "Одеса".to_string(),
            occupation: "Лікар".to_string(),
            income: "35000-50000".to_string(),
            state_primary: ConcernTag::Stress,
            state_secondary: ConcernTag::Sleep,
            lifestyle: Lifestyle::WellnessEnthusiast,
            cbd_experience: CbdExperience::Beginner,
            price_sensitivity: PriceSensitivity::Medium,
            personality: "Скрупульозна".to_string(),
        }
    }

    #[test]
    fn test_scale_reply_surrounded_by_prose() {
        let text = "Ось моя відповідь: {\"score\": 8, \"reasoning\": \"Цікаво спробувати\"} Дякую!";
        let answer = parse_reply(text, &persona(), &Question::scale("?")).unwrap();
        assert_eq!(answer.persona_id, 3);
        assert_eq!(
            answer.verdict,
            Verdict::Scale {
                score: 8,
                reasoning: "Цікаво спробувати".to_string()
            }
        );
    }

    #[test]
    fn test_choice_reply_fills_option_text() {
        let question = Question::choice("?", vec!["A".to_string(), "B".to_string()]);
        let answer = parse_reply("{\"choice\": 2}", &persona(), &question).unwrap();
        assert_eq!(answer.choice_index(), Some(2));
        assert_eq!(
            answer.verdict,
            Verdict::Choice {
                choice: 2,
                choice_text: Some("B".to_string()),
                reasoning: String::new()
            }
        );
    }

    #[test]
    fn test_reply_without_fragment_is_parse_error() {
        let err = parse_reply("Мені подобається", &persona(), &Question::scale("?")).unwrap_err();
        assert!(matches!(err, ReasoningError::Parse(_)));
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let scale = Question::scale("?");
        assert!(parse_reply("{\"score\": 42}", &persona(), &scale).is_err());
        assert!(parse_reply("{\"score\": 0}", &persona(), &scale).is_err());
        assert!(parse_reply("{\"score\": 7.5}", &persona(), &scale).is_err());

        let choice = Question::choice("?", vec!["A".to_string()]);
        assert!(parse_reply("{\"choice\": 2}", &persona(), &choice).is_err());
        assert!(parse_reply("{\"choice\": -1}", &persona(), &choice).is_err());
    }

    #[test]
    fn test_wrong_field_for_question_type_is_rejected() {
        let err = parse_reply("{\"choice\": 1}", &persona(), &Question::scale("?")).unwrap_err();
        assert!(err.to_string().contains("missing 'score'"));
    }
}
