//! Rule-based answer simulation.
//!
//! Scores start from a neutral baseline and are nudged by keyword cues in
//! the hypothesis matched against persona traits, then jittered and clamped.
//! Choices are a weighted draw over option texts.

use panel_core::persona::{ConcernTag, Persona};
use panel_core::survey::{PersonaAnswer, Question, QuestionType};
use rand::Rng;

pub const SIMULATED_SCALE_REASONING: &str = "Симульована відповідь на основі профілю";
pub const SIMULATED_CHOICE_REASONING: &str = "Симульована відповідь";

const BASELINE: f64 = 5.5;
const JITTER_SPAN: f64 = 2.5;
const HOME_CITY: &str = "Київ";

const PRICE_CUES: &[&str] = &["знижк", "акці", "ціна"];
const SUBSCRIPTION_CUES: &[&str] = &["підписк"];
const VENUE_CUES: &[&str] = &["experience", "магазин", "офлайн"];
const NOVELTY_CUES: &[&str] = &["новий", "продукт"];
const CONCERN_CUES: &[(ConcernTag, &[&str])] = &[
    (ConcernTag::Sleep, &["сон", "sleep"]),
    (ConcernTag::Stress, &["стрес", "stress"]),
    (ConcernTag::Focus, &["фокус", "концентрац"]),
];

const PREMIUM_CUES: &[&str] = &["дорог", "премі"];
const BUDGET_CUES: &[&str] = &["дешев", "економ", "бюджет"];

fn mentions(text: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| text.contains(cue))
}

/// Deterministic part of the simulation. Randomness is supplied by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseSimulator;

impl ResponseSimulator {
    pub fn new() -> Self {
        Self
    }

    pub fn simulate<R: Rng + ?Sized>(
        &self,
        persona: &Persona,
        question: &Question,
        rng: &mut R,
    ) -> PersonaAnswer {
        match question.kind {
            QuestionType::Scale => {
                let jitter = (rng.gen_range(0.0..1.0) - 0.5) * JITTER_SPAN;
                let score = finalize_score(self.baseline(persona, &question.hypothesis) + jitter);
                PersonaAnswer::scale(persona, score, SIMULATED_SCALE_REASONING)
            }
            QuestionType::Choice => {
                if question.options.is_empty() {
                    return PersonaAnswer::choice(persona, 1, None, SIMULATED_CHOICE_REASONING);
                }
                let weights = self.choice_weights(persona, &question.options);
                let total: f64 = weights.iter().sum();
                let idx = weighted_pick(&weights, rng.gen_range(0.0..1.0) * total);
                PersonaAnswer::choice(
                    persona,
                    idx + 1,
                    Some(question.options[idx].clone()),
                    SIMULATED_CHOICE_REASONING,
                )
            }
        }
    }

    /// Score before jitter and clamping.
    pub fn baseline(&self, persona: &Persona, hypothesis: &str) -> f64 {
        let text = hypothesis.to_lowercase();
        let mut score = BASELINE;

        if mentions(&text, PRICE_CUES) {
            if persona.price_sensitivity.is_high() {
                score += 2.5;
            } else if persona.price_sensitivity.is_low() {
                score -= 0.5;
            }
        }

        if mentions(&text, SUBSCRIPTION_CUES) {
            if persona.cbd_experience.is_experienced() {
                score += 1.5;
            } else if persona.cbd_experience.is_novice() {
                score -= 1.5;
            }
            if persona.is_young() {
                score += 1.0;
            } else if persona.is_older() {
                score -= 1.0;
            }
        }

        if mentions(&text, VENUE_CUES) {
            if persona.city == HOME_CITY {
                score += 2.0;
            } else {
                score -= 1.5;
            }
        }

        if mentions(&text, NOVELTY_CUES) {
            if persona.cbd_experience.is_experienced() {
                score += 0.5;
            } else if persona.cbd_experience.is_novice() {
                score += 1.5;
            }
        }

        for (concern, cues) in CONCERN_CUES {
            if persona.state_primary == *concern && mentions(&text, cues) {
                score += 2.0;
            }
        }

        score
    }

    /// Relative draw weight of each option for this persona.
    pub fn choice_weights(&self, persona: &Persona, options: &[String]) -> Vec<f64> {
        options
            .iter()
            .map(|option| {
                let text = option.to_lowercase();
                let mut weight = 1.0;
                if mentions(&text, PREMIUM_CUES) && persona.price_sensitivity.is_low() {
                    weight += 2.0;
                }
                if mentions(&text, BUDGET_CUES) && persona.price_sensitivity.is_high() {
                    weight += 2.0;
                }
                if mentions(&text, SUBSCRIPTION_CUES) && persona.cbd_experience.is_experienced() {
                    weight += 1.5;
                }
                weight
            })
            .collect()
    }
}

/// Rounds half to even and clamps to the 1-10 scale.
pub fn finalize_score(raw: f64) -> u8 {
    raw.round_ties_even().clamp(1.0, 10.0) as u8
}

/// Index of the first option whose cumulative weight reaches `draw`.
pub fn weighted_pick(weights: &[f64], draw: f64) -> usize {
    let mut cumulative = 0.0;
    for (idx, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if draw <= cumulative {
            return idx;
        }
    }
    0
}
