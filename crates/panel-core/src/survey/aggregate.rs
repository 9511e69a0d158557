//! Aggregation of persona answers into summary statistics.

use super::model::{PersonaAnswer, Question, QuestionType, Verdict};
use crate::persona::{Persona, SegmentField};
use serde::{Deserialize, Serialize};

/// Number of raw answers kept on a result for display.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Score used for grouping when an answer carries no score.
const NEUTRAL_SCORE: u8 = 5;

/// Scores at or above this count as positive.
const POSITIVE_FROM: u8 = 7;
/// Scores at or above this (and below `POSITIVE_FROM`) count as neutral.
const NEUTRAL_FROM: u8 = 4;

/// Summary statistics for one test, tagged by question type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AggregateResult {
    Scale(ScaleSummary),
    Choice(ChoiceSummary),
}

impl AggregateResult {
    pub fn total(&self) -> usize {
        match self {
            AggregateResult::Scale(summary) => summary.total,
            AggregateResult::Choice(summary) => summary.total,
        }
    }

    pub fn responses(&self) -> &[PersonaAnswer] {
        match self {
            AggregateResult::Scale(summary) => &summary.responses,
            AggregateResult::Choice(summary) => &summary.responses,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScaleSummary {
    pub total: usize,
    pub average: f64,
    /// One bucket per score 1..=10
    pub distribution: Vec<ScoreBucket>,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub by_state: Vec<StateGroup>,
    pub by_lifestyle: Vec<LifestyleGroup>,
    /// Leading sample of raw answers in panel order
    pub responses: Vec<PersonaAnswer>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoreBucket {
    pub score: u8,
    pub count: usize,
    pub pct: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StateGroup {
    pub state: String,
    pub avg: f64,
    pub count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LifestyleGroup {
    pub lifestyle: String,
    pub avg: f64,
    pub count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChoiceSummary {
    pub total: usize,
    pub choices: Vec<ChoiceTally>,
    pub responses: Vec<PersonaAnswer>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChoiceTally {
    /// Canonical option text
    pub choice: String,
    pub count: usize,
    pub pct: f64,
}

/// Aggregates answers for `question`.
///
/// `personas[i]` must be the persona that produced `answers[i]`; group
/// statistics read the segment tags from the paired persona.
pub fn aggregate(
    question: &Question,
    personas: &[Persona],
    answers: &[PersonaAnswer],
    sample_size: usize,
) -> AggregateResult {
    debug_assert_eq!(personas.len(), answers.len());
    let sample: Vec<PersonaAnswer> = answers.iter().take(sample_size).cloned().collect();

    match question.kind {
        QuestionType::Scale => AggregateResult::Scale(summarize_scale(personas, answers, sample)),
        QuestionType::Choice => {
            AggregateResult::Choice(summarize_choice(question, answers, sample))
        }
    }
}

fn summarize_scale(
    personas: &[Persona],
    answers: &[PersonaAnswer],
    responses: Vec<PersonaAnswer>,
) -> ScaleSummary {
    let scores: Vec<u8> = answers.iter().filter_map(PersonaAnswer::score).collect();

    let mut counts = [0usize; 10];
    for &score in &scores {
        if (1..=10).contains(&score) {
            counts[usize::from(score) - 1] += 1;
        }
    }

    let distribution = counts
        .iter()
        .enumerate()
        .map(|(idx, &count)| ScoreBucket {
            score: idx as u8 + 1,
            count,
            pct: percentage(count, scores.len()),
        })
        .collect();

    let by_state = group_scores(personas, answers, SegmentField::State)
        .into_iter()
        .map(|(state, group)| StateGroup {
            state,
            avg: mean(&group),
            count: group.len(),
        })
        .collect();

    let by_lifestyle = group_scores(personas, answers, SegmentField::Lifestyle)
        .into_iter()
        .map(|(lifestyle, group)| LifestyleGroup {
            lifestyle,
            avg: mean(&group),
            count: group.len(),
        })
        .collect();

    ScaleSummary {
        total: answers.len(),
        average: mean(&scores),
        distribution,
        positive: scores.iter().filter(|&&s| s >= POSITIVE_FROM).count(),
        neutral: scores
            .iter()
            .filter(|&&s| (NEUTRAL_FROM..POSITIVE_FROM).contains(&s))
            .count(),
        negative: scores.iter().filter(|&&s| s < NEUTRAL_FROM).count(),
        by_state,
        by_lifestyle,
        responses,
    }
}

fn summarize_choice(
    question: &Question,
    answers: &[PersonaAnswer],
    responses: Vec<PersonaAnswer>,
) -> ChoiceSummary {
    let mut tallies: Vec<(String, usize)> = Vec::new();
    for answer in answers {
        let key = choice_key(question, answer);
        match tallies.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, count)) => *count += 1,
            None => tallies.push((key, 1)),
        }
    }

    let total = answers.len();
    ChoiceSummary {
        total,
        choices: tallies
            .into_iter()
            .map(|(choice, count)| ChoiceTally {
                choice,
                count,
                pct: percentage(count, total),
            })
            .collect(),
        responses,
    }
}

/// Grouping key for a choice answer: the option text whenever the index
/// names an option, so index and text never split one choice in two.
fn choice_key(question: &Question, answer: &PersonaAnswer) -> String {
    match &answer.verdict {
        Verdict::Choice {
            choice,
            choice_text,
            ..
        } => question
            .option_text(*choice)
            .map(str::to_string)
            .or_else(|| choice_text.clone())
            .unwrap_or_else(|| choice.to_string()),
        Verdict::Scale { .. } => "Unknown".to_string(),
    }
}

/// Groups scores by the paired persona's tag, in order of first occurrence.
fn group_scores(
    personas: &[Persona],
    answers: &[PersonaAnswer],
    field: SegmentField,
) -> Vec<(String, Vec<u8>)> {
    let mut groups: Vec<(String, Vec<u8>)> = Vec::new();
    for (persona, answer) in personas.iter().zip(answers) {
        let key = field.value_of(persona);
        let score = answer.score().unwrap_or(NEUTRAL_SCORE);
        match groups.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, scores)) => scores.push(score),
            None => groups.push((key.to_string(), vec![score])),
        }
    }
    groups
}

fn mean(scores: &[u8]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let sum: u32 = scores.iter().map(|&s| u32::from(s)).sum();
    round1(f64::from(sum) / scores.len() as f64)
}

fn percentage(count: usize, of: usize) -> f64 {
    if of == 0 {
        return 0.0;
    }
    round1(count as f64 / of as f64 * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::{CbdExperience, ConcernTag, Lifestyle, PriceSensitivity};

    fn persona(id: u32, state: ConcernTag, lifestyle: Lifestyle) -> Persona {
        Persona {
            id,
            name: format!("P{id}"),
            age: 40,
            gender: "male".to_string(),
            city: "Київ".to_string(),
            occupation: "Інженер".to_string(),
            income: "50000-75000".to_string(),
            state_primary: state,
            state_secondary: ConcernTag::Energy,
            lifestyle,
            cbd_experience: CbdExperience::Intermediate,
            price_sensitivity: PriceSensitivity::Medium,
            personality: "Спокійний".to_string(),
        }
    }

    fn scale_fixture(scores: &[u8]) -> (Vec<Persona>, Vec<PersonaAnswer>) {
        let tags = [
            (ConcernTag::Stress, Lifestyle::HighAchiever),
            (ConcernTag::Sleep, Lifestyle::Skeptic),
            (ConcernTag::Stress, Lifestyle::Skeptic),
        ];
        let personas: Vec<Persona> = scores
            .iter()
            .enumerate()
            .map(|(i, _)| {
                let (state, lifestyle) = tags[i % tags.len()];
                persona(i as u32 + 1, state, lifestyle)
            })
            .collect();
        let answers = personas
            .iter()
            .zip(scores)
            .map(|(p, &s)| PersonaAnswer::scale(p, s, "r"))
            .collect();
        (personas, answers)
    }

    fn unwrap_scale(result: AggregateResult) -> ScaleSummary {
        match result {
            AggregateResult::Scale(summary) => summary,
            other => panic!("expected scale summary, got {other:?}"),
        }
    }

    fn unwrap_choice(result: AggregateResult) -> ChoiceSummary {
        match result {
            AggregateResult::Choice(summary) => summary,
            other => panic!("expected choice summary, got {other:?}"),
        }
    }

    #[test]
    fn test_scale_counts_are_consistent() {
        let scores = [1, 3, 4, 6, 7, 10, 10, 5, 2, 9, 8, 7];
        let (personas, answers) = scale_fixture(&scores);
        let summary = unwrap_scale(aggregate(
            &Question::scale("?"),
            &personas,
            &answers,
            DEFAULT_SAMPLE_SIZE,
        ));

        assert_eq!(summary.total, scores.len());
        assert_eq!(summary.distribution.len(), 10);
        let bucket_total: usize = summary.distribution.iter().map(|b| b.count).sum();
        assert_eq!(bucket_total, scores.len());
        assert_eq!(
            summary.positive + summary.neutral + summary.negative,
            scores.len()
        );
        assert_eq!(summary.positive, 6);
        assert_eq!(summary.neutral, 3);
        assert_eq!(summary.negative, 3);

        let pct_total: f64 = summary.distribution.iter().map(|b| b.pct).sum();
        assert!((pct_total - 100.0).abs() < 1.0, "pct total was {pct_total}");
    }

    #[test]
    fn test_scale_average_rounds_to_one_decimal() {
        let (personas, answers) = scale_fixture(&[7, 8, 8]);
        let summary = unwrap_scale(aggregate(&Question::scale("?"), &personas, &answers, 10));
        assert_eq!(summary.average, 7.7);
        assert_eq!(summary.distribution[7].count, 2);
        assert_eq!(summary.distribution[7].pct, 66.7);
    }

    #[test]
    fn test_groups_keep_first_occurrence_order() {
        let (personas, answers) = scale_fixture(&[2, 9, 6, 4]);
        let summary = unwrap_scale(aggregate(&Question::scale("?"), &personas, &answers, 10));

        let states: Vec<&str> = summary.by_state.iter().map(|g| g.state.as_str()).collect();
        assert_eq!(states, vec!["stress", "sleep"]);
        // stress: 2, 6, 4
        assert_eq!(summary.by_state[0].count, 3);
        assert_eq!(summary.by_state[0].avg, 4.0);

        let lifestyles: Vec<&str> = summary
            .by_lifestyle
            .iter()
            .map(|g| g.lifestyle.as_str())
            .collect();
        assert_eq!(lifestyles, vec!["high_achiever", "skeptic"]);
        assert_eq!(summary.by_lifestyle[1].count, 2);
        assert_eq!(summary.by_lifestyle[1].avg, 7.5);
    }

    #[test]
    fn test_sample_is_truncated_in_panel_order() {
        let scores: Vec<u8> = (0..25).map(|i| (i % 10) as u8 + 1).collect();
        let (personas, answers) = scale_fixture(&scores);
        let result = aggregate(&Question::scale("?"), &personas, &answers, DEFAULT_SAMPLE_SIZE);

        assert_eq!(result.total(), 25);
        let ids: Vec<u32> = result.responses().iter().map(|a| a.persona_id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
    }

    #[test]
    fn test_empty_scale_defaults_to_zero() {
        let summary = unwrap_scale(aggregate(&Question::scale("?"), &[], &[], 10));
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average, 0.0);
        assert!(summary.distribution.iter().all(|b| b.count == 0 && b.pct == 0.0));
        assert!(summary.by_state.is_empty());
    }

    #[test]
    fn test_choice_tallies_use_option_text() {
        let question = Question::choice("?", vec!["Дешевий".into(), "Преміум".into()]);
        let personas: Vec<Persona> = (1..=4)
            .map(|id| persona(id, ConcernTag::Focus, Lifestyle::Biohacker))
            .collect();
        let answers = vec![
            PersonaAnswer::choice(&personas[0], 2, Some("Преміум".into()), ""),
            PersonaAnswer::choice(&personas[1], 1, Some("Дешевий".into()), ""),
            // index without text still lands on the canonical option
            PersonaAnswer::choice(&personas[2], 2, None, ""),
            PersonaAnswer::choice(&personas[3], 2, Some("Преміум".into()), ""),
        ];

        let summary = unwrap_choice(aggregate(&question, &personas, &answers, 10));
        assert_eq!(summary.total, 4);
        assert_eq!(
            summary.choices,
            vec![
                ChoiceTally {
                    choice: "Преміум".into(),
                    count: 3,
                    pct: 75.0
                },
                ChoiceTally {
                    choice: "Дешевий".into(),
                    count: 1,
                    pct: 25.0
                },
            ]
        );
    }

    #[test]
    fn test_choice_without_options_keys_by_index() {
        let question = Question::choice("?", Vec::new());
        let personas = vec![persona(1, ConcernTag::Focus, Lifestyle::Biohacker)];
        let answers = vec![PersonaAnswer::choice(&personas[0], 1, None, "")];

        let summary = unwrap_choice(aggregate(&question, &personas, &answers, 10));
        assert_eq!(summary.choices[0].choice, "1");
        assert_eq!(summary.choices[0].pct, 100.0);
    }

    #[test]
    fn test_result_serializes_with_type_tag() {
        let (personas, answers) = scale_fixture(&[5]);
        let result = aggregate(&Question::scale("?"), &personas, &answers, 10);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["type"], "scale");
        assert_eq!(value["total"], 1);
        assert_eq!(value["distribution"][4]["count"], 1);
        assert_eq!(value["by_state"][0]["state"], "stress");

        let back: AggregateResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, result);
    }
}
