//! Survey questions, persona answers, and their aggregation.

mod aggregate;
mod model;

pub use aggregate::{
    AggregateResult, ChoiceSummary, ChoiceTally, DEFAULT_SAMPLE_SIZE, LifestyleGroup,
    ScaleSummary, ScoreBucket, StateGroup, aggregate,
};
pub use model::{HypothesisRequest, PersonaAnswer, Question, QuestionType, Verdict};
