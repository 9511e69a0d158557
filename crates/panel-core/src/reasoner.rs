//! Reasoning capability trait.
//!
//! A reasoner produces one persona's answer to a question. The concrete
//! capability (network-backed or simulated) is chosen once at startup.

use crate::persona::Persona;
use crate::survey::{PersonaAnswer, Question};
use serde::Serialize;
use strum::{AsRefStr, Display};

/// Which capability backs a reasoner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReasonerKind {
    /// External generative text service with simulated fallback
    Network,
    /// Rule-based simulation only
    Simulated,
}

/// Answers a question in character for a single persona.
///
/// Implementations never fail outward: any internal failure must degrade to
/// a simulated answer, so callers can join a batch of asks unconditionally.
#[async_trait::async_trait]
pub trait Reasoner: Send + Sync {
    fn kind(&self) -> ReasonerKind;

    async fn ask(&self, persona: &Persona, question: &Question) -> PersonaAnswer;
}
