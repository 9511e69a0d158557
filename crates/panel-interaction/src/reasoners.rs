//! Reasoner implementations.
//!
//! `NetworkReasoner` asks the Claude API in character and degrades to the
//! simulator on any failure. `SimulatedReasoner` never touches the network.

use crate::claude_api_client::ClaudeApiClient;
use crate::error::ReasoningError;
use crate::prompt::PromptBuilder;
use crate::reply_parser::parse_reply;
use crate::simulator::ResponseSimulator;
use async_trait::async_trait;
use panel_core::config::{PanelSettings, ReasoningConfig};
use panel_core::persona::Persona;
use panel_core::reasoner::{Reasoner, ReasonerKind};
use panel_core::survey::{PersonaAnswer, Question};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex, PoisonError};

/// Rule-based reasoner with a shared random source.
///
/// A fixed seed makes a sequential run reproducible.
pub struct SimulatedReasoner {
    simulator: ResponseSimulator,
    rng: Mutex<StdRng>,
}

impl SimulatedReasoner {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            simulator: ResponseSimulator::new(),
            rng: Mutex::new(rng),
        }
    }

    pub fn answer(&self, persona: &Persona, question: &Question) -> PersonaAnswer {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.simulator.simulate(persona, question, &mut *rng)
    }
}

#[async_trait]
impl Reasoner for SimulatedReasoner {
    fn kind(&self) -> ReasonerKind {
        ReasonerKind::Simulated
    }

    async fn ask(&self, persona: &Persona, question: &Question) -> PersonaAnswer {
        self.answer(persona, question)
    }
}

/// Claude-backed reasoner.
pub struct NetworkReasoner {
    client: ClaudeApiClient,
    prompts: PromptBuilder,
    fallback: SimulatedReasoner,
}

impl NetworkReasoner {
    pub fn new(client: ClaudeApiClient, fallback: SimulatedReasoner) -> Result<Self, ReasoningError> {
        Ok(Self {
            client,
            prompts: PromptBuilder::new()?,
            fallback,
        })
    }

    pub fn from_config(
        config: &ReasoningConfig,
        fallback: SimulatedReasoner,
    ) -> Result<Self, ReasoningError> {
        Self::new(ClaudeApiClient::from_config(config)?, fallback)
    }

    /// Single attempt against the service, without fallback.
    pub async fn try_ask(
        &self,
        persona: &Persona,
        question: &Question,
    ) -> Result<PersonaAnswer, ReasoningError> {
        let system = self.prompts.role_prompt(persona)?;
        let task = self.prompts.task_prompt(question)?;
        let text = self.client.complete(&system, &task).await?;
        parse_reply(&text, persona, question)
    }
}

#[async_trait]
impl Reasoner for NetworkReasoner {
    fn kind(&self) -> ReasonerKind {
        ReasonerKind::Network
    }

    async fn ask(&self, persona: &Persona, question: &Question) -> PersonaAnswer {
        match self.try_ask(persona, question).await {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(
                    persona_id = persona.id,
                    error = %err,
                    "[NetworkReasoner] Falling back to simulated answer"
                );
                self.fallback.answer(persona, question)
            }
        }
    }
}

/// Picks the reasoner for the process lifetime.
///
/// A configured credential selects the network reasoner; otherwise answers
/// are simulated.
pub fn build_reasoner(
    reasoning: &ReasoningConfig,
    panel: &PanelSettings,
) -> Result<Arc<dyn Reasoner>, ReasoningError> {
    let simulated = SimulatedReasoner::new(panel.simulator_seed);

    if reasoning.credential().is_none() {
        tracing::info!("[Reasoner] No API key configured, using simulated answers");
        return Ok(Arc::new(simulated));
    }

    let reasoner = NetworkReasoner::from_config(reasoning, simulated)?;
    tracing::info!(
        "[Reasoner] Using Claude API (model: {}) with simulated fallback",
        reasoner.client.model()
    );
    Ok(Arc::new(reasoner))
}
