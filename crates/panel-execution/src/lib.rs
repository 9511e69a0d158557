use futures::future::join_all;
use panel_core::persona::Persona;
use panel_core::reasoner::{Reasoner, ReasonerKind};
use panel_core::survey::{PersonaAnswer, Question};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// Fans one question out to a set of personas.
///
/// At most `max_concurrency` asks are in flight at once. Answers come back
/// in the same order as the input personas, and there is exactly one answer
/// per persona because `Reasoner::ask` cannot fail.
pub struct PanelExecutor {
    reasoner: Arc<dyn Reasoner>,
    max_concurrency: usize,
}

impl PanelExecutor {
    /// Creates an executor. A `max_concurrency` of zero is treated as one.
    pub fn new(reasoner: Arc<dyn Reasoner>, max_concurrency: usize) -> Self {
        Self {
            reasoner,
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn reasoner_kind(&self) -> ReasonerKind {
        self.reasoner.kind()
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Asks every persona and returns the answers in persona order.
    pub async fn run(&self, personas: &[Persona], question: &Question) -> Vec<PersonaAnswer> {
        let started = Instant::now();
        let semaphore = Semaphore::new(self.max_concurrency);

        let asks = personas.iter().map(|persona| {
            let semaphore = &semaphore;
            async move {
                // The semaphore is never closed, so acquire cannot fail.
                let _permit = semaphore.acquire().await.ok();
                self.reasoner.ask(persona, question).await
            }
        });
        let answers = join_all(asks).await;

        tracing::info!(
            "[PanelExecutor] {} answers via {} reasoner in {:?} (max {} in flight)",
            answers.len(),
            self.reasoner.kind(),
            started.elapsed(),
            self.max_concurrency
        );
        answers
    }
}
