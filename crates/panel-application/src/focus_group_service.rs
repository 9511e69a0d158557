//! Focus group use case.
//!
//! Selects personas by segment, asks each one through the configured
//! reasoner, aggregates the answers and records the outcome.

use crate::segment_catalog::SegmentCatalog;
use chrono::{DateTime, Utc};
use panel_core::config::PanelSettings;
use panel_core::error::{PanelError, Result};
use panel_core::persona::{Persona, PersonaStore};
use panel_core::reasoner::{Reasoner, ReasonerKind};
use panel_core::result::{ResultStore, TestRecord};
use panel_core::survey::{HypothesisRequest, aggregate};
use panel_execution::PanelExecutor;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Liveness summary.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: &'static str,
    pub personas: usize,
    pub reasoner: ReasonerKind,
}

/// Full panel listing.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PersonaListing {
    pub personas: Vec<Persona>,
    pub total: usize,
}

/// Service running hypothesis tests against the persona panel.
pub struct FocusGroupService {
    personas: Arc<dyn PersonaStore>,
    results: Arc<dyn ResultStore>,
    executor: PanelExecutor,
    sample_size: usize,
}

impl FocusGroupService {
    pub fn new(
        personas: Arc<dyn PersonaStore>,
        results: Arc<dyn ResultStore>,
        reasoner: Arc<dyn Reasoner>,
        settings: &PanelSettings,
    ) -> Self {
        Self {
            personas,
            results,
            executor: PanelExecutor::new(reasoner, settings.concurrency_limit()),
            sample_size: settings.sample_size,
        }
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "ok",
            personas: self.personas.len(),
            reasoner: self.executor.reasoner_kind(),
        }
    }

    pub fn personas(&self) -> PersonaListing {
        let personas = self.personas.all().to_vec();
        PersonaListing {
            total: personas.len(),
            personas,
        }
    }

    pub fn segments(&self) -> SegmentCatalog {
        SegmentCatalog::from_store(self.personas.as_ref())
    }

    /// Runs one hypothesis test and appends its record.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when the request is malformed or no persona matches
    ///   the segment filter
    /// - Any error from the result store
    pub async fn run_test(&self, request: &HypothesisRequest) -> Result<TestRecord> {
        let question = request.question()?;
        let selected = self.personas.filter(&request.segment_filter());
        if selected.is_empty() {
            return Err(PanelError::invalid_input("No personas match filters"));
        }

        tracing::info!(
            "[FocusGroup] Testing {} hypothesis with {} personas",
            question.kind,
            selected.len()
        );
        let started = Instant::now();

        let answers = self.executor.run(&selected, &question).await;
        for answer in &answers {
            tracing::debug!(
                persona_id = answer.persona_id,
                score = ?answer.score(),
                choice = ?answer.choice_index(),
                "[FocusGroup] Answer received"
            );
        }

        let created_at = Utc::now();
        let record = TestRecord {
            id: record_id(created_at),
            hypothesis: request.hypothesis.clone(),
            created_at,
            results: aggregate(&question, &selected, &answers, self.sample_size),
        };
        self.results.append(record.clone()).await?;

        tracing::info!(
            "[FocusGroup] Test {} finished in {:?} ({} responses)",
            record.id,
            started.elapsed(),
            record.results.total()
        );
        Ok(record)
    }

    /// Returns every recorded test in creation order.
    pub async fn results(&self) -> Result<Vec<TestRecord>> {
        self.results.list().await
    }

    pub async fn result(&self, id: &str) -> Result<TestRecord> {
        self.results
            .find(id)
            .await?
            .ok_or_else(|| PanelError::not_found("TestRecord", id))
    }
}

/// `test_<timestamp>_<random>`; the random suffix keeps same-second ids apart.
fn record_id(created_at: DateTime<Utc>) -> String {
    format!(
        "test_{}_{}",
        created_at.format("%Y%m%d_%H%M%S"),
        uuid::Uuid::new_v4().simple()
    )
}
