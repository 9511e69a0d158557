//! Process-lifetime ResultStore implementation

use async_trait::async_trait;
use panel_core::error::Result;
use panel_core::result::{ResultStore, TestRecord};
use tokio::sync::Mutex;

/// Keeps completed tests in memory for the lifetime of the process.
///
/// Appends are serialized by a mutex, so concurrently finishing tests
/// are recorded whole and in completion order.
#[derive(Debug, Default)]
pub struct InMemoryResultStore {
    records: Mutex<Vec<TestRecord>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn append(&self, record: TestRecord) -> Result<()> {
        let mut records = self.records.lock().await;
        tracing::debug!(id = %record.id, stored = records.len() + 1, "Appending test record");
        records.push(record);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<TestRecord>> {
        Ok(self.records.lock().await.clone())
    }
}
