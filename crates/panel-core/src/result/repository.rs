//! Result store trait.

use super::model::TestRecord;
use crate::error::Result;

/// Append-only store of completed tests.
///
/// Appends may arrive from concurrently running tests; implementations must
/// serialize them so `list` never observes a partial write.
#[async_trait::async_trait]
pub trait ResultStore: Send + Sync {
    /// Appends a completed record.
    async fn append(&self, record: TestRecord) -> Result<()>;

    /// Returns every record in insertion order.
    async fn list(&self) -> Result<Vec<TestRecord>>;

    /// Looks up a single record by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(TestRecord))`: Record found
    /// - `Ok(None)`: No record with this id
    async fn find(&self, id: &str) -> Result<Option<TestRecord>> {
        Ok(self.list().await?.into_iter().find(|record| record.id == id))
    }
}
