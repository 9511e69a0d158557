//! Test record model.

use crate::survey::AggregateResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed hypothesis test. Created once, never mutated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TestRecord {
    /// Unique identifier, e.g. `test_20250101_120000_<uuid>`
    pub id: String,
    pub hypothesis: String,
    pub created_at: DateTime<Utc>,
    pub results: AggregateResult,
}
