//! Completed test records and the store that keeps them.

mod model;
mod repository;

pub use model::TestRecord;
pub use repository::ResultStore;
