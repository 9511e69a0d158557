//! Application layer for the synthetic panel.
//!
//! Coordinates the persona store, reasoner and result store to run
//! hypothesis tests.

pub mod focus_group_service;
pub mod segment_catalog;

pub use focus_group_service::{FocusGroupService, HealthStatus, PersonaListing};
pub use segment_catalog::SegmentCatalog;
