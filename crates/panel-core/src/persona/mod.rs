//! Persona domain module.
//!
//! This module contains the persona model, the segment filter applied to the
//! panel, and the read-only store interface.
//!
//! # Module Structure
//!
//! - `model`: `Persona` and its closed tag vocabularies
//! - `segment`: `SegmentFilter` / `SegmentField`
//! - `repository`: `PersonaStore` trait

mod model;
mod repository;
mod segment;

// Re-export public API
pub use model::{CbdExperience, ConcernTag, Lifestyle, Persona, PriceSensitivity};
pub use repository::PersonaStore;
pub use segment::{SegmentField, SegmentFilter};
