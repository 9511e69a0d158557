//! Domain layer for the synthetic focus group panel.
//!
//! Holds the persona and survey models, the aggregation rules, and the
//! traits (`PersonaStore`, `ResultStore`, `Reasoner`) that the outer crates
//! implement.

pub mod config;
pub mod error;
pub mod persona;
pub mod reasoner;
pub mod result;
pub mod survey;

// Re-export common error type
pub use error::PanelError;
