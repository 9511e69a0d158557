//! Answer production for panel personas.
//!
//! - `claude_api_client`: Claude Messages API transport
//! - `prompt`: role and task prompt templates
//! - `reply_parser`: structured answer extraction
//! - `simulator`: rule-based answers
//! - `reasoners`: `Reasoner` implementations and startup selection

pub mod claude_api_client;
pub mod error;
pub mod prompt;
pub mod reasoners;
pub mod reply_parser;
pub mod simulator;

pub use claude_api_client::ClaudeApiClient;
pub use error::ReasoningError;
pub use reasoners::{NetworkReasoner, SimulatedReasoner, build_reasoner};
pub use simulator::{ResponseSimulator, SIMULATED_CHOICE_REASONING, SIMULATED_SCALE_REASONING};
